// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use billfold::crypto::{decrypt, encrypt};
use billfold::error::SyncError;

#[test]
fn roundtrip_preserves_plaintext_exactly() {
    let plaintext = r#"{"version":"2.0","profiles":[{"id":"p1","name":"default"}]}"#;
    let blob = encrypt(plaintext, "hunter2").unwrap();
    assert_eq!(blob.algorithm, "AES-256-GCM");
    assert_eq!(blob.kdf, "argon2id");
    assert_eq!(decrypt(&blob, "hunter2").unwrap(), plaintext);
}

#[test]
fn wrong_password_is_rejected() {
    let blob = encrypt("secret data", "correct password").unwrap();
    let err = decrypt(&blob, "wrong password").unwrap_err();
    assert!(matches!(err, SyncError::Authentication));
}

#[test]
fn tampered_ciphertext_is_rejected() {
    let blob = encrypt("secret data", "pw").unwrap();
    let mut raw = B64.decode(&blob.ciphertext).unwrap();
    raw[0] ^= 0xFF;
    let mut tampered = blob.clone();
    tampered.ciphertext = B64.encode(raw);
    assert!(matches!(
        decrypt(&tampered, "pw").unwrap_err(),
        SyncError::Authentication
    ));
}

#[test]
fn tampered_tag_is_rejected() {
    let blob = encrypt("secret data", "pw").unwrap();
    // The GCM tag is the last 16 bytes of the ciphertext field.
    let mut raw = B64.decode(&blob.ciphertext).unwrap();
    let last = raw.len() - 1;
    raw[last] ^= 0x01;
    let mut tampered = blob.clone();
    tampered.ciphertext = B64.encode(raw);
    assert!(matches!(
        decrypt(&tampered, "pw").unwrap_err(),
        SyncError::Authentication
    ));
}

#[test]
fn salt_and_nonce_are_fresh_per_encryption() {
    let a = encrypt("same plaintext", "same password").unwrap();
    let b = encrypt("same plaintext", "same password").unwrap();
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.ciphertext, b.ciphertext);
    assert_eq!(decrypt(&a, "same password").unwrap(), "same plaintext");
    assert_eq!(decrypt(&b, "same password").unwrap(), "same plaintext");
}

#[test]
fn unknown_algorithm_is_malformed() {
    let mut blob = encrypt("data", "pw").unwrap();
    blob.algorithm = "ROT13".to_string();
    assert!(matches!(
        decrypt(&blob, "pw").unwrap_err(),
        SyncError::Malformed(_)
    ));
}

#[test]
fn invalid_base64_is_malformed() {
    let mut blob = encrypt("data", "pw").unwrap();
    blob.salt = "not base64!!!".to_string();
    assert!(matches!(
        decrypt(&blob, "pw").unwrap_err(),
        SyncError::Malformed(_)
    ));
}
