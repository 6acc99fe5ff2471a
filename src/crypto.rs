// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Password-based authenticated encryption for backup payloads.
//!
//! Argon2id derives a 256-bit key from the password with a fresh random
//! salt per encryption; AES-256-GCM seals the plaintext with a fresh
//! random 96-bit nonce, auth tag appended to the ciphertext. The blob is
//! self-describing (algorithm ids and KDF parameters travel with it) and
//! all binary fields are base64 so it can ride inside JSON.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

pub const AEAD_ALGORITHM: &str = "AES-256-GCM";
pub const KDF_ALGORITHM: &str = "argon2id";

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;

// Argon2id work factors (RFC 9106 low-memory profile).
const DEFAULT_M_COST: u32 = 19_456;
const DEFAULT_T_COST: u32 = 2;
const DEFAULT_P_COST: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedBlob {
    pub algorithm: String,
    pub kdf: String,
    pub salt: String,
    pub nonce: String,
    pub ciphertext: String,
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

fn derive_key(
    password: &str,
    salt: &[u8],
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
) -> Result<[u8; 32], SyncError> {
    let params = Params::new(m_cost, t_cost, p_cost, Some(32))
        .map_err(|e| SyncError::Malformed(format!("invalid KDF parameters: {}", e)))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let mut key = [0u8; 32];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| SyncError::Malformed(format!("key derivation failed: {}", e)))?;
    Ok(key)
}

pub fn encrypt(plaintext: &str, password: &str) -> Result<EncryptedBlob, SyncError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let key = derive_key(password, &salt, DEFAULT_M_COST, DEFAULT_T_COST, DEFAULT_P_COST)?;
    let cipher = Aes256Gcm::new(&key.into());
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|_| SyncError::Malformed("encryption failed".to_string()))?;

    Ok(EncryptedBlob {
        algorithm: AEAD_ALGORITHM.to_string(),
        kdf: KDF_ALGORITHM.to_string(),
        salt: B64.encode(salt),
        nonce: B64.encode(nonce_bytes),
        ciphertext: B64.encode(ciphertext),
        m_cost: DEFAULT_M_COST,
        t_cost: DEFAULT_T_COST,
        p_cost: DEFAULT_P_COST,
    })
}

pub fn decrypt(blob: &EncryptedBlob, password: &str) -> Result<String, SyncError> {
    if blob.algorithm != AEAD_ALGORITHM {
        return Err(SyncError::Malformed(format!(
            "unsupported cipher '{}'",
            blob.algorithm
        )));
    }
    if blob.kdf != KDF_ALGORITHM {
        return Err(SyncError::Malformed(format!(
            "unsupported KDF '{}'",
            blob.kdf
        )));
    }

    let salt = B64
        .decode(&blob.salt)
        .map_err(|_| SyncError::Malformed("salt is not valid base64".to_string()))?;
    let nonce = B64
        .decode(&blob.nonce)
        .map_err(|_| SyncError::Malformed("nonce is not valid base64".to_string()))?;
    let ciphertext = B64
        .decode(&blob.ciphertext)
        .map_err(|_| SyncError::Malformed("ciphertext is not valid base64".to_string()))?;
    if nonce.len() != NONCE_LEN {
        return Err(SyncError::Malformed(format!(
            "nonce must be {} bytes, got {}",
            NONCE_LEN,
            nonce.len()
        )));
    }

    let key = derive_key(password, &salt, blob.m_cost, blob.t_cost, blob.p_cost)?;
    let cipher = Aes256Gcm::new(&key.into());
    // GCM tag verification rejects both wrong passwords and tampering.
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| SyncError::Authentication)?;

    String::from_utf8(plaintext)
        .map_err(|_| SyncError::Malformed("decrypted payload is not UTF-8".to_string()))
}
