// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the backup/sync core. Command handlers carry these
/// through `anyhow`, so callers can either match on the variant via
/// `downcast_ref::<SyncError>()` or on the message text.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Wrong password or tampered ciphertext at decrypt time.
    #[error("Authentication failed: wrong password or corrupted data")]
    Authentication,

    /// Encrypted content presented without a password.
    #[error("This backup is encrypted; a password is required")]
    PasswordRequired,

    /// Structurally invalid envelope or blob.
    #[error("Malformed backup payload: {0}")]
    Malformed(String),

    /// Parse/decrypt failure during import; local state is untouched.
    #[error("Import failed: {0}")]
    ImportFailed(String),

    /// Remote store failure (network, auth, unexpected not-found).
    /// Propagated unchanged, never retried here.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Replace-import only: a profile of the same name already exists.
    #[error("A profile named '{0}' already exists")]
    ProfileNameCollision(String),
}
