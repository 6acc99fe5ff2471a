// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The outer JSON wrapper around a snapshot. Plain exports are the
//! snapshot itself; encrypted exports wrap an [`EncryptedBlob`] with
//! `encrypted: true` plus version/timestamp metadata.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{self, EncryptedBlob};
use crate::error::SyncError;
use crate::models::{SNAPSHOT_VERSION, Snapshot};
use crate::store::AppStore;
use crate::sync::snapshot::{apply_snapshot, build_snapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedEnvelope {
    pub encrypted: bool,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub data: EncryptedBlob,
}

/// What an import actually did. Version mismatch is a warning for the
/// caller to present, never a rejection.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub version: String,
    pub version_mismatch: bool,
    pub was_encrypted: bool,
}

pub fn export_plain(store: &AppStore) -> Result<String> {
    let snap = build_snapshot(store)?;
    Ok(serde_json::to_string_pretty(&snap)?)
}

pub fn export_encrypted(store: &AppStore, password: &str) -> Result<String> {
    let snap = build_snapshot(store)?;
    let plaintext = serde_json::to_string(&snap)?;
    let blob = crypto::encrypt(&plaintext, password)?;
    let envelope = EncryptedEnvelope {
        encrypted: true,
        version: snap.version,
        timestamp: snap.timestamp,
        data: blob,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse (and decrypt, when needed) an exported payload into a snapshot
/// without touching the store. All-or-nothing imports are built on this:
/// nothing is written until the whole snapshot has materialized.
pub fn parse_snapshot(json: &str, password: Option<&str>) -> Result<(Snapshot, ImportOutcome)> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| SyncError::ImportFailed(format!("invalid JSON: {}", e)))?;

    let was_encrypted = value.get("encrypted").and_then(|v| v.as_bool()) == Some(true);
    let snap: Snapshot = if was_encrypted {
        let Some(password) = password else {
            return Err(SyncError::PasswordRequired.into());
        };
        let envelope: EncryptedEnvelope = serde_json::from_value(value)
            .map_err(|e| SyncError::Malformed(format!("bad envelope: {}", e)))?;
        let plaintext = crypto::decrypt(&envelope.data, password)?;
        serde_json::from_str(&plaintext)
            .map_err(|e| SyncError::ImportFailed(format!("invalid snapshot: {}", e)))?
    } else {
        serde_json::from_value(value)
            .map_err(|e| SyncError::ImportFailed(format!("invalid snapshot: {}", e)))?
    };

    let outcome = ImportOutcome {
        version_mismatch: snap.version != SNAPSHOT_VERSION,
        version: snap.version.clone(),
        was_encrypted,
    };
    Ok((snap, outcome))
}

/// Non-merge restore: replace local state wholesale with the imported
/// snapshot.
pub fn import_from_string(
    store: &AppStore,
    json: &str,
    password: Option<&str>,
) -> Result<ImportOutcome> {
    let (snap, outcome) = parse_snapshot(json, password)?;
    apply_snapshot(store, &snap)?;
    store.mark_modified()?;
    Ok(outcome)
}
