// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Last-writer-wins auto-sync over whole snapshots. One timestamp on each
//! side decides the direction; there is no per-entity reconciliation, so
//! a remote change and a concurrent local change cannot both survive.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::store::AppStore;
use crate::sync::envelope::{export_encrypted, export_plain, import_from_string};
use crate::sync::transport::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Upload,
    Download,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Uploaded,
    Downloaded,
    /// Timestamps were equal; nothing moved.
    Synced,
    /// Another cycle was already in flight; this tick did nothing.
    Skipped,
}

/// Pure decision over the two modification timestamps. A missing local
/// timestamp counts as older than any remote one; equality favors no-op.
pub fn decide(
    remote_modified_at: Option<DateTime<Utc>>,
    local_modified_at: Option<DateTime<Utc>>,
) -> SyncAction {
    let Some(remote) = remote_modified_at else {
        return SyncAction::Upload;
    };
    match local_modified_at {
        Some(local) if local > remote => SyncAction::Upload,
        Some(local) if local == remote => SyncAction::Noop,
        _ => SyncAction::Download,
    }
}

/// Runs one auto-sync cycle at a time. Ticks arriving while a cycle is in
/// flight are skipped outright, not queued or canceled.
pub struct Syncer<'a> {
    store: &'a AppStore,
    remote: &'a dyn RemoteStore,
    password: Option<String>,
    in_flight: AtomicBool,
}

impl<'a> Syncer<'a> {
    pub fn new(store: &'a AppStore, remote: &'a dyn RemoteStore, password: Option<String>) -> Self {
        Self {
            store,
            remote,
            password,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn tick(&self) -> Result<SyncOutcome> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Ok(SyncOutcome::Skipped);
        }
        let result = self.run_cycle();
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    /// One full cycle: find the remote object, decide, act. Any transport
    /// or decrypt error aborts the cycle with local state untouched; the
    /// caller decides whether to retry.
    fn run_cycle(&self) -> Result<SyncOutcome> {
        let remote_obj = self.remote.find()?;
        let local = self.store.local_modified_at()?;

        match decide(remote_obj.as_ref().map(|o| o.modified_at), local) {
            SyncAction::Noop => Ok(SyncOutcome::Synced),
            SyncAction::Upload => {
                let content = match &self.password {
                    Some(p) => export_encrypted(self.store, p)?,
                    None => export_plain(self.store)?,
                };
                match remote_obj {
                    Some(o) => self.remote.update(&o.id, &content)?,
                    None => self.remote.create(&content)?,
                };
                self.store.set_local_modified_at(Utc::now())?;
                Ok(SyncOutcome::Uploaded)
            }
            SyncAction::Download => {
                // decide() only downloads when the remote object exists.
                let Some(o) = remote_obj else {
                    return Ok(SyncOutcome::Synced);
                };
                let content = self.remote.read_content(&o.id)?;
                import_from_string(self.store, &content, self.password.as_deref())?;
                self.store.set_local_modified_at(o.modified_at)?;
                Ok(SyncOutcome::Downloaded)
            }
        }
    }
}
