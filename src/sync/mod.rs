// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod envelope;
pub mod merge;
pub mod policy;
pub mod snapshot;
pub mod transport;

pub use envelope::{ImportOutcome, export_encrypted, export_plain, import_from_string};
pub use merge::{MergeStats, merge_from_string, replace_import_profile};
pub use policy::{SyncAction, SyncOutcome, Syncer, decide};
pub use snapshot::{apply_snapshot, build_snapshot};
pub use transport::{HttpObjectStore, RemoteObject, RemoteStore, SYNC_FILE_NAME};
