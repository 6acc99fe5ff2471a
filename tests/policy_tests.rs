// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::error::SyncError;
use billfold::models::Profile;
use billfold::store::AppStore;
use billfold::sync::{
    RemoteObject, RemoteStore, SyncAction, SyncOutcome, Syncer, decide, export_plain,
};
use chrono::{DateTime, TimeZone, Utc};
use std::cell::{Cell, RefCell};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
}

#[derive(Default)]
struct FakeRemote {
    object: RefCell<Option<(String, DateTime<Utc>)>>,
    creates: Cell<usize>,
    updates: Cell<usize>,
    reads: Cell<usize>,
    fail_reads: bool,
}

impl FakeRemote {
    fn with_object(content: &str, modified_at: DateTime<Utc>) -> Self {
        Self {
            object: RefCell::new(Some((content.to_string(), modified_at))),
            ..Self::default()
        }
    }
}

impl RemoteStore for FakeRemote {
    fn find(&self) -> Result<Option<RemoteObject>, SyncError> {
        Ok(self.object.borrow().as_ref().map(|(_, ts)| RemoteObject {
            id: "remote-object".to_string(),
            modified_at: *ts,
        }))
    }

    fn create(&self, content: &str) -> Result<String, SyncError> {
        self.creates.set(self.creates.get() + 1);
        *self.object.borrow_mut() = Some((content.to_string(), Utc::now()));
        Ok("remote-object".to_string())
    }

    fn update(&self, object_id: &str, content: &str) -> Result<String, SyncError> {
        self.updates.set(self.updates.get() + 1);
        *self.object.borrow_mut() = Some((content.to_string(), Utc::now()));
        Ok(object_id.to_string())
    }

    fn read_content(&self, _object_id: &str) -> Result<String, SyncError> {
        self.reads.set(self.reads.get() + 1);
        if self.fail_reads {
            return Err(SyncError::Transport("connection reset".to_string()));
        }
        Ok(self.object.borrow().as_ref().unwrap().0.clone())
    }
}

#[test]
fn decision_table() {
    // (remoteExists, local, remote) -> action
    assert_eq!(decide(None, None), SyncAction::Upload);
    assert_eq!(decide(None, Some(at(10))), SyncAction::Upload);
    assert_eq!(decide(Some(at(9)), Some(at(10))), SyncAction::Upload);
    assert_eq!(decide(Some(at(10)), Some(at(9))), SyncAction::Download);
    assert_eq!(decide(Some(at(10)), Some(at(10))), SyncAction::Noop);
    // No local timestamp yet counts as older than any remote.
    assert_eq!(decide(Some(at(10)), None), SyncAction::Download);
}

#[test]
fn missing_remote_uploads() {
    let store = AppStore::in_memory();
    store
        .set_profiles(&[Profile {
            id: "p1".into(),
            name: "default".into(),
        }])
        .unwrap();
    let remote = FakeRemote::default();

    let syncer = Syncer::new(&store, &remote, None);
    assert_eq!(syncer.tick().unwrap(), SyncOutcome::Uploaded);
    assert_eq!(remote.creates.get(), 1);
    assert_eq!(remote.updates.get(), 0);
    assert!(store.local_modified_at().unwrap().is_some());
    let (content, _) = remote.object.borrow().clone().unwrap();
    assert!(content.contains("\"profiles\""));
}

#[test]
fn newer_local_uploads_over_remote() {
    let store = AppStore::in_memory();
    store.set_local_modified_at(at(10)).unwrap();
    let remote = FakeRemote::with_object("{}", at(9));

    let syncer = Syncer::new(&store, &remote, None);
    assert_eq!(syncer.tick().unwrap(), SyncOutcome::Uploaded);
    assert_eq!(remote.updates.get(), 1);
    assert_eq!(remote.reads.get(), 0);
}

#[test]
fn newer_remote_downloads_and_applies() {
    let source = AppStore::in_memory();
    source
        .set_profiles(&[Profile {
            id: "p9".into(),
            name: "from-cloud".into(),
        }])
        .unwrap();
    let content = export_plain(&source).unwrap();

    let store = AppStore::in_memory();
    store.set_local_modified_at(at(9)).unwrap();
    let remote = FakeRemote::with_object(&content, at(10));

    let syncer = Syncer::new(&store, &remote, None);
    assert_eq!(syncer.tick().unwrap(), SyncOutcome::Downloaded);
    assert_eq!(remote.reads.get(), 1);
    assert_eq!(store.profiles().unwrap()[0].name, "from-cloud");
    // The local cursor now mirrors the remote's modification time.
    assert_eq!(store.local_modified_at().unwrap(), Some(at(10)));
}

#[test]
fn equal_timestamps_are_synced_with_no_transfer() {
    let store = AppStore::in_memory();
    store.set_local_modified_at(at(10)).unwrap();
    let remote = FakeRemote::with_object("{}", at(10));

    let syncer = Syncer::new(&store, &remote, None);
    assert_eq!(syncer.tick().unwrap(), SyncOutcome::Synced);
    assert_eq!(remote.creates.get(), 0);
    assert_eq!(remote.updates.get(), 0);
    assert_eq!(remote.reads.get(), 0);
}

#[test]
fn transport_failure_aborts_and_leaves_state_untouched() {
    let store = AppStore::in_memory();
    store.set_local_modified_at(at(9)).unwrap();
    let remote = FakeRemote {
        fail_reads: true,
        ..FakeRemote::with_object("{}", at(10))
    };

    let syncer = Syncer::new(&store, &remote, None);
    let err = syncer.tick().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::Transport(_))
    ));
    assert!(store.profiles().unwrap().is_empty());
    assert_eq!(store.local_modified_at().unwrap(), Some(at(9)));
}

#[test]
fn encrypted_cycle_roundtrips_through_the_remote() {
    let store = AppStore::in_memory();
    store
        .set_profiles(&[Profile {
            id: "p1".into(),
            name: "default".into(),
        }])
        .unwrap();
    let remote = FakeRemote::default();

    let syncer = Syncer::new(&store, &remote, Some("hunter2".to_string()));
    assert_eq!(syncer.tick().unwrap(), SyncOutcome::Uploaded);
    let (content, ts) = remote.object.borrow().clone().unwrap();
    assert!(content.contains("\"encrypted\": true"));
    assert!(!content.contains("default"));

    // A second device with an older cursor pulls and decrypts it.
    let other = AppStore::in_memory();
    other.set_local_modified_at(ts - chrono::Duration::hours(1)).unwrap();
    let syncer2 = Syncer::new(&other, &remote, Some("hunter2".to_string()));
    assert_eq!(syncer2.tick().unwrap(), SyncOutcome::Downloaded);
    assert_eq!(other.profiles().unwrap()[0].name, "default");
}
