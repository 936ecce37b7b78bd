// Persistence round-trips through the file store, including the fallback
// paths the timer relies on at startup.

use cubik::session::{Session, Transition};
use cubik::store::{FileTimeStore, TimeStore};
use cubik::time_log::TimeLog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[test]
fn recorded_session_survives_a_restart() {
    let dir = tempdir().unwrap();
    let store = FileTimeStore::with_path(dir.path().join("times.json"));

    // first run: record three solves and persist after each
    let mut session = Session::with_rng(store.load(), StdRng::seed_from_u64(7));
    let mut now = Instant::now();
    for ms in [11_370, 9_840, 12_050] {
        session.on_hold_start(now);
        session.on_hold_end(now);
        now += Duration::from_millis(ms);
        assert!(matches!(
            session.on_hold_start(now),
            Transition::Completed(_)
        ));
        session.on_hold_end(now);
        store.save(&session.log).unwrap();
        now += Duration::from_secs(15);
    }

    // second run: the log comes back in the same order
    let restored = store.load();
    assert_eq!(restored.snapshot(), &[11_370, 9_840, 12_050]);

    let session = Session::with_rng(restored, StdRng::seed_from_u64(8));
    assert_eq!(session.log.len(), 3);
}

#[test]
fn snapshot_serializes_as_a_plain_json_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("times.json");
    let store = FileTimeStore::with_path(&path);

    store.save(&TimeLog::from(vec![500, 1000, 1500])).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<u64> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, vec![500, 1000, 1500]);
}

#[test]
fn startup_tolerates_a_corrupt_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("times.json");

    for garbage in [
        &b"...."[..],
        &b"{\"times\": [1,2,3]}"[..],
        &b"[1000, \"fast\"]"[..],
        &b"[-1]"[..],
        &b""[..],
    ] {
        std::fs::write(&path, garbage).unwrap();
        let store = FileTimeStore::with_path(&path);
        assert_eq!(store.load(), TimeLog::new(), "garbage: {:?}", garbage);
    }
}

#[test]
fn wipe_then_load_is_an_empty_log() {
    let dir = tempdir().unwrap();
    let store = FileTimeStore::with_path(dir.path().join("times.json"));

    store.save(&TimeLog::from(vec![1000, 2000])).unwrap();
    store.wipe().unwrap();

    assert_eq!(store.load(), TimeLog::new());

    // wipe is safe to repeat
    store.wipe().unwrap();
}
