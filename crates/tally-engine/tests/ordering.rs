//! Ordering and loss-freedom of the bridge under concurrent producers.
//!
//! Every value is tagged with its producer and sequence number so a
//! snapshot can be checked per producer: nothing dropped, nothing
//! duplicated, and each producer's values in the order it sent them.
//! No assertion is made about interleaving across producers.

use std::collections::HashSet;
use std::time::Duration;

use proptest::prelude::*;
use tally_engine::{BridgeConfig, SyncBridge};
use tally_test_utils::{producer_values, spawn_producers, tagged};

fn start() -> SyncBridge<String> {
    SyncBridge::new(BridgeConfig::default()).unwrap()
}

#[test]
fn submit_submit_snapshot() {
    let bridge = start();
    bridge.submit("a".to_string()).unwrap();
    bridge.submit("b".to_string()).unwrap();
    assert_eq!(bridge.snapshot().unwrap().into_vec(), vec!["a", "b"]);
}

#[test]
fn snapshot_submit_snapshot() {
    let bridge = start();
    bridge.submit("a".to_string()).unwrap();
    assert_eq!(bridge.snapshot().unwrap().into_vec(), vec!["a"]);
    bridge.submit("c".to_string()).unwrap();
    assert_eq!(bridge.snapshot().unwrap().into_vec(), vec!["a", "c"]);
}

#[test]
fn no_loss_under_concurrency() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 500;

    let mut bridge = start();
    let handle = bridge.handle().unwrap();

    for p in spawn_producers(&handle, PRODUCERS, PER_PRODUCER) {
        p.join().unwrap().unwrap();
    }

    let snap = bridge.snapshot().unwrap();
    assert_eq!(snap.len(), PRODUCERS * PER_PRODUCER);
    assert_eq!(snap.appended(), (PRODUCERS * PER_PRODUCER) as u64);

    let distinct: HashSet<&String> = snap.iter().collect();
    assert_eq!(distinct.len(), snap.len(), "duplicate values in snapshot");

    for p in 0..PRODUCERS {
        let seqs = producer_values(&snap, p);
        let expected: Vec<usize> = (0..PER_PRODUCER).collect();
        assert_eq!(seqs, expected, "producer {p} out of order or incomplete");
    }

    let report = bridge.shutdown();
    let metrics = report.metrics.unwrap();
    assert_eq!(metrics.appends_processed, (PRODUCERS * PER_PRODUCER) as u64);
    assert_eq!(metrics.discarded_on_shutdown, 0);
}

#[test]
fn own_submit_visible_in_own_snapshot_while_others_write() {
    let bridge = start();
    let handle = bridge.handle().unwrap();
    let background = spawn_producers(&handle, 4, 1_000);

    for i in 0..50 {
        let marker = format!("marker-{i}");
        handle.submit(marker.clone()).unwrap();
        let snap = handle.snapshot().unwrap();
        assert!(snap.contains(&marker), "own submit {marker} missing");
    }

    for p in background {
        p.join().unwrap().unwrap();
    }
}

#[test]
fn earlier_snapshots_never_change_and_later_ones_extend_them() {
    let bridge = start();
    let handle = bridge.handle().unwrap();
    let producers = spawn_producers(&handle, 3, 400);

    let mut taken = Vec::new();
    for _ in 0..20 {
        taken.push(handle.snapshot().unwrap());
        std::thread::sleep(Duration::from_millis(1));
    }
    let frozen: Vec<Vec<String>> = taken.iter().map(|s| s.to_vec()).collect();

    for p in producers {
        p.join().unwrap().unwrap();
    }
    taken.push(handle.snapshot().unwrap());

    for (snap, copy) in taken.iter().zip(&frozen) {
        assert_eq!(snap.as_slice(), copy.as_slice());
    }

    for pair in taken.windows(2) {
        let (earlier, later) = (&pair[0], &pair[1]);
        assert!(earlier.appended() <= later.appended());
        // Append-only: the earlier snapshot is a prefix of the later one.
        assert_eq!(&later[..earlier.len()], earlier.as_slice());
        for p in 0..3 {
            let before = producer_values(earlier, p);
            let after = producer_values(later, p);
            assert_eq!(&after[..before.len()], before.as_slice());
        }
    }
}

#[test]
fn generic_values_are_supported() {
    let bridge: SyncBridge<u64> = SyncBridge::new(BridgeConfig::default()).unwrap();
    for v in [3, 1, 4, 1, 5] {
        bridge.submit(v).unwrap();
    }
    assert_eq!(bridge.snapshot().unwrap().into_vec(), vec![3, 1, 4, 1, 5]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn single_producer_sequence_is_reproduced(n in 0usize..200) {
        let bridge = start();
        for seq in 0..n {
            bridge.submit(tagged(0, seq)).unwrap();
        }
        let snap = bridge.snapshot().unwrap();
        prop_assert_eq!(snap.len(), n);
        prop_assert_eq!(producer_values(&snap, 0), (0..n).collect::<Vec<_>>());
    }
}
