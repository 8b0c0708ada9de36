//! Multi-threaded tests for Registry.
//!
//! These race writers and readers against shared records to verify that
//! contributions are never lost and readers never observe a torn record.

use std::sync::{Arc, Barrier};
use std::thread;

use livelibs_registry::{RegisterOptions, Registry};

const ADDR: &str = "0xcd2a3d9f938e13cd947ec05abc7fe734df8dd826";

/// Test: many threads contributing to one record → no increment is lost.
#[test]
fn test_concurrent_contributions_sum_exactly() {
    let registry = Registry::new();
    registry
        .register(
            "xyz",
            "30.1.2",
            ADDR,
            "[]",
            RegisterOptions::default().with_threshold_wei(8 * 1000),
        )
        .unwrap();

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..1000 {
                    registry.contribute_to("xyz", "30.1.2", 1).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let info = registry.get("xyz", None).unwrap();
    assert_eq!(info.total_value, 8000);
}

/// Test: readers racing re-registrations only ever see one complete payload.
#[test]
fn test_reader_never_sees_torn_record() {
    let registry = Registry::new();
    registry
        .register("foo", "1.0.0", "0xa", "[a]", RegisterOptions::default())
        .unwrap();

    let writer = {
        let registry = registry.clone();
        thread::spawn(move || {
            for i in 0..500 {
                let (addr, abi) = if i % 2 == 0 {
                    ("0xb", "[b]")
                } else {
                    ("0xa", "[a]")
                };
                registry
                    .register("foo", "1.0.0", addr, abi, RegisterOptions::default())
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let info = registry.get("foo", Some("1.0.0")).unwrap();
                    let expected_abi = if info.address == "0xa" { "[a]" } else { "[b]" };
                    assert_eq!(info.abi, expected_abi, "torn record: {info:?}");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
}

/// Test: contributions to different records proceed independently.
#[test]
fn test_disjoint_records_do_not_interfere() {
    let registry = Registry::new();
    for name in ["a", "b", "c", "d"] {
        registry
            .register(
                name,
                "1.0.0",
                ADDR,
                "[]",
                RegisterOptions::default().with_threshold_wei(500),
            )
            .unwrap();
    }

    let handles: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    registry.contribute_to(name, "1.0.0", 1).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    for name in ["a", "b", "c", "d"] {
        let info = registry.get(name, None).unwrap();
        assert_eq!(info.total_value, 500, "{name}");
    }
}

/// Test: a contribution racing a re-registration is either wiped by the reset
/// or applied on top of it; never applied to a half-replaced record.
#[test]
fn test_contribution_racing_reregister() {
    for _ in 0..50 {
        let registry = Registry::new();
        let opts = RegisterOptions::default().with_threshold_wei(10);
        registry
            .register("xyz", "1.0.0", ADDR, "[]", opts.clone())
            .unwrap();

        let r1 = registry.clone();
        let o1 = opts.clone();
        let h1 = thread::spawn(move || r1.register("xyz", "1.0.0", ADDR, "[]", o1));
        let r2 = registry.clone();
        let h2 = thread::spawn(move || r2.contribute_to("xyz", "1.0.0", 10));

        h1.join().unwrap().unwrap();
        h2.join().unwrap().unwrap();

        let status = registry.funding("xyz", "1.0.0").unwrap();
        assert!(
            status.total_value == 0 || status.total_value == 10,
            "unexpected total {}",
            status.total_value
        );
        assert_eq!(status.threshold_wei, 10);
    }
}
