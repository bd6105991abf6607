//! End-to-end flows through the library: bury, restart, reconcile.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use nbury::bury::{BuryOutcome, SECONDS_PER_DAY, bury_selected};
use nbury::host::{MemoryScheduler, ScriptedHost};
use nbury::reconcile::{LifecycleEvent, Reconciler};
use nbury::store::BuryStore;

const T: i64 = 1_700_000_000;

fn rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

#[test]
fn bury_then_reconcile_across_a_restart() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("bury.db");

    // Bury cards 1-3 for a fixed three days at time T.
    {
        let mut store = BuryStore::open(&db_path).unwrap();
        let mut scheduler = MemoryScheduler::new();
        let mut host = ScriptedHost::new(vec![1, 2, 3]).answer("3");

        let outcome =
            bury_selected(&mut store, &mut scheduler, &mut host, T, &mut rng()).unwrap();
        assert!(matches!(outcome, BuryOutcome::Buried { cards: 3, .. }));

        for card in [1, 2, 3] {
            assert_eq!(
                store.get(card).unwrap().unwrap().until,
                T + 3 * SECONDS_PER_DAY
            );
        }
    }

    // Restart: fresh store handle, fresh (empty) scheduler. One day in,
    // every record is still active and gets re-asserted.
    {
        let store = BuryStore::open(&db_path).unwrap();
        let mut scheduler = MemoryScheduler::new();

        let report = Reconciler::new(&store)
            .with_sweep_chance(0)
            .run(
                LifecycleEvent::Startup,
                &mut scheduler,
                T + SECONDS_PER_DAY,
                &mut rng(),
            )
            .unwrap();

        assert_eq!((report.attempted, report.changed), (3, 3));
        assert!(scheduler.is_buried(1) && scheduler.is_buried(2) && scheduler.is_buried(3));
    }

    // Four days in, everything has expired; nothing is asserted.
    {
        let store = BuryStore::open(&db_path).unwrap();
        let mut scheduler = MemoryScheduler::new();

        let report = Reconciler::new(&store)
            .with_sweep_chance(0)
            .run(
                LifecycleEvent::Startup,
                &mut scheduler,
                T + 4 * SECONDS_PER_DAY,
                &mut rng(),
            )
            .unwrap();

        assert_eq!(report.attempted, 0);
        assert_eq!(scheduler.buried_count(), 0);
    }
}

#[test]
fn crash_between_store_write_and_scheduler_call_self_heals() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("bury.db");

    // Simulate the crash: records landed durably, the scheduler call never
    // happened this session.
    {
        let mut store = BuryStore::open(&db_path).unwrap();
        store
            .upsert_many(&[(10, T + 5 * SECONDS_PER_DAY), (11, T + 5 * SECONDS_PER_DAY)])
            .unwrap();
    }

    // The next reconcile pass re-asserts them on the live scheduler.
    let store = BuryStore::open(&db_path).unwrap();
    let mut scheduler = MemoryScheduler::new();
    let mut host = ScriptedHost::new(vec![]);

    let report = Reconciler::new(&store)
        .with_sweep_chance(0)
        .run_notified(
            LifecycleEvent::SyncDidFinish,
            &mut scheduler,
            &mut host,
            T,
            &mut rng(),
        )
        .unwrap();

    assert_eq!((report.attempted, report.changed), (2, 2));
    assert!(scheduler.is_buried(10) && scheduler.is_buried(11));
    assert_eq!(host.notices, vec!["Re-buried 2 cards."]);
}

#[test]
fn degenerate_range_bury_behaves_like_fixed_across_restart() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("bury.db");

    {
        let mut store = BuryStore::open(&db_path).unwrap();
        let mut scheduler = MemoryScheduler::new();
        let mut host = ScriptedHost::new(vec![7]).answer("2-2");
        bury_selected(&mut store, &mut scheduler, &mut host, T, &mut rng()).unwrap();
    }

    let store = BuryStore::open(&db_path).unwrap();
    assert_eq!(
        store.get(7).unwrap().unwrap().until,
        T + 2 * SECONDS_PER_DAY
    );

    // Active one day in, gone from the active set at day three.
    assert_eq!(store.select_active(T + SECONDS_PER_DAY).unwrap(), vec![7]);
    assert!(
        store
            .select_active(T + 3 * SECONDS_PER_DAY)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn every_lifecycle_event_triggers_the_same_pass() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("bury.db");

    let mut store = BuryStore::open(&db_path).unwrap();
    store.upsert_many(&[(1, T + SECONDS_PER_DAY)]).unwrap();

    for event in [
        LifecycleEvent::Startup,
        LifecycleEvent::SyncWillStart,
        LifecycleEvent::SyncDidFinish,
    ] {
        let mut scheduler = MemoryScheduler::new();
        let report = Reconciler::new(&store)
            .with_sweep_chance(0)
            .run(event, &mut scheduler, T, &mut rng())
            .unwrap();
        assert_eq!((report.attempted, report.changed), (1, 1), "{event:?}");
    }
}
