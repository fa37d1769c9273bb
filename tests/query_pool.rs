mod common;

use common::{MockQueries, journal};
use quickcheck_macros::quickcheck;
use texture_upload_bench::domain::timing::{
    FRAME_END_LABEL, GpuTimer, MeasurementAggregator, QueryPool, SlotState, UPLOAD_LABEL,
};

fn pool(capacity: usize) -> (QueryPool<MockQueries>, MockQueries) {
    let backend = MockQueries::new(&journal());
    let pool = QueryPool::new(backend.clone(), capacity).expect("pool");
    (pool, backend)
}

#[quickcheck]
fn acquisition_within_capacity_always_succeeds(capacity: u8, requests: u8) -> bool {
    let capacity = capacity as usize % 32 + 1;
    let requests = requests as usize % (capacity + 1);
    let (mut pool, _) = pool(capacity);
    (0..requests).all(|_| pool.acquire_slot().is_some()) && pool.active_count() == requests
}

#[quickcheck]
fn acquisition_past_capacity_leaves_slots_untouched(capacity: u8) -> bool {
    let capacity = capacity as usize % 32 + 1;
    let (mut pool, _) = pool(capacity);
    for _ in 0..capacity {
        pool.acquire_slot();
    }
    let before: Vec<(SlotState, u64)> =
        pool.slots().iter().map(|slot| (slot.state(), slot.issued_at_frame())).collect();

    let overflow = pool.acquire_slot();

    let after: Vec<(SlotState, u64)> =
        pool.slots().iter().map(|slot| (slot.state(), slot.issued_at_frame())).collect();
    overflow.is_none() && before == after && pool.active_count() == capacity
}

#[test]
fn twenty_phases_on_eight_slots_leave_eight_active() {
    let (mut pool, _) = pool(8);
    let failed = (0..20).filter(|i| !pool.begin_phase(&format!("phase{}", i))).count();
    assert_eq!(failed, 12);
    assert_eq!(pool.active_count(), 8);
    assert_eq!(pool.free_count(), 0);
}

#[test]
fn directly_acquired_slot_returns_to_free_on_release() {
    let (mut pool, backend) = pool(2);
    let mut aggregator = MeasurementAggregator::new(4);

    let slot = pool.acquire_slot().expect("free slot");
    assert_eq!(pool.slots()[slot.index()].state(), SlotState::Open);
    assert!(pool.release(slot));
    assert_eq!(pool.slots()[slot.index()].state(), SlotState::Free);
    assert!(!pool.release(slot), "second release is a no-op");

    for _ in 0..6 {
        pool.begin_frame();
        pool.end_frame();
        backend.state.borrow_mut().resolve_ended(1_000_000.0);
        pool.poll_results(&mut aggregator);
    }
    assert_eq!(pool.active_count(), 0);
    assert!(pool.slots().iter().all(|slot| slot.state() == SlotState::Free));
}

#[test]
fn slots_are_reused_once_results_are_consumed() {
    let (mut pool, backend) = pool(2);
    let mut aggregator = MeasurementAggregator::new(4);

    pool.begin_frame();
    pool.begin_phase(UPLOAD_LABEL);
    pool.end_frame();
    assert_eq!(pool.active_count(), 2);
    assert!(!pool.begin_frame(), "pool is exhausted");

    backend.state.borrow_mut().resolve_ended(2_000_000.0);
    assert_eq!(pool.poll_results(&mut aggregator), 2);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(aggregator.sample_count(UPLOAD_LABEL), 1);
    assert_eq!(aggregator.sample_count(FRAME_END_LABEL), 1);
    assert!(pool.begin_frame());
}

#[test]
fn disjoint_results_are_never_recorded() {
    let (mut pool, backend) = pool(4);
    let mut aggregator = MeasurementAggregator::new(10);

    pool.begin_frame();
    pool.begin_phase(UPLOAD_LABEL);
    pool.end_frame();
    {
        let mut state = backend.state.borrow_mut();
        state.resolve_ended(5_000_000.0);
        state.disjoint = true;
    }

    assert_eq!(pool.poll_results(&mut aggregator), 0);
    assert_eq!(aggregator.sample_count(UPLOAD_LABEL), 0);
    assert_eq!(aggregator.average(UPLOAD_LABEL), 0.0);
    assert_eq!(pool.active_count(), 0, "discarded slots are freed");
}

#[test]
fn disjoint_flag_is_not_consumed_while_nothing_is_ready() {
    let (mut pool, backend) = pool(4);
    let mut aggregator = MeasurementAggregator::new(10);

    pool.begin_frame();
    pool.begin_phase(UPLOAD_LABEL);
    backend.state.borrow_mut().disjoint = true;
    assert_eq!(pool.poll_results(&mut aggregator), 0);
    assert!(backend.state.borrow().disjoint);

    backend.state.borrow_mut().resolve_ended(1_000_000.0);
    assert_eq!(pool.poll_results(&mut aggregator), 0);
    assert!(!backend.state.borrow().disjoint);
    assert_eq!(aggregator.sample_count(UPLOAD_LABEL), 0);
}

#[test]
fn destroy_deletes_every_query() {
    let (mut pool, backend) = pool(3);
    pool.begin_frame();
    pool.destroy();
    pool.destroy();
    assert_eq!(backend.state.borrow().deleted.len(), 3);
    assert_eq!(pool.capacity(), 0);
}

#[test]
fn missing_extension_degrades_to_no_ops() {
    let mut timer: GpuTimer<MockQueries> = GpuTimer::new(None, 16).expect("timer");
    let mut aggregator = MeasurementAggregator::new(10);

    assert!(!timer.is_enabled());
    assert!(timer.acquire_slot().is_none());
    assert!(!timer.begin_frame());
    assert!(!timer.begin_phase(UPLOAD_LABEL));
    assert!(!timer.end_frame());
    assert_eq!(timer.poll_results(&mut aggregator), 0);
    assert_eq!(timer.active_count(), 0);
    timer.destroy();
}
