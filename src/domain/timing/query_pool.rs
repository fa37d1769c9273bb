//! Fixed-capacity pool of GPU timer queries.
//!
//! Phases are chained: `begin_phase(label)` ends whatever query is open,
//! files its result under `label`, and immediately opens the next query.
//! A phase therefore lasts from one boundary to the next, and the GPU only
//! ever has a single elapsed-time query in flight, which is what WebGL2
//! requires. Results are collected later by [`QueryPool::poll_results`],
//! which never waits on the device.

use super::MeasurementSink;
use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::{LogComponent, LogLevel, get_logger};
use crate::{log_debug, log_trace, log_warn};

/// Label given to the span closed by `end_frame`.
pub const FRAME_END_LABEL: &str = "frameEnd";

pub const DEFAULT_POOL_SIZE: usize = 16;

/// Structured context attached to the pool-exhaustion warning.
pub fn exhaustion_metadata(capacity: usize, frame: u64) -> String {
    serde_json::json!({ "capacity": capacity, "frame": frame }).to_string()
}

/// Raw timer-query operations of a graphics backend.
pub trait TimerQueryBackend {
    type Query;

    fn create_query(&mut self) -> RenderingResult<Self::Query>;
    fn delete_query(&mut self, query: Self::Query);
    fn begin_query(&mut self, query: &Self::Query);
    fn end_query(&mut self, query: &Self::Query);
    /// Push queued commands to the device so pending queries can resolve.
    fn flush(&mut self);
    fn result_available(&self, query: &Self::Query) -> bool;
    /// Elapsed device time in nanoseconds. Only valid once available.
    fn result_ns(&self, query: &Self::Query) -> f64;
    /// Returns and clears the "GPU clock was interrupted" flag.
    fn take_disjoint(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Free,
    /// Query begun, not yet ended
    Open,
    /// Query ended, result not read yet
    Pending,
}

#[derive(Debug)]
pub struct QuerySlot<Q> {
    handle: Q,
    state: SlotState,
    label: Option<String>,
    issued_at_frame: u64,
}

impl<Q> QuerySlot<Q> {
    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SlotState::Free
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn issued_at_frame(&self) -> u64 {
        self.issued_at_frame
    }
}

/// Index of an acquired slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct QueryPool<B: TimerQueryBackend> {
    backend: B,
    slots: Vec<QuerySlot<B::Query>>,
    open: Option<usize>,
    frame: u64,
}

impl<B: TimerQueryBackend> QueryPool<B> {
    /// Creates all `capacity` queries up front. Failing to create one is fatal.
    pub fn new(mut backend: B, capacity: usize) -> RenderingResult<Self> {
        if capacity == 0 {
            return Err(AppError::ValidationError(
                "query pool needs at least one slot".to_string(),
            ));
        }

        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(QuerySlot {
                handle: backend.create_query()?,
                state: SlotState::Free,
                label: None,
                issued_at_frame: 0,
            });
        }

        log_debug!(LogComponent::Gpu("QueryPool"), "created {} timer queries", capacity);
        Ok(Self { backend, slots, open: None, frame: 0 })
    }

    /// Marks the first free slot active and stamps it with the current frame.
    /// `None` means the phase goes unmeasured this frame.
    pub fn acquire_slot(&mut self) -> Option<SlotId> {
        let frame = self.frame;
        let capacity = self.slots.len();
        match self.slots.iter_mut().enumerate().find(|(_, slot)| slot.state == SlotState::Free) {
            Some((index, slot)) => {
                slot.state = SlotState::Open;
                slot.label = None;
                slot.issued_at_frame = frame;
                Some(SlotId(index))
            }
            None => {
                get_logger().log_with_metadata(
                    LogLevel::Warn,
                    LogComponent::Gpu("QueryPool"),
                    "all timer queries in flight, dropping measurement",
                    &exhaustion_metadata(capacity, frame),
                );
                None
            }
        }
    }

    /// Returns a slot to the free list without recording anything. A slot
    /// whose query is running has it ended first; its result is discarded
    /// when it resolves. Returns `false` if the slot was already free.
    pub fn release(&mut self, id: SlotId) -> bool {
        let SlotId(index) = id;
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        match slot.state {
            SlotState::Free => false,
            SlotState::Open if self.open == Some(index) => {
                self.open = None;
                self.backend.end_query(&slot.handle);
                slot.state = SlotState::Pending;
                slot.label = None;
                true
            }
            SlotState::Open => {
                slot.state = SlotState::Free;
                slot.label = None;
                true
            }
            // Already ended; dropping the label discards the result.
            SlotState::Pending => {
                slot.label = None;
                true
            }
        }
    }

    /// Starts a new frame and opens its first phase.
    pub fn begin_frame(&mut self) -> bool {
        self.frame += 1;
        self.close_open(FRAME_END_LABEL);
        self.open_next()
    }

    /// Closes the open phase under `label` and opens the next one.
    /// Returns whether the next phase is being measured.
    pub fn begin_phase(&mut self, label: &str) -> bool {
        self.close_open(label);
        self.open_next()
    }

    /// Closes the last phase of the frame under [`FRAME_END_LABEL`].
    pub fn end_frame(&mut self) -> bool {
        self.close_open(FRAME_END_LABEL)
    }

    fn close_open(&mut self, label: &str) -> bool {
        let Some(index) = self.open.take() else {
            return false;
        };
        let slot = &mut self.slots[index];
        self.backend.end_query(&slot.handle);
        slot.state = SlotState::Pending;
        slot.label = Some(label.to_string());
        true
    }

    fn open_next(&mut self) -> bool {
        let Some(SlotId(index)) = self.acquire_slot() else {
            return false;
        };
        self.backend.begin_query(&self.slots[index].handle);
        self.open = Some(index);
        true
    }

    /// Forwards every resolved, trustworthy result to `sink` and frees its
    /// slot. Unresolved queries are left for a later tick.
    pub fn poll_results(&mut self, sink: &mut impl MeasurementSink) -> usize {
        self.backend.flush();

        let ready: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                slot.state == SlotState::Pending && self.backend.result_available(&slot.handle)
            })
            .map(|(index, _)| index)
            .collect();
        if ready.is_empty() {
            return 0;
        }

        // Read after availability so the flag covers the results being consumed.
        let disjoint = self.backend.take_disjoint();
        if disjoint {
            log_debug!(
                LogComponent::Gpu("QueryPool"),
                "GPU clock disjoint, discarding {} results",
                ready.len()
            );
        }

        let mut forwarded = 0;
        for index in ready {
            let slot = &mut self.slots[index];
            slot.state = SlotState::Free;
            let Some(label) = slot.label.take() else {
                continue;
            };
            if disjoint {
                continue;
            }

            let elapsed_ms = self.backend.result_ns(&slot.handle) / 1_000_000.0;
            log_trace!(
                LogComponent::Gpu("QueryPool"),
                "{} took {:.3} ms (resolved after {} frames)",
                label,
                elapsed_ms,
                self.frame.saturating_sub(slot.issued_at_frame)
            );
            sink.record(&label, elapsed_ms);
            forwarded += 1;
        }
        forwarded
    }

    pub fn slots(&self) -> &[QuerySlot<B::Query>] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    pub fn free_count(&self) -> usize {
        self.capacity() - self.active_count()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Deletes every query. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(index) = self.open.take() {
            self.backend.end_query(&self.slots[index].handle);
        }
        let count = self.slots.len();
        for slot in self.slots.drain(..) {
            self.backend.delete_query(slot.handle);
        }
        if count > 0 {
            log_debug!(LogComponent::Gpu("QueryPool"), "deleted {} timer queries", count);
        }
    }
}

impl<B: TimerQueryBackend> Drop for QueryPool<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Timer-query capability: either a live pool or nothing at all. Every
/// operation on a disabled timer is a no-op so callers never branch on it.
pub enum GpuTimer<B: TimerQueryBackend> {
    Enabled(QueryPool<B>),
    Disabled,
}

impl<B: TimerQueryBackend> GpuTimer<B> {
    /// `backend` is `None` when the platform lacks timer queries.
    pub fn new(backend: Option<B>, capacity: usize) -> RenderingResult<Self> {
        match backend {
            Some(backend) => Ok(GpuTimer::Enabled(QueryPool::new(backend, capacity)?)),
            None => {
                log_warn!(
                    LogComponent::Gpu("GpuTimer"),
                    "timer queries unavailable, GPU timing disabled"
                );
                Ok(GpuTimer::Disabled)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, GpuTimer::Enabled(_))
    }

    pub fn pool(&self) -> Option<&QueryPool<B>> {
        match self {
            GpuTimer::Enabled(pool) => Some(pool),
            GpuTimer::Disabled => None,
        }
    }

    pub fn acquire_slot(&mut self) -> Option<SlotId> {
        match self {
            GpuTimer::Enabled(pool) => pool.acquire_slot(),
            GpuTimer::Disabled => None,
        }
    }

    pub fn release(&mut self, id: SlotId) -> bool {
        match self {
            GpuTimer::Enabled(pool) => pool.release(id),
            GpuTimer::Disabled => false,
        }
    }

    pub fn begin_frame(&mut self) -> bool {
        match self {
            GpuTimer::Enabled(pool) => pool.begin_frame(),
            GpuTimer::Disabled => false,
        }
    }

    pub fn begin_phase(&mut self, label: &str) -> bool {
        match self {
            GpuTimer::Enabled(pool) => pool.begin_phase(label),
            GpuTimer::Disabled => false,
        }
    }

    pub fn end_frame(&mut self) -> bool {
        match self {
            GpuTimer::Enabled(pool) => pool.end_frame(),
            GpuTimer::Disabled => false,
        }
    }

    pub fn poll_results(&mut self, sink: &mut impl MeasurementSink) -> usize {
        match self {
            GpuTimer::Enabled(pool) => pool.poll_results(sink),
            GpuTimer::Disabled => 0,
        }
    }

    pub fn active_count(&self) -> usize {
        self.pool().map_or(0, QueryPool::active_count)
    }

    pub fn capacity(&self) -> usize {
        self.pool().map_or(0, QueryPool::capacity)
    }

    pub fn destroy(&mut self) {
        if let GpuTimer::Enabled(pool) = self {
            pool.destroy();
        }
    }
}
