//! GPU phase timing: the query pool that issues timer queries and the
//! aggregator their results are folded into.

pub mod aggregator;
pub mod query_pool;

pub use aggregator::{DEFAULT_WINDOW, MeasurementAggregator};
pub use query_pool::{
    DEFAULT_POOL_SIZE, FRAME_END_LABEL, GpuTimer, QueryPool, QuerySlot, SlotId, SlotState,
    TimerQueryBackend,
};

/// Phase boundary recorded after the texture uploads of a frame.
pub const UPLOAD_LABEL: &str = "upload";
/// Phase boundary recorded after the draw call.
pub const RENDER_LABEL: &str = "render";

/// Receiver of resolved phase durations.
pub trait MeasurementSink {
    fn record(&mut self, label: &str, value_ms: f64);
}
