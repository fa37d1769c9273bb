pub mod config;
pub mod report;
pub mod stats;

pub use config::{
    BenchConfig, BenchParams, MAX_UPLOAD_FREQUENCY, MIN_UPLOAD_FREQUENCY, ShaderVariant,
    TextureSize,
};
pub use report::{StatusReport, upload_rate_mb};
pub use stats::{DisplayThrottle, FrameStats};
