//! Per-frame orchestration of uploads, drawing and GPU timing.

use crate::domain::benchmark::{
    BenchConfig, BenchParams, DisplayThrottle, FrameStats, ShaderVariant, StatusReport,
};
use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::domain::texture::{TextureBackend, TextureResource, TextureUploader};
use crate::domain::timing::{
    GpuTimer, MeasurementAggregator, RENDER_LABEL, TimerQueryBackend, UPLOAD_LABEL,
};
use crate::log_info;

/// Draws the benchmark quad with the uploaded texture.
pub trait Rasterizer {
    type Texture;

    fn draw(&mut self, shader: ShaderVariant, texture: &Self::Texture) -> RenderingResult<()>;
}

/// Receives the periodic status report.
pub trait StatusSink {
    fn show(&mut self, report: &StatusReport);

    /// Called once when the loop stops on a fatal error.
    fn show_error(&mut self, _error: &AppError) {}
}

pub struct FrameDriver<Q, X, R, S>
where
    Q: TimerQueryBackend,
    X: TextureBackend,
    R: Rasterizer<Texture = X::Texture>,
    S: StatusSink,
{
    timer: GpuTimer<Q>,
    uploader: TextureUploader<X>,
    texture: Option<TextureResource<X::Texture>>,
    rasterizer: R,
    status: S,
    aggregator: MeasurementAggregator,
    stats: FrameStats,
    throttle: DisplayThrottle,
}

impl<Q, X, R, S> FrameDriver<Q, X, R, S>
where
    Q: TimerQueryBackend,
    X: TextureBackend,
    R: Rasterizer<Texture = X::Texture>,
    S: StatusSink,
{
    pub fn new(
        config: &BenchConfig,
        timer: GpuTimer<Q>,
        uploader: TextureUploader<X>,
        rasterizer: R,
        status: S,
    ) -> Self {
        Self {
            timer,
            uploader,
            texture: None,
            rasterizer,
            status,
            aggregator: MeasurementAggregator::new(config.measurement_window),
            stats: FrameStats::new(),
            throttle: DisplayThrottle::new(config.display_interval_ms),
        }
    }

    /// Runs one frame. A paused benchmark does nothing and returns `false`;
    /// the caller keeps scheduling ticks either way.
    pub fn tick(&mut self, params: &BenchParams, now_ms: f64) -> RenderingResult<bool> {
        if !params.running {
            return Ok(false);
        }

        self.timer.poll_results(&mut self.aggregator);

        self.stats.begin_frame(now_ms);
        self.timer.begin_frame();

        let size = params.texture_size.texels();
        for _ in 0..params.upload_frequency {
            let texture = self.uploader.upload(self.texture.take(), size, params.use_mipmaps)?;
            self.texture = Some(texture);
        }
        self.timer.begin_phase(UPLOAD_LABEL);

        if let Some(texture) = &self.texture {
            self.rasterizer.draw(params.shader, texture.handle())?;
        }
        self.timer.begin_phase(RENDER_LABEL);

        if self.throttle.should_update(now_ms) {
            let report = self.report(params);
            self.status.show(&report);
            self.throttle.mark_updated(now_ms);
        }

        self.timer.end_frame();
        self.aggregator.advance_frame();
        self.stats.end_frame();
        Ok(true)
    }

    pub fn report(&self, params: &BenchParams) -> StatusReport {
        StatusReport::new(
            self.stats.frame_count(),
            params.texture_size.texels(),
            params.upload_frequency,
            self.stats.average_fps(),
            self.timer.is_enabled(),
            self.aggregator.snapshot(),
        )
    }

    /// Releases the texture and every timer query. Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(texture) = self.texture.take() {
            self.uploader.release(texture);
            log_info!(LogComponent::Application("FrameDriver"), "benchmark resources released");
        }
        self.timer.destroy();
    }

    pub fn timer(&self) -> &GpuTimer<Q> {
        &self.timer
    }

    pub fn aggregator(&self) -> &MeasurementAggregator {
        &self.aggregator
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn texture(&self) -> Option<&TextureResource<X::Texture>> {
        self.texture.as_ref()
    }

    pub fn uploader(&self) -> &TextureUploader<X> {
        &self.uploader
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut S {
        &mut self.status
    }
}

impl<Q, X, R, S> Drop for FrameDriver<Q, X, R, S>
where
    Q: TimerQueryBackend,
    X: TextureBackend,
    R: Rasterizer<Texture = X::Texture>,
    S: StatusSink,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
