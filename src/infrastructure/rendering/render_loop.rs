//! `requestAnimationFrame` loop that owns the WebGL2 frame driver.

use super::quad_renderer::QuadRenderer;
use crate::application::{FrameDriver, StatusSink};
use crate::domain::benchmark::{BenchConfig, BenchParams};
use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::domain::texture::{TextureDataGenerator, TextureUploader};
use crate::domain::timing::GpuTimer;
use crate::infrastructure::webgl::{WebGlTextures, WebGlTimerQueries, create_context};
use crate::{log_error, log_info};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlCanvasElement;

pub type WebGlFrameDriver<S> = FrameDriver<WebGlTimerQueries, WebGlTextures, QuadRenderer, S>;

type FrameCallback = Closure<dyn FnMut(f64)>;

thread_local! {
    static ACTIVE_LOOP: RefCell<Option<RenderLoop>> = const { RefCell::new(None) };
}

/// Handle to a running animation-frame loop. Stopping drops the frame
/// callback, and everything it owns, on the next scheduled frame.
pub struct RenderLoop {
    stopped: Rc<Cell<bool>>,
}

impl RenderLoop {
    /// Schedules `tick` every animation frame until it returns `false` or
    /// the loop is stopped.
    pub fn run<F>(mut tick: F) -> RenderingResult<Self>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let stopped = Rc::new(Cell::new(false));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let next = callback.clone();
        let stop_flag = stopped.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if stop_flag.get() || !tick(now) {
                stop_flag.set(true);
                // Breaks the Rc cycle; wasm-bindgen frees the closure once it returns.
                let _ = next.borrow_mut().take();
                return;
            }
            if let Some(cb) = next.borrow().as_ref() {
                if let Err(e) = request_frame(cb) {
                    log_error!(LogComponent::Infrastructure("RenderLoop"), "{}", e);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = callback.borrow().as_ref() {
            request_frame(cb)?;
        }
        Ok(Self { stopped })
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

fn request_frame(callback: &FrameCallback) -> RenderingResult<i32> {
    gloo::utils::window()
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| AppError::Platform(format!("requestAnimationFrame failed: {:?}", e)))
}

/// Builds the WebGL2 pipeline on `canvas` and starts ticking it. `params`
/// is read once per frame so UI changes apply on the next frame.
pub fn start_benchmark<S, P>(
    canvas: &HtmlCanvasElement,
    config: &BenchConfig,
    status: S,
    params: P,
) -> RenderingResult<()>
where
    S: StatusSink + 'static,
    P: Fn() -> BenchParams + 'static,
{
    canvas.set_width(config.canvas_width);
    canvas.set_height(config.canvas_height);
    let gl = create_context(canvas)?;

    let timer = GpuTimer::new(WebGlTimerQueries::detect(&gl), config.query_pool_size)?;
    let uploader = TextureUploader::new(
        WebGlTextures::new(gl.clone()),
        TextureDataGenerator::new(js_sys::Date::now() as u64),
    );
    let rasterizer = QuadRenderer::new(gl)?;
    let mut driver: WebGlFrameDriver<S> =
        FrameDriver::new(config, timer, uploader, rasterizer, status);

    let render_loop = RenderLoop::run(move |now| {
        let params = params();
        match driver.tick(&params, now) {
            Ok(_) => true,
            Err(error) => {
                log_error!(LogComponent::Infrastructure("RenderLoop"), "stopping: {}", error);
                driver.status_mut().show_error(&error);
                driver.shutdown();
                false
            }
        }
    })?;

    stop_benchmark();
    ACTIVE_LOOP.with(|active| *active.borrow_mut() = Some(render_loop));
    log_info!(LogComponent::Infrastructure("RenderLoop"), "benchmark started");
    Ok(())
}

/// Stops the running benchmark, if any.
pub fn stop_benchmark() -> bool {
    let previous = ACTIVE_LOOP.with(|active| active.borrow_mut().take());
    match previous {
        Some(render_loop) => {
            render_loop.stop();
            log_info!(LogComponent::Infrastructure("RenderLoop"), "benchmark stopped");
            true
        }
        None => false,
    }
}

pub fn is_benchmark_active() -> bool {
    ACTIVE_LOOP.with(|active| active.borrow().as_ref().is_some_and(|l| !l.is_stopped()))
}
