use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::domain::timing::TimerQueryBackend;
use crate::log_info;
use web_sys::{WebGl2RenderingContext as Gl, WebGlQuery};

pub const EXTENSION_NAME: &str = "EXT_disjoint_timer_query_webgl2";
/// `TIME_ELAPSED_EXT` query target
pub const TIME_ELAPSED_EXT: u32 = 0x88BF;
/// `GPU_DISJOINT_EXT` context parameter
pub const GPU_DISJOINT_EXT: u32 = 0x8FBB;

/// Elapsed-time queries through `EXT_disjoint_timer_query_webgl2`.
pub struct WebGlTimerQueries {
    gl: Gl,
}

impl WebGlTimerQueries {
    /// `None` when the browser does not expose the extension, which is the
    /// common case without a flag or on privacy-hardened profiles.
    pub fn detect(gl: &Gl) -> Option<Self> {
        match gl.get_extension(EXTENSION_NAME) {
            Ok(Some(_)) => {
                log_info!(LogComponent::Gpu("TimerQueries"), "{} enabled", EXTENSION_NAME);
                Some(Self { gl: gl.clone() })
            }
            _ => None,
        }
    }
}

impl TimerQueryBackend for WebGlTimerQueries {
    type Query = WebGlQuery;

    fn create_query(&mut self) -> RenderingResult<WebGlQuery> {
        self.gl
            .create_query()
            .ok_or_else(|| AppError::ResourceCreation("Failed to create timer query".to_string()))
    }

    fn delete_query(&mut self, query: WebGlQuery) {
        self.gl.delete_query(Some(&query));
    }

    fn begin_query(&mut self, query: &WebGlQuery) {
        self.gl.begin_query(TIME_ELAPSED_EXT, query);
    }

    fn end_query(&mut self, _query: &WebGlQuery) {
        self.gl.end_query(TIME_ELAPSED_EXT);
    }

    fn flush(&mut self) {
        self.gl.flush();
    }

    fn result_available(&self, query: &WebGlQuery) -> bool {
        self.gl.get_query_parameter(query, Gl::QUERY_RESULT_AVAILABLE).as_bool().unwrap_or(false)
    }

    fn result_ns(&self, query: &WebGlQuery) -> f64 {
        self.gl.get_query_parameter(query, Gl::QUERY_RESULT).as_f64().unwrap_or(0.0)
    }

    fn take_disjoint(&mut self) -> bool {
        self.gl
            .get_parameter(GPU_DISJOINT_EXT)
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }
}
