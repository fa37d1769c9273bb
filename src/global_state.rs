use crate::domain::benchmark::{BenchParams, ShaderVariant, StatusReport, TextureSize};
use leptos::*;
use std::sync::OnceLock;

pub struct Globals {
    pub texture_size: RwSignal<TextureSize>,
    pub upload_frequency: RwSignal<u32>,
    pub running: RwSignal<bool>,
    pub use_mipmaps: RwSignal<bool>,
    pub shader: RwSignal<ShaderVariant>,
    pub status_lines: RwSignal<Vec<String>>,
    pub last_report: RwSignal<Option<StatusReport>>,
    pub fatal_error: RwSignal<Option<String>>,
}

static GLOBALS: OnceLock<Globals> = OnceLock::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| {
        let defaults = BenchParams::default();
        Globals {
            texture_size: create_rw_signal(defaults.texture_size),
            upload_frequency: create_rw_signal(defaults.upload_frequency),
            running: create_rw_signal(defaults.running),
            use_mipmaps: create_rw_signal(defaults.use_mipmaps),
            shader: create_rw_signal(defaults.shader),
            status_lines: create_rw_signal(vec!["Initializing...".to_string()]),
            last_report: create_rw_signal(None),
            fatal_error: create_rw_signal(None),
        }
    })
}

crate::global_signals! {
    pub texture_size_signal => texture_size: TextureSize,
    pub upload_frequency_signal => upload_frequency: u32,
    pub running_signal => running: bool,
    pub use_mipmaps_signal => use_mipmaps: bool,
    pub shader_signal => shader: ShaderVariant,
    pub status_lines_signal => status_lines: Vec<String>,
    pub last_report_signal => last_report: Option<StatusReport>,
    pub fatal_error_signal => fatal_error: Option<String>,
}

/// Snapshot of the runtime parameters without subscribing to them.
pub fn current_params() -> BenchParams {
    let globals = globals();
    BenchParams {
        texture_size: globals.texture_size.get_untracked(),
        upload_frequency: globals.upload_frequency.get_untracked(),
        running: globals.running.get_untracked(),
        use_mipmaps: globals.use_mipmaps.get_untracked(),
        shader: globals.shader.get_untracked(),
    }
}

/// Applies every field of `params` to the signals.
pub fn apply_params(params: &BenchParams) {
    let globals = globals();
    globals.texture_size.set(params.texture_size);
    globals.upload_frequency.set(params.upload_frequency);
    globals.running.set(params.running);
    globals.use_mipmaps.set(params.use_mipmaps);
    globals.shader.set(params.shader);
}
