pub mod gpu_structures;
pub mod quad_renderer;
pub mod render_loop;
pub mod shaders;

pub use gpu_structures::{FULL_SCREEN_QUAD, QuadVertex};
pub use quad_renderer::QuadRenderer;
pub use render_loop::{RenderLoop, is_benchmark_active, start_benchmark, stop_benchmark};
