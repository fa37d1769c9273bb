pub mod context;
pub mod textures;
pub mod timer_queries;

pub use context::{canvas_by_id, create_buffer, create_context, create_program, create_shader};
pub use textures::WebGlTextures;
pub use timer_queries::WebGlTimerQueries;
