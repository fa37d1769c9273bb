use super::gpu_structures::{QuadVertex, quad_bytes};
use super::shaders::{VERTEX_SHADER, fragment_source};
use crate::application::Rasterizer;
use crate::domain::benchmark::ShaderVariant;
use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::infrastructure::webgl::{create_buffer, create_program, create_shader};
use crate::log_info;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use web_sys::{
    WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlTexture, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

struct ProgramBinding {
    program: WebGlProgram,
    texture_loc: Option<WebGlUniformLocation>,
    frame_loc: Option<WebGlUniformLocation>,
}

/// Samples the benchmark texture onto a full-screen quad.
pub struct QuadRenderer {
    gl: Gl,
    programs: HashMap<ShaderVariant, ProgramBinding>,
    vertex_array: WebGlVertexArrayObject,
    vertex_buffer: WebGlBuffer,
    frame: u32,
}

impl QuadRenderer {
    pub fn new(gl: Gl) -> RenderingResult<Self> {
        let vertex_shader = create_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;

        let mut programs = HashMap::new();
        for variant in ShaderVariant::iter() {
            let fragment_shader =
                create_shader(&gl, Gl::FRAGMENT_SHADER, fragment_source(variant))?;
            let linked = create_program(&gl, &vertex_shader, &fragment_shader);
            gl.delete_shader(Some(&fragment_shader));
            let program = linked?;

            programs.insert(
                variant,
                ProgramBinding {
                    texture_loc: gl.get_uniform_location(&program, "u_texture"),
                    frame_loc: gl.get_uniform_location(&program, "u_frame"),
                    program,
                },
            );
        }
        gl.delete_shader(Some(&vertex_shader));

        let vertex_array = gl
            .create_vertex_array()
            .ok_or_else(|| AppError::ResourceCreation("Failed to create vertex array".to_string()))?;
        gl.bind_vertex_array(Some(&vertex_array));
        let vertex_buffer = create_buffer(&gl, quad_bytes())?;

        gl.enable_vertex_attrib_array(QuadVertex::POSITION_LOCATION);
        gl.vertex_attrib_pointer_with_i32(
            QuadVertex::POSITION_LOCATION,
            2,
            Gl::FLOAT,
            false,
            QuadVertex::stride(),
            0,
        );
        gl.enable_vertex_attrib_array(QuadVertex::TEXCOORD_LOCATION);
        gl.vertex_attrib_pointer_with_i32(
            QuadVertex::TEXCOORD_LOCATION,
            2,
            Gl::FLOAT,
            false,
            QuadVertex::stride(),
            QuadVertex::texcoord_offset(),
        );
        gl.bind_vertex_array(None);

        log_info!(LogComponent::Gpu("QuadRenderer"), "{} shader programs linked", programs.len());
        Ok(Self { gl, programs, vertex_array, vertex_buffer, frame: 0 })
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }
}

impl Rasterizer for QuadRenderer {
    type Texture = WebGlTexture;

    fn draw(&mut self, shader: ShaderVariant, texture: &WebGlTexture) -> RenderingResult<()> {
        let binding = self
            .programs
            .get(&shader)
            .ok_or_else(|| AppError::ResourceCreation(format!("no program for {} shader", shader)))?;

        let gl = &self.gl;
        gl.viewport(0, 0, gl.drawing_buffer_width(), gl.drawing_buffer_height());
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT);

        gl.use_program(Some(&binding.program));
        gl.uniform1ui(binding.frame_loc.as_ref(), self.frame);
        gl.active_texture(Gl::TEXTURE0);
        gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
        gl.uniform1i(binding.texture_loc.as_ref(), 0);

        gl.bind_vertex_array(Some(&self.vertex_array));
        gl.draw_arrays(Gl::TRIANGLE_STRIP, 0, 4);
        gl.bind_vertex_array(None);

        self.frame = self.frame.wrapping_add(1);
        Ok(())
    }
}

impl Drop for QuadRenderer {
    fn drop(&mut self) {
        for binding in self.programs.values() {
            self.gl.delete_program(Some(&binding.program));
        }
        self.gl.delete_vertex_array(Some(&self.vertex_array));
        self.gl.delete_buffer(Some(&self.vertex_buffer));
    }
}
