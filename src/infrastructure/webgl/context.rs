//! WebGL2 context bootstrap and object creation helpers. Every failure here
//! means the page cannot run the benchmark, so errors are fatal.

use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::log_info;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlContextAttributes,
    WebGlPowerPreference, WebGlProgram, WebGlShader,
};

pub fn canvas_by_id(canvas_id: &str) -> RenderingResult<HtmlCanvasElement> {
    gloo::utils::document()
        .get_element_by_id(canvas_id)
        .ok_or_else(|| AppError::Platform(format!("Canvas with id '{}' not found", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| AppError::Platform(format!("Element '{}' is not a canvas", canvas_id)))
}

/// Requests a high-performance WebGL2 context.
pub fn create_context(canvas: &HtmlCanvasElement) -> RenderingResult<Gl> {
    let attributes = WebGlContextAttributes::new();
    attributes.set_power_preference(WebGlPowerPreference::HighPerformance);

    let gl = canvas
        .get_context_with_context_options("webgl2", &attributes)
        .map_err(|e| AppError::Platform(format!("getContext failed: {:?}", e)))?
        .ok_or_else(|| AppError::Platform("WebGL2 not supported".to_string()))?
        .dyn_into::<Gl>()
        .map_err(|_| AppError::Platform("context is not WebGL2".to_string()))?;

    log_info!(
        LogComponent::Gpu("Context"),
        "WebGL2 context ready, drawing buffer {}x{}",
        gl.drawing_buffer_width(),
        gl.drawing_buffer_height()
    );
    Ok(gl)
}

pub fn create_shader(gl: &Gl, kind: u32, source: &str) -> RenderingResult<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| AppError::ResourceCreation("Failed to create shader".to_string()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl.get_shader_parameter(&shader, Gl::COMPILE_STATUS).as_bool().unwrap_or(false) {
        return Ok(shader);
    }
    let log = gl.get_shader_info_log(&shader).unwrap_or_default();
    gl.delete_shader(Some(&shader));
    Err(AppError::ShaderCompilation(log))
}

pub fn create_program(
    gl: &Gl,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> RenderingResult<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| AppError::ResourceCreation("Failed to create program".to_string()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl.get_program_parameter(&program, Gl::LINK_STATUS).as_bool().unwrap_or(false) {
        return Ok(program);
    }
    let log = gl.get_program_info_log(&program).unwrap_or_default();
    gl.delete_program(Some(&program));
    Err(AppError::ProgramLink(log))
}

/// Static `ARRAY_BUFFER` filled with `bytes`. Leaves the buffer bound.
pub fn create_buffer(gl: &Gl, bytes: &[u8]) -> RenderingResult<WebGlBuffer> {
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| AppError::ResourceCreation("Failed to create buffer".to_string()))?;
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_u8_array(Gl::ARRAY_BUFFER, bytes, Gl::STATIC_DRAW);
    Ok(buffer)
}
