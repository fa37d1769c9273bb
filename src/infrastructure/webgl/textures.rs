use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::domain::texture::{TextureBackend, TransferKind};
use crate::log_trace;
use web_sys::{WebGl2RenderingContext as Gl, WebGlTexture};

/// Immutable-storage RGBA8 textures on texture unit 0.
pub struct WebGlTextures {
    gl: Gl,
}

impl WebGlTextures {
    pub fn new(gl: Gl) -> Self {
        Self { gl }
    }
}

impl TextureBackend for WebGlTextures {
    type Texture = WebGlTexture;

    fn create_texture(&mut self, size: u32, levels: u32) -> RenderingResult<WebGlTexture> {
        let texture = self
            .gl
            .create_texture()
            .ok_or_else(|| AppError::ResourceCreation("Failed to create texture".to_string()))?;
        self.bind_texture(&texture);

        let min_filter = if levels > 1 { Gl::LINEAR_MIPMAP_LINEAR } else { Gl::LINEAR };
        self.gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, Gl::REPEAT as i32);
        self.gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_T, Gl::REPEAT as i32);
        self.gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MIN_FILTER, min_filter as i32);
        self.gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MAG_FILTER, Gl::LINEAR as i32);
        self.gl.tex_storage_2d(Gl::TEXTURE_2D, levels as i32, Gl::RGBA8, size as i32, size as i32);

        if self.gl.get_error() == Gl::OUT_OF_MEMORY {
            self.gl.delete_texture(Some(&texture));
            return Err(AppError::ResourceCreation(format!(
                "out of memory allocating {}x{} texture",
                size, size
            )));
        }
        Ok(texture)
    }

    fn delete_texture(&mut self, texture: WebGlTexture) {
        self.gl.delete_texture(Some(&texture));
    }

    fn bind_texture(&mut self, texture: &WebGlTexture) {
        self.gl.active_texture(Gl::TEXTURE0);
        self.gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
    }

    fn transfer(
        &mut self,
        _texture: &WebGlTexture,
        size: u32,
        data: &[u8],
        kind: TransferKind,
    ) -> RenderingResult<()> {
        // Immutable storage only accepts sub-image writes, so both kinds
        // cover the whole of level 0.
        log_trace!(LogComponent::Gpu("Textures"), "{:?} transfer of {} bytes", kind, data.len());
        self.gl
            .tex_sub_image_2d_with_i32_and_i32_and_u32_and_type_and_opt_u8_array(
                Gl::TEXTURE_2D,
                0,
                0,
                0,
                size as i32,
                size as i32,
                Gl::RGBA,
                Gl::UNSIGNED_BYTE,
                Some(data),
            )
            .map_err(|e| AppError::Transfer(format!("texSubImage2D failed: {:?}", e)))
    }

    fn generate_mipmaps(&mut self, _texture: &WebGlTexture) {
        self.gl.generate_mipmap(Gl::TEXTURE_2D);
    }
}
