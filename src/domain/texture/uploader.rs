use super::generator::TextureDataGenerator;
use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// Texture operations of a graphics backend.
pub trait TextureBackend {
    type Texture;

    /// Allocates immutable RGBA8 storage with `levels` mip levels and leaves
    /// the new texture bound.
    fn create_texture(&mut self, size: u32, levels: u32) -> RenderingResult<Self::Texture>;
    fn delete_texture(&mut self, texture: Self::Texture);
    fn bind_texture(&mut self, texture: &Self::Texture);
    /// Copies `data` into level 0 of the bound texture.
    fn transfer(
        &mut self,
        texture: &Self::Texture,
        size: u32,
        data: &[u8],
        kind: TransferKind,
    ) -> RenderingResult<()>;
    fn generate_mipmaps(&mut self, texture: &Self::Texture);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    /// First fill of freshly allocated storage
    Full,
    /// In-place update of an existing texture
    SubRegion,
}

/// Mip chain length for a square texture: `log2(size) + 1`, or 1.
pub fn mip_levels(size: u32, mipmaps: bool) -> u32 {
    if mipmaps && size > 0 { u32::BITS - size.leading_zeros() } else { 1 }
}

#[derive(Debug)]
pub struct TextureResource<T> {
    handle: T,
    size: u32,
    mipmaps: bool,
    levels: u32,
}

impl<T> TextureResource<T> {
    pub fn handle(&self) -> &T {
        &self.handle
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn mipmaps(&self) -> bool {
        self.mipmaps
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn matches(&self, size: u32, mipmaps: bool) -> bool {
        self.size == size && self.mipmaps == mipmaps
    }
}

/// Owns the pixel data and decides between reallocating a texture and
/// updating it in place.
pub struct TextureUploader<B: TextureBackend> {
    backend: B,
    generator: TextureDataGenerator,
    data: Vec<u8>,
    data_size: u32,
}

impl<B: TextureBackend> TextureUploader<B> {
    pub fn new(backend: B, generator: TextureDataGenerator) -> Self {
        Self { backend, generator, data: Vec::new(), data_size: 0 }
    }

    /// Uploads the cached image into `resource`, replacing the texture when
    /// its size or mipmap flag no longer matches. The returned resource must
    /// be passed to the next call. On error the texture has been released.
    pub fn upload(
        &mut self,
        resource: Option<TextureResource<B::Texture>>,
        size: u32,
        use_mipmaps: bool,
    ) -> RenderingResult<TextureResource<B::Texture>> {
        if size == 0 {
            if let Some(stale) = resource {
                self.release(stale);
            }
            return Err(AppError::ValidationError("texture size must be positive".to_string()));
        }

        let (resource, kind) = match resource {
            Some(current) if current.matches(size, use_mipmaps) => {
                self.backend.bind_texture(&current.handle);
                (current, TransferKind::SubRegion)
            }
            stale => {
                if let Some(stale) = stale {
                    self.release(stale);
                }
                let levels = mip_levels(size, use_mipmaps);
                let handle = self.backend.create_texture(size, levels)?;
                log_debug!(
                    LogComponent::Domain("TextureUploader"),
                    "allocated {}x{} texture with {} levels",
                    size,
                    size,
                    levels
                );
                (TextureResource { handle, size, mipmaps: use_mipmaps, levels }, TransferKind::Full)
            }
        };

        if self.data_size != size {
            self.data = self.generator.generate(size);
            self.data_size = size;
        }

        if let Err(error) = self.backend.transfer(&resource.handle, size, &self.data, kind) {
            self.release(resource);
            return Err(error);
        }
        if use_mipmaps {
            self.backend.generate_mipmaps(&resource.handle);
        }
        Ok(resource)
    }

    pub fn release(&mut self, resource: TextureResource<B::Texture>) {
        self.backend.delete_texture(resource.handle);
    }

    /// Image currently cached for upload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
