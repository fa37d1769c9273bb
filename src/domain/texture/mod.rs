pub mod generator;
pub mod uploader;

pub use generator::{BYTES_PER_TEXEL, TextureDataGenerator, texture_bytes};
pub use uploader::{TextureBackend, TextureResource, TextureUploader, TransferKind, mip_levels};
