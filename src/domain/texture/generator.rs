use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// RGBA8
pub const BYTES_PER_TEXEL: usize = 4;

/// Byte length of a square RGBA8 image with `size` texels per side.
pub fn texture_bytes(size: u32) -> usize {
    size as usize * size as usize * BYTES_PER_TEXEL
}

/// Produces noise images for upload. Content is random, shape is not.
#[derive(Debug, Clone)]
pub struct TextureDataGenerator {
    rng: SmallRng,
}

impl TextureDataGenerator {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Random RGB with opaque alpha, `size * size * 4` bytes.
    pub fn generate(&mut self, size: u32) -> Vec<u8> {
        let mut data = vec![0u8; texture_bytes(size)];
        self.rng.fill_bytes(&mut data);
        for texel in data.chunks_exact_mut(BYTES_PER_TEXEL) {
            texel[3] = u8::MAX;
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_has_four_bytes_per_texel() {
        let mut generator = TextureDataGenerator::new(7);
        assert_eq!(generator.generate(64).len(), 64 * 64 * 4);
        assert!(generator.generate(0).is_empty());
    }

    #[test]
    fn alpha_is_always_opaque() {
        let data = TextureDataGenerator::new(1).generate(32);
        assert!(data.chunks_exact(BYTES_PER_TEXEL).all(|texel| texel[3] == 255));
    }

    #[test]
    fn consecutive_images_differ() {
        let mut generator = TextureDataGenerator::new(42);
        let first = generator.generate(16);
        let second = generator.generate(16);
        assert_ne!(first, second);
    }
}
