//! Benchmark settings: static configuration fixed at startup and the
//! parameters the panel can change while the loop runs.

use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::timing::{DEFAULT_POOL_SIZE, DEFAULT_WINDOW};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

pub const MIN_UPLOAD_FREQUENCY: u32 = 1;
pub const MAX_UPLOAD_FREQUENCY: u32 = 20;

/// Texture edge lengths offered by the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TextureSize {
    #[strum(to_string = "64x64")]
    S64,
    #[strum(to_string = "128x128")]
    S128,
    #[strum(to_string = "256x256")]
    S256,
    #[strum(to_string = "512x512")]
    S512,
    #[strum(to_string = "1024x1024")]
    S1024,
    #[strum(to_string = "2048x2048")]
    S2048,
    #[strum(to_string = "4096x4096")]
    S4096,
    #[strum(to_string = "8192x8192")]
    S8192,
}

impl TextureSize {
    pub fn texels(self) -> u32 {
        match self {
            TextureSize::S64 => 64,
            TextureSize::S128 => 128,
            TextureSize::S256 => 256,
            TextureSize::S512 => 512,
            TextureSize::S1024 => 1024,
            TextureSize::S2048 => 2048,
            TextureSize::S4096 => 4096,
            TextureSize::S8192 => 8192,
        }
    }
}

impl TryFrom<u32> for TextureSize {
    type Error = AppError;

    fn try_from(texels: u32) -> Result<Self, Self::Error> {
        TextureSize::iter().find(|size| size.texels() == texels).ok_or_else(|| {
            AppError::ValidationError(format!("unsupported texture size {}", texels))
        })
    }
}

impl From<TextureSize> for u32 {
    fn from(size: TextureSize) -> Self {
        size.texels()
    }
}

/// Fragment shader used for the full-screen quad.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShaderVariant {
    /// Samples the texture with a per-frame vertical scroll
    #[default]
    Scrolling,
    Static,
}

/// Parameters adjustable while the benchmark runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BenchParams {
    pub texture_size: TextureSize,
    /// Uploads per frame
    pub upload_frequency: u32,
    pub running: bool,
    pub use_mipmaps: bool,
    pub shader: ShaderVariant,
}

impl Default for BenchParams {
    fn default() -> Self {
        Self {
            texture_size: TextureSize::S1024,
            upload_frequency: 10,
            running: true,
            use_mipmaps: true,
            shader: ShaderVariant::default(),
        }
    }
}

impl BenchParams {
    pub fn validate(&self) -> ValidationResult<()> {
        if !(MIN_UPLOAD_FREQUENCY..=MAX_UPLOAD_FREQUENCY).contains(&self.upload_frequency) {
            return Err(AppError::ValidationError(format!(
                "upload frequency {} outside {}..={}",
                self.upload_frequency, MIN_UPLOAD_FREQUENCY, MAX_UPLOAD_FREQUENCY
            )));
        }
        Ok(())
    }

    /// Parses and validates; missing fields take their defaults.
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| AppError::ValidationError(format!("invalid params: {}", e)))?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> ValidationResult<String> {
        serde_json::to_string(self).map_err(|e| AppError::ValidationError(e.to_string()))
    }
}

/// Settings fixed for the lifetime of a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BenchConfig {
    pub query_pool_size: usize,
    /// Samples kept per phase for averaging
    pub measurement_window: usize,
    pub display_interval_ms: f64,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            query_pool_size: DEFAULT_POOL_SIZE,
            measurement_window: DEFAULT_WINDOW,
            display_interval_ms: 1000.0,
            canvas_width: 800,
            canvas_height: 600,
        }
    }
}
