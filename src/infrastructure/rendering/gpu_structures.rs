use bytemuck::{Pod, Zeroable};

/// Interleaved vertex of the full-screen quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Clip-space position
    pub position: [f32; 2],
    pub texcoord: [f32; 2],
}

impl QuadVertex {
    pub const POSITION_LOCATION: u32 = 0;
    pub const TEXCOORD_LOCATION: u32 = 1;

    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { position: [x, y], texcoord: [u, v] }
    }

    pub const fn stride() -> i32 {
        std::mem::size_of::<Self>() as i32
    }

    pub const fn texcoord_offset() -> i32 {
        std::mem::size_of::<[f32; 2]>() as i32
    }
}

/// Drawn as a `TRIANGLE_STRIP`.
pub const FULL_SCREEN_QUAD: [QuadVertex; 4] = [
    QuadVertex::new(-1.0, -1.0, 0.0, 0.0),
    QuadVertex::new(1.0, -1.0, 1.0, 0.0),
    QuadVertex::new(-1.0, 1.0, 0.0, 1.0),
    QuadVertex::new(1.0, 1.0, 1.0, 1.0),
];

pub fn quad_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&FULL_SCREEN_QUAD)
}
