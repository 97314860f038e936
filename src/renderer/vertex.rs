//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Color from 0-255 channels
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// White with a 0-255 alpha
pub fn white(alpha: f32) -> [f32; 4] {
    [1.0, 1.0, 1.0, (alpha / 255.0).clamp(0.0, 1.0)]
}

/// Colors for game elements (authored in sRGB)
pub mod colors {
    use super::rgba;

    pub const BACKGROUND: [f32; 4] = rgba(10, 5, 25, 255);
    pub const SUN_OUTER: [f32; 4] = rgba(255, 180, 50, 40);
    pub const SUN_MIDDLE: [f32; 4] = rgba(255, 200, 80, 90);
    pub const SUN_CORE: [f32; 4] = rgba(255, 240, 150, 130);
    pub const BALL: [f32; 4] = rgba(255, 255, 255, 255);
    pub const PADDLE: [f32; 4] = rgba(173, 216, 230, 255);
    pub const PADDLE_OUTLINE: [f32; 4] = rgba(0, 0, 0, 255);
}
