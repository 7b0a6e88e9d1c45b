//! Vertex and instance layouts for the box renderer

use bytemuck::{Pod, Zeroable};

/// Mesh vertex: position and face normal
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Per-instance data: model matrix (4 columns) and colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl Instance {
    /// `color` is sRGB; it is stored linear since the surface re-encodes on write
    pub fn new(model: glam::Mat4, color: [f32; 3]) -> Self {
        let [r, g, b] = color.map(srgb_to_linear);
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, 1.0],
        }
    }

    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Decode one sRGB channel to linear light
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Colors for scene elements (sRGB)
pub mod colors {
    /// Sky blue backdrop
    pub const SKY: [f64; 3] = [0.529, 0.808, 0.922];
    /// Tan cardboard
    pub const GROUND: [f32; 3] = [0.824, 0.706, 0.549];
    /// Orange kitty
    pub const KITTY: [f32; 3] = [1.0, 0.647, 0.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_to_linear() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
        assert!((srgb_to_linear(0.02) - 0.02 / 12.92).abs() < 1e-7);
    }

    #[test]
    fn test_instance_color_is_linear() {
        let instance = Instance::new(glam::Mat4::IDENTITY, colors::GROUND);
        assert!(instance.color[0] < colors::GROUND[0]);
        assert!((instance.color[1] - srgb_to_linear(colors::GROUND[1])).abs() < 1e-6);
        assert_eq!(instance.color[3], 1.0);
    }
}
