//! Per-tree instance data for GPU rendering.
//!
//! Every tree becomes exactly one instance. The attributes the classic
//! geometry-shader forest technique packed into vertex side-channels (height,
//! width, texture layer, shading jitter) live in an instance buffer here and
//! are expanded into crossed quads by the billboard shader.

use rand::{Rng, RngCore};

use crate::data_structures::cell::Tree;

/// Shading jitter ranges applied per tree at build time.
///
/// Intensity dims or brightens the whole billboard; the red jitter warms up
/// individual trees so a forest doesn't read as a single flat green.
pub const INTENSITY_JITTER: std::ops::Range<f32> = 0.75..1.15;
pub const RED_JITTER: std::ops::Range<f32> = 1.0..1.25;

/// Describes how a vertex buffer is laid out for the shader.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One tree's worth of billboard attributes, jitter already baked in.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeInstance {
    pub position: cgmath::Vector3<f32>,
    pub height: f32,
    pub width: f32,
    pub layer: u32,
    pub intensity: f32,
    pub red_intensity: f32,
}

impl TreeInstance {
    /// Build an instance from a placement, rolling the shading jitter.
    pub fn jittered(tree: &Tree, rng: &mut dyn RngCore) -> Self {
        Self {
            position: tree.position,
            height: tree.height,
            width: tree.width,
            layer: tree.layer,
            intensity: rng.random_range(INTENSITY_JITTER),
            red_intensity: rng.random_range(RED_JITTER),
        }
    }

    pub fn to_raw(&self) -> TreeInstanceRaw {
        TreeInstanceRaw {
            position: self.position.into(),
            size: [self.height, self.width],
            layer: self.layer as f32,
            tint: [self.intensity, self.red_intensity],
        }
    }
}

/**
 * The raw instance is the actual data stored on the GPU.
 *
 * The layer index travels as a float; the shader truncates it back to an
 * array slice index.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TreeInstanceRaw {
    pub position: [f32; 3],
    /// `[height, width]`.
    pub size: [f32; 2],
    pub layer: f32,
    /// `[intensity, red_intensity]`.
    pub tint: [f32; 2],
}

/**
 * As we store instance data directly in GPU memory we need to tell what the
 * bytes refer to:
 *
 * stride: one tree (position + size + layer + tint)
 * step mode: Instance, so the shader advances once per tree rather than once
 * per vertex while it expands the quads.
 */
impl Vertex for TreeInstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<TreeInstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    // corresponds to the @location in the shader file.
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn sample_tree() -> Tree {
        Tree::new(Vector3::new(3.0, 0.0, -7.5), 12.0, 4.0, 2)
    }

    #[test]
    fn raw_layout_is_eight_floats() {
        assert_eq!(std::mem::size_of::<TreeInstanceRaw>(), 32);
        let desc = TreeInstanceRaw::desc();
        assert_eq!(desc.array_stride, 32);
        assert_eq!(desc.step_mode, wgpu::VertexStepMode::Instance);
        let offsets: Vec<u64> = desc.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20, 24]);
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let instance = TreeInstance::jittered(&sample_tree(), &mut rng);
            assert!(INTENSITY_JITTER.contains(&instance.intensity));
            assert!(RED_JITTER.contains(&instance.red_intensity));
        }
    }

    #[test]
    fn jitter_leaves_placement_untouched() {
        let tree = sample_tree();
        let mut rng = StdRng::seed_from_u64(7);
        let instance = TreeInstance::jittered(&tree, &mut rng);
        assert_eq!(instance.position, tree.position);
        assert_eq!(instance.height, tree.height);
        assert_eq!(instance.width, tree.width);
        assert_eq!(instance.layer, tree.layer);
    }

    #[test]
    fn layer_survives_the_float_side_channel() {
        let mut tree = sample_tree();
        tree.layer = 11;
        let mut rng = StdRng::seed_from_u64(0);
        let raw = TreeInstance::jittered(&tree, &mut rng).to_raw();
        assert_eq!(raw.size, [12.0, 4.0]);
        assert_eq!(raw.layer as u32, 11);
    }
}
