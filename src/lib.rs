//! grove-ngin
//!
//! A lightweight billboard vegetation renderer for wgpu terrain scenes.
//! Trees are stored in a hierarchical cell structure, compiled into a scene
//! graph of instance buffers, and expanded on the GPU into crossed quads
//! textured from a 2D texture array. The design emphasizes
//! one-instance-per-tree encoding and a minimal surface suitable for
//! embedding into a larger terrain engine.
//!
//! High-level modules
//! - `camera`: camera types and uniforms for view/projection
//! - `context`: central GPU and window context that owns device/queue/config
//! - `data_structures`: vegetation data models (cells, instances, textures)
//! - `pipelines`: the billboard render pipeline and its WGSL shader
//! - `resources`: helpers to load billboard texture arrays
//! - `render`: render batching for efficient pipeline reuse
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::*;
