//! Render pipeline definitions.
//!
//! - `billboard` expands tree instances into textured crossed quads

pub mod billboard;
