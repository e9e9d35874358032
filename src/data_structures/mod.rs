//! Vegetation data structures: cells, instances, scene graphs, and textures.
//!
//! This module contains the core data types for vegetation representation:
//!
//! - `cell` holds the hierarchical spatial layout of trees fed to the builder
//! - `instance` holds per-tree attribute data packed for GPU instancing
//! - `scene_graph` compiles cells into a hierarchy of drawable nodes
//! - `texture` contains the GPU texture wrapper and array creation utilities

pub mod cell;
pub mod instance;
pub mod scene_graph;
pub mod texture;
