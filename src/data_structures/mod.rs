//! Scene data structures: voxels, instances and their GPU counterparts.
//!
//! - `voxel` is the integer grid cell and its colour
//! - `scene` groups voxels into one batch per colour under a shared root
//! - `batch` holds the instances of one colour and tracks pending uploads
//! - `instance` holds per-instance transformation data
//! - `grid` is the floor grid and its vertex buffer
//! - `block` is the GPU side of a batch (instance buffer + material)
//! - `model` contains mesh definitions and the instanced draw call
//! - `texture` wraps the depth buffer

pub mod batch;
pub mod block;
pub mod grid;
pub mod instance;
pub mod model;
pub mod scene;
pub mod texture;
pub mod voxel;
