//! Render pipelines and the bind groups they consume.
//!
//! - `basic` builds the instanced voxel pipeline
//! - `grid` builds the line pipeline for the floor grid
//! - `light` holds the light and fog uniform (group 1)
//! - `material` holds the per-colour material uniform (group 2)

pub mod basic;
pub mod grid;
pub mod light;
pub mod material;
