/**
 * This module contains everything that produces model data: the procedural
 * voxel models and the shared cube mesh they are drawn with.
 *
 * Models are authored from two primitives. Both only ever emit voxels, they
 * never remove or merge earlier ones, so sections of a model may overlap.
 */
pub mod cube;
pub mod f1;

use crate::data_structures::voxel::{Color, Voxel};

/// One voxel per `x` in `x_from..=x_to` at fixed `y` and `z`.
pub fn fill_row(z: i32, y: i32, x_from: i32, x_to: i32, color: &Color) -> Vec<Voxel> {
    (x_from..=x_to)
        .map(|x| Voxel::new(x, y, z, color.clone()))
        .collect()
}

/// A filled patch at height `y`: [`fill_row`] for every `z` in `z..=z_to`.
pub fn fill_rect(z: i32, y: i32, x_from: i32, x_to: i32, z_to: i32, color: &Color) -> Vec<Voxel> {
    (z..=z_to)
        .flat_map(|zz| fill_row(zz, y, x_from, x_to, color))
        .collect()
}
