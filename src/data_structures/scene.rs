//! Grouping voxels into colour batches and the scene that owns them.

use std::collections::HashMap;

use cgmath::{Euler, Quaternion, Rad};
use instant::Duration;

use crate::{
    config::FloatConfig,
    data_structures::{
        batch::InstanceBatch,
        grid::GroundGrid,
        instance::Instance,
        voxel::{Color, Voxel},
    },
};

/// All world positions sharing one colour.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGroup {
    pub color: Color,
    pub positions: Vec<cgmath::Vector3<f32>>,
}

/// Partition `voxels` by colour.
///
/// Groups appear in the order their colour is first seen, members keep the
/// order of the input. Voxels at identical coordinates are all kept.
pub fn group_by_color(voxels: &[Voxel], voxel_size: f32) -> Vec<ColorGroup> {
    let mut index: HashMap<&Color, usize> = HashMap::new();
    let mut groups: Vec<ColorGroup> = Vec::new();
    for voxel in voxels {
        let idx = *index.entry(&voxel.color).or_insert_with(|| {
            groups.push(ColorGroup {
                color: voxel.color.clone(),
                positions: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].positions.push(voxel.world_position(voxel_size));
    }
    groups
}

/// The static voxel model: one batch per colour below a shared root, and the
/// floor it stands on.
#[derive(Clone, Debug)]
pub struct VoxelScene {
    pub root: Instance,
    pub batches: Vec<InstanceBatch>,
    pub ground: Option<GroundGrid>,
}

impl VoxelScene {
    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(InstanceBatch::len).sum()
    }

    /// World transforms of every instance, batch by batch.
    pub fn world_transforms(&self) -> impl Iterator<Item = Instance> + '_ {
        self.batches
            .iter()
            .flat_map(|batch| batch.instances().iter())
            .map(|instance| &self.root * instance)
    }
}

pub struct SceneBuilder {
    voxel_size: f32,
    origin: cgmath::Vector3<f32>,
    ground: Option<GroundGrid>,
}

impl SceneBuilder {
    pub fn new(voxel_size: f32) -> Self {
        Self {
            voxel_size,
            origin: cgmath::Vector3::new(0.0, 0.0, 0.0),
            ground: None,
        }
    }

    /// Where the scene root sits; lowers the grid so the model rests on the ground.
    pub fn with_origin(mut self, origin: impl Into<cgmath::Vector3<f32>>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_ground(mut self, ground: Option<GroundGrid>) -> Self {
        self.ground = ground;
        self
    }

    pub fn build(&self, voxels: &[Voxel]) -> anyhow::Result<VoxelScene> {
        let batches = group_by_color(voxels, self.voxel_size)
            .into_iter()
            .map(|group| {
                let mut batch = InstanceBatch::new(group.color, group.positions.len());
                for (i, position) in group.positions.into_iter().enumerate() {
                    batch.set_translation(i, position)?;
                }
                batch.mark_needs_update();
                log::debug!("batch {} holds {} voxels", batch.color(), batch.len());
                Ok(batch)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(VoxelScene {
            root: Instance::from(self.origin),
            batches,
            ground: self.ground.clone(),
        })
    }
}

/// Offset of the floating scene root after `elapsed` time.
///
/// The model drifts up and down inside `range` and sways slightly around all
/// three axes.
pub fn float_motion(config: &FloatConfig, elapsed: Duration) -> Instance {
    let t = elapsed.as_secs_f32() / 4.0 * config.speed;
    let (lo, hi) = config.range;
    let bob = t.sin() / 10.0;
    let y = lo + (bob + 0.1) * (hi - lo) / 0.2;
    let rotation = Quaternion::from(Euler {
        x: Rad(t.cos() / 8.0 * config.rotation_intensity),
        y: Rad(t.sin() / 8.0 * config.rotation_intensity),
        z: Rad(t.sin() / 20.0 * config.rotation_intensity),
    });
    Instance {
        position: cgmath::Vector3::new(0.0, y * config.intensity, 0.0),
        rotation,
    }
}
