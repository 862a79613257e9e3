//! CPU side of an instanced batch.
//!
//! An [`InstanceBatch`] holds the transforms of every cube that shares one
//! colour. Its length is fixed when it is created. Transforms are written first,
//! then the batch is marked with [`InstanceBatch::mark_needs_update`]. The GPU
//! adapter picks the data up through [`InstanceBatch::take_pending`] which also
//! clears the mark. Any write clears the mark as well, so a batch is never
//! uploaded half-written.

use anyhow::ensure;

use crate::data_structures::{
    instance::{Instance, InstanceRaw},
    voxel::Color,
};

#[derive(Clone, Debug)]
pub struct InstanceBatch {
    color: Color,
    instances: Vec<Instance>,
    needs_update: bool,
}

impl InstanceBatch {
    /// A batch of `amount` identity transforms.
    pub fn new(color: Color, amount: usize) -> Self {
        Self {
            color,
            instances: vec![Instance::new(); amount],
            needs_update: false,
        }
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Place instance `idx` at `position` (translation only).
    pub fn set_translation(&mut self, idx: usize, position: cgmath::Vector3<f32>) -> anyhow::Result<()> {
        ensure!(
            idx < self.instances.len(),
            "instance {} is outside the batch for {} ({} instances)",
            idx,
            self.color,
            self.instances.len()
        );
        self.needs_update = false;
        self.instances[idx] = Instance::from(position);
        Ok(())
    }

    pub fn mark_needs_update(&mut self) {
        self.needs_update = true;
    }

    /// GPU-ready instance data if the batch was marked, clearing the mark.
    pub fn take_pending(&mut self) -> Option<Vec<InstanceRaw>> {
        if !self.needs_update {
            return None;
        }
        self.needs_update = false;
        Some(self.instances.iter().map(Instance::to_raw).collect())
    }
}
