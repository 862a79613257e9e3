use anyhow::Context;
use wgpu::{BindGroupLayout, Device, util::DeviceExt};

use crate::{
    data_structures::{batch::InstanceBatch, model::Mesh, voxel::Color},
    pipelines::material::Material,
};

/// One instanced draw: shared mesh, per-instance buffer and material.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub mesh: &'a Mesh,
    pub material: &'a wgpu::BindGroup,
    pub amount: usize,
}

/**
 * `VoxelBlocks` are all one-by-one voxels of one colour, drawn with a single
 * instanced call.
 *
 * The instance buffer is sized once from the batch and never grows or
 * shrinks. Hidden cubes inside the model still go through the pipeline until
 * the depth test, which is fine for models of a few thousand voxels.
 */
#[derive(Debug)]
pub struct VoxelBlocks {
    pub color: Color,
    pub material: Material,
    pub instance_buffer: wgpu::Buffer,
    amount: usize,
}

impl VoxelBlocks {
    /// Upload `batch`. The batch must be marked for upload; the mark is consumed.
    pub fn new(
        device: &Device,
        material_bind_group_layout: &BindGroupLayout,
        batch: &mut InstanceBatch,
    ) -> anyhow::Result<Self> {
        let instance_data = batch
            .take_pending()
            .with_context(|| format!("Batch {} was not marked for upload", batch.color()))?;
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", batch.color())),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let material = Material::new(device, material_bind_group_layout, batch.color())?;

        Ok(Self {
            color: batch.color().clone(),
            material,
            instance_buffer,
            amount: instance_data.len(),
        })
    }

    pub fn amount(&self) -> usize {
        self.amount
    }

    pub fn render<'a>(&'a self, cube: &'a Mesh) -> Instanced<'a> {
        Instanced {
            instance: &self.instance_buffer,
            mesh: cube,
            material: &self.material.bind_group,
            amount: self.amount,
        }
    }

    pub fn destroy(&self) {
        self.instance_buffer.destroy();
        self.material.buffer.destroy();
    }
}
