//! Per-colour material: one small uniform and bind group per batch.

use anyhow::Context;
use wgpu::util::DeviceExt;

use crate::data_structures::voxel::Color;

/// Phong exponent of the voxel surface.
pub const SHININESS: f32 = 30.0;
pub const SPECULAR: Color = Color::from_static("#444444");

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    color: [f32; 4],
    /// rgb is the specular colour, w the shininess.
    specular: [f32; 4],
}

impl MaterialUniform {
    pub fn new(color: &Color) -> anyhow::Result<Self> {
        let [r, g, b] = color
            .to_linear_rgb()
            .with_context(|| format!("Invalid material colour {}", color))?;
        let [sr, sg, sb] = SPECULAR.to_linear_rgb()?;
        Ok(Self {
            color: [r, g, b, 1.0],
            specular: [sr, sg, sb, SHININESS],
        })
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }
}

#[derive(Debug)]
pub struct Material {
    pub uniform: MaterialUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        color: &Color,
    ) -> anyhow::Result<Self> {
        let uniform = MaterialUniform::new(color)?;
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Material Buffer", color)),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("{} material_bind_group", color)),
        });
        Ok(Self {
            uniform,
            buffer,
            bind_group,
        })
    }
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("material_bind_group_layout"),
    })
}
