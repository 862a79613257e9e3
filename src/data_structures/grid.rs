use anyhow::Context;
use cgmath::Point3;
use wgpu::util::DeviceExt;

use crate::{
    config::GridConfig,
    data_structures::{model::Vertex, voxel::Color},
};

/// Grid lines on the floor, one cell per voxel.
///
/// The grid is centred below the model and stays still while the model
/// floats. Lines are emitted in pairs per step: first the one along Z, then
/// the one along X.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundGrid {
    pub half_cells: u32,
    pub spacing: f32,
    pub height: f32,
    pub color: Color,
    pub opacity: f32,
}

impl GroundGrid {
    pub fn new(config: &GridConfig, spacing: f32, height: f32) -> Self {
        Self {
            half_cells: config.half_cells,
            spacing,
            height,
            color: config.color.clone(),
            opacity: config.opacity,
        }
    }

    pub fn line_count(&self) -> usize {
        2 * (2 * self.half_cells as usize + 1)
    }

    /// Distance from the centre to the outermost line.
    pub fn extent(&self) -> f32 {
        self.half_cells as f32 * self.spacing
    }

    pub fn lines(&self) -> Vec<[Point3<f32>; 2]> {
        let n = self.half_cells as i32;
        let extent = self.extent();
        let y = self.height;
        (-n..=n)
            .flat_map(|i| {
                let offset = i as f32 * self.spacing;
                [
                    [Point3::new(offset, y, -extent), Point3::new(offset, y, extent)],
                    [Point3::new(-extent, y, offset), Point3::new(extent, y, offset)],
                ]
            })
            .collect()
    }

    /// Line list vertices in linear colour with the grid opacity as alpha.
    pub fn vertices(&self) -> anyhow::Result<Vec<LineVertex>> {
        let [r, g, b] = self
            .color
            .to_linear_rgb()
            .context("Invalid grid colour")?;
        let color = [r, g, b, self.opacity];
        Ok(self
            .lines()
            .into_iter()
            .flatten()
            .map(|p| LineVertex {
                position: p.into(),
                color,
            })
            .collect())
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
    ];
}

impl Vertex for LineVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// GPU side of a [`GroundGrid`].
#[derive(Debug)]
pub struct GroundLines {
    pub vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GroundLines {
    pub fn new(device: &wgpu::Device, grid: &GroundGrid) -> anyhow::Result<Self> {
        let vertices = grid.vertices()?;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ground Grid Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Ok(Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn destroy(&self) {
        self.vertex_buffer.destroy();
    }
}
