use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::data_structures::model::{Mesh, ModelVertex};

const FACES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

/**
 * An axis-aligned cube of the given edge length centred on the origin.
 *
 * Every face has its own four vertices so normals stay flat. Faces wind
 * counter-clockwise when seen from outside.
 */
pub fn cube_geometry(edge: f32) -> (Vec<ModelVertex>, Vec<u16>) {
    let half = edge / 2.0;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for face in FACES {
        let n = Vector3::from(face);
        let u = if n.y != 0.0 { Vector3::unit_x() } else { Vector3::unit_y() };
        let v = n.cross(u);
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = (n + u * su + v * sv) * half;
            vertices.push(ModelVertex {
                position: corner.into(),
                normal: face,
            });
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

pub fn load_cube(device: &wgpu::Device, edge: f32) -> Mesh {
    let (vertices, indices) = cube_geometry(edge);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Voxel Cube Vertex Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Voxel Cube Index Buffer"),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    Mesh {
        name: "voxel cube".to_string(),
        vertex_buffer,
        index_buffer,
        num_elements: indices.len() as u32,
    }
}
