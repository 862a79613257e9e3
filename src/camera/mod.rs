//! Camera state, projection and the uniform that carries both to the GPU.
//!
//! - [`animator`] scripts the flyover at the start of a scene
//! - [`orbit`] takes over afterwards and lets the user drag and zoom

pub mod animator;
pub mod orbit;

use cgmath::{InnerSpace, Matrix4, Point3, Vector3};
use wgpu::util::DeviceExt;

use crate::{config::ProjectionKind, data_structures::instance::Instance};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Where the camera is and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(position: impl Into<Point3<f32>>, target: impl Into<Point3<f32>>) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
            up: Vector3::unit_y(),
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    kind: ProjectionKind,
    width: u32,
    height: u32,
    zoom: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(kind: ProjectionKind, width: u32, height: u32) -> Self {
        Self {
            kind,
            width: width.max(1),
            height: height.max(1),
            zoom: 1.0,
            znear: 0.1,
            zfar: 500.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Magnification of the orthographic view. Perspective views zoom by
    /// moving the camera instead and ignore this.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_orthographic(&self) -> bool {
        self.kind == ProjectionKind::Orthographic
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let raw = match self.kind {
            ProjectionKind::Orthographic => {
                let half_height = (self.height as f32 * 0.005 + 4.8) / self.zoom;
                let half_width = half_height * self.aspect();
                cgmath::ortho(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.znear,
                    self.zfar,
                )
            }
            ProjectionKind::Perspective { fovy } => {
                cgmath::perspective(fovy, self.aspect(), self.znear, self.zfar)
            }
        };
        OPENGL_TO_WGPU_MATRIX * raw
    }
}

/// Camera data as laid out in the shader.
///
/// `root` is the transform of the scene root; every instance is placed relative
/// to it before the view projection is applied. `forward.w` is one under an
/// orthographic projection, where all view rays are parallel to `forward`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    forward: [f32; 4],
    view_proj: [[f32; 4]; 4],
    root: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            forward: [0.0, 0.0, -1.0, 0.0],
            view_proj: Matrix4::identity().into(),
            root: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection, root: &Instance) {
        self.view_position = camera.position.to_homogeneous().into();
        let forward = camera.forward();
        let parallel = if projection.is_orthographic() { 1.0 } else { 0.0 };
        self.forward = [forward.x, forward.y, forward.z, parallel];
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
        self.root = root.to_matrix().into();
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        self.view_proj.into()
    }

    /// The direction every fragment is seen from, when it is the same for all
    /// of them.
    pub fn parallel_view_direction(&self) -> Option<Vector3<f32>> {
        let [x, y, z, parallel] = self.forward;
        (parallel > 0.5).then(|| -Vector3::new(x, y, z))
    }

    /// View depth of a world point: its distance along the camera forward vector.
    pub fn view_depth(&self, point: Point3<f32>) -> f32 {
        let [x, y, z, _] = self.forward;
        let eye = Point3::new(self.view_position[0], self.view_position[1], self.view_position[2]);
        (point - eye).dot(Vector3::new(x, y, z))
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = CameraUniform::new();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue, camera: &Camera, projection: &Projection, root: &Instance) {
        self.uniform.update_view_proj(camera, projection, root);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
