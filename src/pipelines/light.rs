use anyhow::Context;
use cgmath::InnerSpace;
use wgpu::util::DeviceExt;

use crate::config::{FogConfig, LightConfig, MAX_POINT_LIGHTS, PointLightConfig};

#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    position: [f32; 3],
    intensity: f32,
    color: [f32; 3],
    _padding: f32,
}

impl PointLightRaw {
    fn from_config(config: &PointLightConfig) -> anyhow::Result<Self> {
        Ok(Self {
            position: config.position.into(),
            intensity: config.intensity,
            color: config
                .color
                .to_linear_rgb()
                .context("Invalid point light colour")?,
            _padding: 0.0,
        })
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }
}

/// One directional light, an ambient term, up to three point lights and the
/// scene fog. Mirrors `Light` in both shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// Unit vector towards the light.
    direction: [f32; 3],
    // fills the vec3 slot to 16 bytes
    intensity: f32,
    color: [f32; 3],
    ambient: f32,
    points: [PointLightRaw; MAX_POINT_LIGHTS],
    fog_color: [f32; 3],
    fog_near: f32,
    fog_far: f32,
    point_count: u32,
    fog_enabled: u32,
    _padding: u32,
}

impl LightUniform {
    pub fn from_config(config: &LightConfig, fog: Option<&FogConfig>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            config.points.len() <= MAX_POINT_LIGHTS,
            "{} point lights do not fit the light uniform",
            config.points.len()
        );
        let mut points = [PointLightRaw::default(); MAX_POINT_LIGHTS];
        for (raw, point) in points.iter_mut().zip(&config.points) {
            *raw = PointLightRaw::from_config(point)?;
        }
        let (fog_color, fog_near, fog_far) = match fog {
            Some(fog) => (
                fog.color.to_linear_rgb().context("Invalid fog colour")?,
                fog.near,
                fog.far,
            ),
            None => ([0.0; 3], 0.0, 0.0),
        };
        Ok(Self {
            direction: config.direction.normalize().into(),
            intensity: config.intensity,
            color: config
                .color
                .to_linear_rgb()
                .context("Invalid light colour")?,
            ambient: config.ambient,
            points,
            fog_color,
            fog_near,
            fog_far,
            point_count: config.points.len() as u32,
            fog_enabled: fog.is_some() as u32,
            _padding: 0,
        })
    }

    pub fn direction(&self) -> [f32; 3] {
        self.direction
    }

    pub fn points(&self) -> &[PointLightRaw] {
        &self.points[..self.point_count as usize]
    }

    /// Fog colour and depth range, if the scene has fog.
    pub fn fog(&self) -> Option<([f32; 3], f32, f32)> {
        (self.fog_enabled != 0).then_some((self.fog_color, self.fog_near, self.fog_far))
    }
}

impl LightResources {
    pub fn new(
        config: &LightConfig,
        fog: Option<&FogConfig>,
        device: &wgpu::Device,
    ) -> anyhow::Result<Self> {
        let uniform = LightUniform::from_config(config, fog)?;
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Ok(Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        })
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
