//! Scene configuration.
//!
//! Everything the scene can be tuned with lives in [`SceneConfig`]. The
//! defaults reproduce the portfolio scene; hosts change single values with the
//! `with_*` methods and the stage checks the result with
//! [`SceneConfig::validate`] when it mounts.

use std::f32::consts::PI;

use anyhow::ensure;
use instant::Duration;

use crate::data_structures::voxel::Color;

/// How the camera projects the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectionKind {
    /// Half extent of the view volume is `height * 0.005 + 4.8` world units.
    Orthographic,
    Perspective { fovy: cgmath::Deg<f32> },
}

/// Gentle floating of the whole model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatConfig {
    pub speed: f32,
    pub intensity: f32,
    pub rotation_intensity: f32,
    /// Lowest and highest vertical offset before `intensity` is applied.
    pub range: (f32, f32),
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            speed: 1.2,
            intensity: 0.3,
            rotation_intensity: 0.15,
            range: (-0.08, 0.08),
        }
    }
}

/// Point lights the shader has room for.
pub const MAX_POINT_LIGHTS: usize = 3;

/// A coloured light without distance falloff.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLightConfig {
    pub position: cgmath::Point3<f32>,
    pub color: Color,
    pub intensity: f32,
}

impl PointLightConfig {
    pub fn new(position: [f32; 3], color: &'static str, intensity: f32) -> Self {
        Self {
            position: position.into(),
            color: Color::from_static(color),
            intensity,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightConfig {
    /// Points from the scene towards the light.
    pub direction: cgmath::Vector3<f32>,
    pub color: Color,
    pub intensity: f32,
    pub ambient: f32,
    /// At most [`MAX_POINT_LIGHTS`].
    pub points: Vec<PointLightConfig>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: cgmath::Vector3::new(10.0, 10.0, 10.0),
            color: Color::from_static("#ffffff"),
            intensity: 0.8,
            ambient: 0.35,
            points: vec![
                PointLightConfig::new([-8.0, 6.0, -6.0], "#e94560", 0.6),
                PointLightConfig::new([8.0, 3.0, -8.0], "#4a90d9", 0.4),
                PointLightConfig::new([0.0, 8.0, 10.0], "#f0c040", 0.3),
            ],
        }
    }
}

/// Linear fog towards `color` between `near` and `far` view depth.
#[derive(Clone, Debug, PartialEq)]
pub struct FogConfig {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: Color::from_static("#0a0a14"),
            near: 18.0,
            far: 40.0,
        }
    }
}

impl FogConfig {
    /// How much of the fog colour covers a fragment at view `depth`.
    ///
    /// Zero up to `near`, one from `far` and a smooth step in between; the
    /// shader computes the same value.
    pub fn factor(&self, depth: f32) -> f32 {
        let t = ((depth - self.near) / (self.far - self.near)).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

/// The floor grid under the model.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Lines run from `-half_cells` to `half_cells` cells around the origin.
    pub half_cells: u32,
    pub color: Color,
    pub opacity: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            half_cells: 22,
            color: Color::from_static("#2a2a3a"),
            opacity: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// World units per grid cell.
    pub voxel_size: f32,
    /// Fraction of a cell a cube fills; below one leaves seams between cubes.
    pub cube_fill: f32,
    pub model_origin: cgmath::Vector3<f32>,
    /// Frames of scripted flyover before the orbit controls take over.
    pub flyover_frame_cap: u32,
    pub flyover_height: f32,
    pub camera_target: cgmath::Point3<f32>,
    pub camera_start: cgmath::Point3<f32>,
    pub min_orbit_distance: f32,
    pub max_orbit_distance: f32,
    /// Polar angles are measured from straight above the target, in radians.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub auto_rotate_speed: f32,
    pub projection: ProjectionKind,
    pub float: Option<FloatConfig>,
    /// Cosmetic delay before the model is shown.
    pub reveal_delay: Duration,
    pub clear_colour: Color,
    pub light: LightConfig,
    pub grid: Option<GridConfig>,
    pub fog: Option<FogConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let start = 0.2 * PI;
        Self {
            voxel_size: 0.30,
            cube_fill: 0.95,
            model_origin: cgmath::Vector3::new(0.0, -1.5, 0.0),
            flyover_frame_cap: 100,
            flyover_height: 7.0,
            camera_target: cgmath::Point3::new(-0.5, 1.2, 0.0),
            camera_start: cgmath::Point3::new(20.0 * start.sin(), 10.0, 20.0 * start.cos()),
            min_orbit_distance: 8.0,
            max_orbit_distance: 30.0,
            min_polar_angle: PI / 6.0,
            max_polar_angle: PI / 1.8,
            auto_rotate_speed: 0.8,
            projection: ProjectionKind::Orthographic,
            float: Some(FloatConfig::default()),
            reveal_delay: Duration::from_millis(1000),
            clear_colour: Color::from_static("#0a0a14"),
            light: LightConfig::default(),
            grid: Some(GridConfig::default()),
            fog: Some(FogConfig::default()),
        }
    }
}

impl SceneConfig {
    pub fn with_voxel_size(mut self, voxel_size: f32) -> Self {
        self.voxel_size = voxel_size;
        self
    }

    pub fn with_flyover_frame_cap(mut self, cap: u32) -> Self {
        self.flyover_frame_cap = cap;
        self
    }

    pub fn with_orbit_distance(mut self, min: f32, max: f32) -> Self {
        self.min_orbit_distance = min;
        self.max_orbit_distance = max;
        self
    }

    pub fn with_polar_angle(mut self, min: f32, max: f32) -> Self {
        self.min_polar_angle = min;
        self.max_polar_angle = max;
        self
    }

    pub fn with_projection(mut self, projection: ProjectionKind) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_float(mut self, float: Option<FloatConfig>) -> Self {
        self.float = float;
        self
    }

    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    pub fn with_grid(mut self, grid: Option<GridConfig>) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_fog(mut self, fog: Option<FogConfig>) -> Self {
        self.fog = fog;
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.voxel_size > 0.0 && self.voxel_size.is_finite(),
            "voxel size must be positive, got {}",
            self.voxel_size
        );
        ensure!(
            self.cube_fill > 0.0 && self.cube_fill <= 1.0,
            "cube fill must be in (0, 1], got {}",
            self.cube_fill
        );
        ensure!(self.flyover_frame_cap > 0, "the flyover needs at least one frame");
        ensure!(
            self.flyover_frame_cap < u32::MAX,
            "the frame counter cannot pass a cap of {}",
            self.flyover_frame_cap
        );
        ensure!(
            self.min_orbit_distance > 0.0 && self.min_orbit_distance <= self.max_orbit_distance,
            "orbit distance range {}..{} is empty or not positive",
            self.min_orbit_distance,
            self.max_orbit_distance
        );
        ensure!(
            0.0 <= self.min_polar_angle
                && self.min_polar_angle <= self.max_polar_angle
                && self.max_polar_angle <= PI,
            "polar angle range {}..{} must lie within 0..PI",
            self.min_polar_angle,
            self.max_polar_angle
        );
        ensure!(
            self.camera_start != self.camera_target,
            "the camera cannot start on its target"
        );
        self.clear_colour.to_srgb()?;
        self.light.color.to_srgb()?;
        ensure!(
            self.light.points.len() <= MAX_POINT_LIGHTS,
            "at most {} point lights are supported, got {}",
            MAX_POINT_LIGHTS,
            self.light.points.len()
        );
        for point in &self.light.points {
            point.color.to_srgb()?;
        }
        if let Some(grid) = &self.grid {
            ensure!(
                (0.0..=1.0).contains(&grid.opacity),
                "grid opacity must be in [0, 1], got {}",
                grid.opacity
            );
            grid.color.to_srgb()?;
        }
        if let Some(fog) = &self.fog {
            ensure!(
                0.0 <= fog.near && fog.near < fog.far,
                "fog range {}..{} is empty or negative",
                fog.near,
                fog.far
            );
            fog.color.to_srgb()?;
        }
        Ok(())
    }
}
