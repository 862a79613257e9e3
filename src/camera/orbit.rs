//! Orbit controls around a fixed target.
//!
//! The camera sits on a sphere around the target. The controller spins it at a
//! constant rate, lets the user drag it around and zoom with the wheel, and
//! keeps it inside a distance band and a polar band so it never flips under
//! the model or ends up straight above it.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};
use instant::Duration;
use winit::{
    dpi::PhysicalPosition,
    event::{MouseButton, MouseScrollDelta, WindowEvent},
};

use crate::{camera::Camera, config::SceneConfig};

/// Radius factor of one wheel step towards the target.
pub const ZOOM_STEP: f32 = 0.95;

// keeps the polar angle away from the poles where `look_at` degenerates
const POLE_EPS: f32 = 1e-6;

// roughly one wheel notch on touchpads that report pixels
const PIXELS_PER_STEP: f64 = 50.0;

#[derive(Clone, Debug)]
pub struct OrbitController {
    radius: f32,
    /// Azimuth around the vertical axis, zero on +z.
    theta: f32,
    /// Polar angle from +y.
    phi: f32,
    min_distance: f32,
    max_distance: f32,
    min_polar: f32,
    max_polar: f32,
    /// Radians per second.
    auto_rotate: f32,
    reference_distance: f32,
    viewport_height: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    dragging: bool,
    cursor: Option<PhysicalPosition<f64>>,
}

impl OrbitController {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            radius: config.min_orbit_distance,
            theta: 0.0,
            phi: PI / 2.0,
            min_distance: config.min_orbit_distance,
            max_distance: config.max_orbit_distance,
            min_polar: config.min_polar_angle,
            max_polar: config.max_polar_angle,
            auto_rotate: 2.0 * PI / 60.0 * config.auto_rotate_speed,
            reference_distance: config.min_orbit_distance,
            viewport_height: 1.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            dragging: false,
            cursor: None,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn polar(&self) -> f32 {
        self.phi
    }

    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Distance at handoff divided by the current one. Orthographic views
    /// magnify by this instead of moving closer.
    pub fn zoom_factor(&self) -> f32 {
        self.reference_distance / self.radius
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    /// Adopt the current camera position as the orbit start, clamped into bounds.
    pub fn sync_from(&mut self, camera: &Camera) {
        let offset = camera.position - camera.target;
        let radius = offset.magnitude();
        self.theta = offset.x.atan2(offset.z);
        self.phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };
        self.radius = radius;
        self.clamp();
        self.reference_distance = self.radius;
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
    }

    /// Drag by `dx`/`dy` pixels; a drag across the full viewport height turns
    /// the camera once.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.pending_theta -= 2.0 * PI * dx as f32 / self.viewport_height;
        self.pending_phi -= 2.0 * PI * dy as f32 / self.viewport_height;
    }

    /// Positive steps move towards the target.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_scale *= ZOOM_STEP.powf(steps);
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.dragging = state.is_pressed(),
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(last)) = (self.dragging, self.cursor) {
                    self.handle_mouse(position.x - last.x, position.y - last.y);
                }
                self.cursor = Some(*position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.dragging = false;
                self.cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.zoom(*y),
                MouseScrollDelta::PixelDelta(pos) => self.zoom((pos.y / PIXELS_PER_STEP) as f32),
            },
            _ => (),
        }
    }

    /// Apply auto-rotation and pending input, then move the camera.
    pub fn update(&mut self, camera: &mut Camera, dt: Duration) {
        if !self.dragging {
            self.theta -= self.auto_rotate * dt.as_secs_f32();
        }
        self.theta = (self.theta + self.pending_theta) % (2.0 * PI);
        self.phi += self.pending_phi;
        self.radius *= self.pending_scale;
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
        self.clamp();

        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let offset = Vector3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius;
        camera.position = camera.target + offset;
    }

    fn clamp(&mut self) {
        let lo = self.min_polar.max(POLE_EPS);
        let hi = self.max_polar.min(PI - POLE_EPS).max(lo);
        self.phi = self.phi.clamp(lo, hi);
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
    }
}
