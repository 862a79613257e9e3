//! Scripted camera flyover.
//!
//! The animator counts frames. Up to and including `cap` it spins the start
//! position around the vertical axis with a decelerating ease. On the first
//! frame past the cap it reports a handoff and leaves the camera alone for
//! good; the orbit controller drives it from then on.

use std::f32::consts::PI;

use cgmath::Point3;

use crate::{camera::Camera, config::SceneConfig};

/// Frames over which the ease curve runs. Larger than the default cap so the
/// spin is still slowing down when control is handed over.
pub const EASE_FRAMES: f32 = 120.0;

/// Full turns the flyover would complete at the end of the ease curve.
pub const FLYOVER_TURNS: f32 = 10.0;

/// Circular ease-out: fast start, flat finish. `0 -> 0`, `1 -> 1`.
pub fn ease_out_circ(x: f32) -> f32 {
    (1.0 - (x - 1.0).powi(4)).sqrt()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraPhase {
    Flyover,
    Orbit,
}

/// What a single [`CameraAnimator::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub frame: u32,
    pub phase: CameraPhase,
    /// Set on exactly one tick: the one that enters the orbit phase.
    pub handoff: bool,
}

#[derive(Clone, Debug)]
pub struct CameraAnimator {
    frame: u32,
    cap: u32,
    start: Point3<f32>,
    height: f32,
}

impl CameraAnimator {
    pub fn new(cap: u32, start: Point3<f32>, height: f32) -> Self {
        Self {
            frame: 0,
            cap,
            start,
            height,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.flyover_frame_cap, config.camera_start, config.flyover_height)
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn phase(&self) -> CameraPhase {
        if self.frame <= self.cap {
            CameraPhase::Flyover
        } else {
            CameraPhase::Orbit
        }
    }

    /// Advance one frame, moving `camera` while the flyover lasts.
    pub fn tick(&mut self, camera: &mut Camera) -> Tick {
        let was = self.phase();
        if self.frame <= self.cap {
            self.frame = self.frame.saturating_add(1);
        }
        let phase = self.phase();
        if phase == CameraPhase::Flyover {
            camera.position = self.flyover_position(self.frame);
        }
        Tick {
            frame: self.frame,
            phase,
            handoff: was == CameraPhase::Flyover && phase == CameraPhase::Orbit,
        }
    }

    /// Camera position of the flyover at `frame`.
    pub fn flyover_position(&self, frame: u32) -> Point3<f32> {
        let theta = -ease_out_circ(frame as f32 / EASE_FRAMES) * 2.0 * PI * FLYOVER_TURNS;
        let (sin, cos) = theta.sin_cos();
        let p = self.start;
        Point3::new(p.x * cos + p.z * sin, self.height, p.z * cos - p.x * sin)
    }
}
