//! The mounted scene and its lifecycle.
//!
//! A [`Stage`] is what a host mounts into a region of its window. It owns the
//! voxel scene, the camera and its animation, and a [`RenderBackend`] that
//! draws into the region. The host drives it with three calls:
//!
//! 1. [`Stage::frame`] once per display refresh
//! 2. [`Stage::resize`] whenever the region changes size
//! 3. [`Stage::unmount`] when the region goes away (dropping the stage does the same)
//!
//! Nothing here depends on a particular event loop, `flow` is just one host.

use anyhow::Context;
use instant::Duration;

use crate::{
    camera::{
        Camera, Projection,
        animator::{CameraAnimator, CameraPhase, Tick},
        orbit::OrbitController,
    },
    config::{ProjectionKind, SceneConfig},
    data_structures::{
        grid::GroundGrid,
        instance::Instance,
        scene::{SceneBuilder, VoxelScene, float_motion},
        voxel::Voxel,
    },
    resources::f1,
};

/// Everything a backend needs to draw one frame.
pub struct Frame<'a> {
    pub camera: &'a Camera,
    pub projection: &'a Projection,
    /// World transform of the scene root.
    pub root: &'a Instance,
    /// False while the reveal delay runs; only the background is drawn.
    pub revealed: bool,
}

/// A drawing surface the stage renders into.
pub trait RenderBackend {
    /// Create GPU-side batches for every batch of `scene` that is marked for
    /// upload, and the ground grid if there is one. Called once per mount.
    fn load_scene(&mut self, scene: &mut VoxelScene) -> anyhow::Result<()>;

    /// Size the output to exactly `width` x `height`; never called with zeros.
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    fn draw(&mut self, frame: &Frame<'_>) -> anyhow::Result<()>;

    /// Free every buffer, pipeline and listener. Called exactly once.
    fn release(&mut self);
}

pub struct Stage<B: RenderBackend> {
    backend: Option<B>,
    config: SceneConfig,
    scene: VoxelScene,
    camera: Camera,
    projection: Projection,
    animator: CameraAnimator,
    orbit: OrbitController,
    elapsed: Duration,
}

impl<B: RenderBackend> Stage<B> {
    /// Mount the F1 car.
    pub fn mount(backend: B, config: SceneConfig, width: u32, height: u32) -> anyhow::Result<Self> {
        Self::mount_model(backend, config, &f1::generate(), width, height)
    }

    pub fn mount_model(
        mut backend: B,
        config: SceneConfig,
        voxels: &[Voxel],
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let scene = config
            .validate()
            .context("Invalid scene configuration")
            .and_then(|_| {
                let ground = config
                    .grid
                    .as_ref()
                    .map(|grid| GroundGrid::new(grid, config.voxel_size, config.model_origin.y));
                SceneBuilder::new(config.voxel_size)
                    .with_origin(config.model_origin)
                    .with_ground(ground)
                    .build(voxels)
            })
            .and_then(|mut scene| {
                backend
                    .load_scene(&mut scene)
                    .context("Unable to upload the voxel scene")?;
                Ok(scene)
            });
        // A failed mount still hands back whatever the backend acquired.
        let scene = match scene {
            Ok(scene) => scene,
            Err(e) => {
                backend.release();
                return Err(e);
            }
        };
        log::info!(
            "Mounted {} voxels in {} colour batches",
            scene.instance_count(),
            scene.batches.len()
        );

        let camera = Camera::new(config.camera_start, config.camera_target);
        let mut stage = Self {
            backend: Some(backend),
            projection: Projection::new(config.projection, width, height),
            animator: CameraAnimator::from_config(&config),
            orbit: OrbitController::new(&config),
            config,
            scene,
            camera,
            elapsed: Duration::ZERO,
        };
        stage.resize(width, height);
        Ok(stage)
    }

    pub fn is_mounted(&self) -> bool {
        self.backend.is_some()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> &VoxelScene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn phase(&self) -> CameraPhase {
        self.animator.phase()
    }

    pub fn frame_count(&self) -> u32 {
        self.animator.frame()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    pub fn is_revealed(&self) -> bool {
        self.elapsed >= self.config.reveal_delay
    }

    /// World transform of the scene root at the current time. The float sways
    /// the already positioned root, so it pivots about the world origin.
    pub fn root_transform(&self) -> Instance {
        match &self.config.float {
            Some(float) => &float_motion(float, self.elapsed) * &self.scene.root,
            None => self.scene.root,
        }
    }

    /// Pointer and wheel input for the orbit controls. Input that arrives
    /// during the flyover is dropped at handoff.
    pub fn handle_window_event(&mut self, event: &winit::event::WindowEvent) {
        if self.is_mounted() {
            self.orbit.handle_window_events(event);
        }
    }

    /// Zero sized regions show up during layout passes and are skipped.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Skipping resize to {}x{}", width, height);
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.resize(width, height);
        self.projection.resize(width, height);
        self.orbit.set_viewport_height(height);
    }

    /// Advance by one display frame and draw it.
    ///
    /// Returns `None` once the stage is unmounted; such calls change nothing.
    pub fn frame(&mut self, dt: Duration) -> anyhow::Result<Option<Tick>> {
        if !self.is_mounted() {
            return Ok(None);
        }
        self.elapsed += dt;

        let tick = self.animator.tick(&mut self.camera);
        if tick.handoff {
            self.orbit.sync_from(&self.camera);
            log::info!(
                "Flyover finished after {} frames, orbit controls engaged",
                self.config.flyover_frame_cap
            );
        }
        if tick.phase == CameraPhase::Orbit {
            self.orbit.update(&mut self.camera, dt);
            if self.config.projection == ProjectionKind::Orthographic {
                self.projection.set_zoom(self.orbit.zoom_factor());
            }
        }

        let root = self.root_transform();
        let revealed = self.is_revealed();
        if let Some(backend) = self.backend.as_mut() {
            backend.draw(&Frame {
                camera: &self.camera,
                projection: &self.projection,
                root: &root,
                revealed,
            })?;
        }
        Ok(Some(tick))
    }

    /// Release the backend. Safe to call any number of times.
    pub fn unmount(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.release();
            log::info!("Scene unmounted after {} frames", self.animator.frame());
        }
    }
}

impl<B: RenderBackend> Drop for Stage<B> {
    fn drop(&mut self) {
        self.unmount();
    }
}
