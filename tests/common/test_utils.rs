use std::{cell::RefCell, rc::Rc};

use cgmath::Point3;
use voxel_f1::{
    data_structures::{instance::InstanceRaw, scene::VoxelScene},
    stage::{Frame, RenderBackend},
};

/// What a [`Recorder`] saw. Shared so it outlives the stage.
#[derive(Debug, Default)]
pub(crate) struct BackendLog {
    pub uploads: Vec<Vec<InstanceRaw>>,
    pub ground_lines: Option<usize>,
    pub resizes: Vec<(u32, u32)>,
    pub draws: Vec<DrawRecord>,
    pub release_invocations: u32,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DrawRecord {
    pub camera: Point3<f32>,
    pub revealed: bool,
    pub root_y: f32,
}

/// Headless backend that records every call instead of drawing.
pub(crate) struct Recorder {
    log: Rc<RefCell<BackendLog>>,
    size: (u32, u32),
    fail_upload: bool,
}

impl Recorder {
    pub fn new() -> (Self, Rc<RefCell<BackendLog>>) {
        let log = Rc::new(RefCell::new(BackendLog::default()));
        let recorder = Self {
            log: log.clone(),
            size: (0, 0),
            fail_upload: false,
        };
        (recorder, log)
    }

    pub fn failing() -> (Self, Rc<RefCell<BackendLog>>) {
        let (mut recorder, log) = Self::new();
        recorder.fail_upload = true;
        (recorder, log)
    }
}

impl RenderBackend for Recorder {
    fn load_scene(&mut self, scene: &mut VoxelScene) -> anyhow::Result<()> {
        if self.fail_upload {
            anyhow::bail!("no GPU in this test");
        }
        for batch in scene.batches.iter_mut() {
            let pending = batch
                .take_pending()
                .ok_or_else(|| anyhow::anyhow!("batch {} was never marked", batch.color()))?;
            self.log.borrow_mut().uploads.push(pending);
        }
        self.log.borrow_mut().ground_lines = scene.ground.as_ref().map(|grid| grid.line_count());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.log.borrow_mut().resizes.push((width, height));
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn draw(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        self.log.borrow_mut().draws.push(DrawRecord {
            camera: frame.camera.position,
            revealed: frame.revealed,
            root_y: frame.root.position.y,
        });
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().release_invocations += 1;
    }
}

pub(crate) const FRAME: instant::Duration = instant::Duration::from_millis(16);

pub(crate) fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
