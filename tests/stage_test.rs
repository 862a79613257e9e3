use instant::Duration;
use voxel_f1::{
    camera::animator::CameraPhase,
    config::{FloatConfig, ProjectionKind, SceneConfig},
    data_structures::{instance::Instance, scene::float_motion, voxel::Voxel},
    stage::Stage,
};

use crate::common::test_utils::{FRAME, Recorder, approx};

mod common;

fn mounted(config: SceneConfig) -> (Stage<Recorder>, std::rc::Rc<std::cell::RefCell<common::test_utils::BackendLog>>) {
    let (recorder, log) = Recorder::new();
    let stage = Stage::mount(recorder, config, 800, 600).unwrap();
    (stage, log)
}

fn run_frames(stage: &mut Stage<Recorder>, n: usize) {
    for _ in 0..n {
        stage.frame(FRAME).unwrap();
    }
}

#[test]
fn mounting_uploads_every_batch_once() {
    let (stage, log) = mounted(SceneConfig::default());
    assert!(stage.is_mounted());

    let log = log.borrow();
    assert_eq!(log.uploads.len(), 14);
    assert_eq!(log.uploads.iter().map(Vec::len).sum::<usize>(), 949);
    assert_eq!(log.resizes, [(800, 600)]);
    assert!(log.draws.is_empty());
    assert_eq!(log.release_invocations, 0);

    assert!(stage.scene().batches.iter().all(|b| !b.needs_update()));
}

#[test]
fn mounting_a_custom_model() {
    let (recorder, log) = Recorder::new();
    let voxels = [
        Voxel::new(0, 0, 0, "#ff0000"),
        Voxel::new(0, 1, 0, "#00ff00"),
    ];
    let stage = Stage::mount_model(recorder, SceneConfig::default(), &voxels, 320, 240).unwrap();
    assert_eq!(stage.scene().instance_count(), 2);
    assert_eq!(log.borrow().uploads.len(), 2);
}

#[test]
fn resize_is_exact_and_skips_empty_regions() {
    let (mut stage, log) = mounted(SceneConfig::default());

    stage.resize(1024, 768);
    stage.resize(0, 768);
    stage.resize(1024, 0);
    stage.resize(333, 777);

    assert_eq!(log.borrow().resizes, [(800, 600), (1024, 768), (333, 777)]);
    assert_eq!(stage.projection().size(), (333, 777));
    assert_eq!(stage.backend().map(|b| voxel_f1::RenderBackend::size(b)), Some((333, 777)));
}

#[test]
fn mounting_into_an_empty_region_waits_for_a_resize() {
    let (recorder, log) = Recorder::new();
    let mut stage = Stage::mount(recorder, SceneConfig::default(), 0, 0).unwrap();
    assert!(log.borrow().resizes.is_empty());
    stage.resize(640, 480);
    assert_eq!(log.borrow().resizes, [(640, 480)]);
}

#[test]
fn camera_flies_in_then_orbits() {
    let (mut stage, log) = mounted(SceneConfig::default());

    let mut handoffs = Vec::new();
    for i in 1..=200u32 {
        let tick = stage.frame(FRAME).unwrap().unwrap();
        if tick.handoff {
            handoffs.push(i);
        }
        if i <= 100 {
            assert_eq!(tick.phase, CameraPhase::Flyover);
        } else {
            assert_eq!(tick.phase, CameraPhase::Orbit);
        }
    }
    assert_eq!(handoffs, [101]);
    assert_eq!(stage.frame_count(), 101);
    assert_eq!(stage.phase(), CameraPhase::Orbit);

    let log = log.borrow();
    assert_eq!(log.draws.len(), 200);
    assert!(log.draws[..100].iter().all(|d| d.camera.y == 7.0));

    // no jump at the handoff
    let before = log.draws[99].camera;
    let after = log.draws[100].camera;
    assert!(cgmath::InnerSpace::magnitude(after - before) < 0.1);

    let config = stage.config();
    let distance = stage.camera().distance();
    assert!(distance >= config.min_orbit_distance - 1e-3);
    assert!(distance <= config.max_orbit_distance + 1e-3);
    assert!(approx(distance, stage.orbit().radius()));
}

#[test]
fn orthographic_zoom_starts_neutral_at_handoff() {
    let (mut stage, _) = mounted(SceneConfig::default());
    run_frames(&mut stage, 150);
    assert!(approx(stage.projection().zoom(), 1.0));
}

#[test]
fn perspective_projection_moves_the_camera_instead() {
    let config = SceneConfig::default().with_projection(ProjectionKind::Perspective {
        fovy: cgmath::Deg(45.0),
    });
    let (mut stage, _) = mounted(config);
    run_frames(&mut stage, 150);
    assert_eq!(stage.projection().zoom(), 1.0);
}

#[test]
fn model_is_revealed_after_the_delay() {
    let (mut stage, log) = mounted(SceneConfig::default());
    assert!(!stage.is_revealed());

    run_frames(&mut stage, 62);
    assert!(!stage.is_revealed());
    run_frames(&mut stage, 1);
    assert!(stage.is_revealed());

    let log = log.borrow();
    assert!(log.draws[..62].iter().all(|d| !d.revealed));
    assert!(log.draws[62].revealed);
}

#[test]
fn zero_delay_reveals_on_the_first_frame() {
    let (mut stage, log) = mounted(SceneConfig::default().with_reveal_delay(Duration::ZERO));
    run_frames(&mut stage, 1);
    assert!(log.borrow().draws[0].revealed);
}

#[test]
fn floating_moves_the_root() {
    let (mut stage, log) = mounted(SceneConfig::default());
    run_frames(&mut stage, 300);
    let log = log.borrow();
    let first = log.draws[0].root_y;
    assert!(log.draws.iter().any(|d| (d.root_y - first).abs() > 1e-3));
    assert!(log.draws.iter().all(|d| (d.root_y + 1.5).abs() <= 0.03));
}

#[test]
fn without_floating_the_root_stays_put() {
    let (mut stage, log) = mounted(SceneConfig::default().with_float(None));
    run_frames(&mut stage, 300);
    assert!(log.borrow().draws.iter().all(|d| d.root_y == -1.5));
}

#[test]
fn floating_sways_the_root_about_the_world_origin() {
    let (mut stage, _log) = mounted(SceneConfig::default());
    run_frames(&mut stage, 188);

    let root = stage.root_transform();
    let offset = Instance::from(cgmath::Vector3::new(0.0, -1.5, 0.0));
    let expected = &float_motion(&FloatConfig::default(), stage.elapsed()) * &offset;
    assert!(approx(root.position.x, expected.position.x));
    assert!(approx(root.position.y, expected.position.y));
    assert!(approx(root.position.z, expected.position.z));

    // the tilt swings the lowered root sideways
    assert!(root.position.x > 5e-3);
    assert!(root.position.z < -1e-2);
}

#[test]
fn mounting_uploads_the_ground_grid() {
    let (stage, log) = mounted(SceneConfig::default());
    assert_eq!(log.borrow().ground_lines, Some(90));
    let ground = stage.scene().ground.as_ref().unwrap();
    assert_eq!(ground.height, -1.5);
    assert_eq!(ground.spacing, 0.30);

    let (stage, log) = mounted(SceneConfig::default().with_grid(None));
    assert_eq!(log.borrow().ground_lines, None);
    assert!(stage.scene().ground.is_none());
}

fn unmount_after(frames: usize) {
    let (mut stage, log) = mounted(SceneConfig::default());
    run_frames(&mut stage, frames);
    let draws = log.borrow().draws.len();
    let frame_count = stage.frame_count();

    stage.unmount();
    assert!(!stage.is_mounted());
    assert_eq!(log.borrow().release_invocations, 1);

    // later callbacks change nothing
    assert!(stage.frame(FRAME).unwrap().is_none());
    stage.resize(1920, 1080);
    stage.unmount();
    assert_eq!(stage.frame_count(), frame_count);

    drop(stage);
    let log = log.borrow();
    assert_eq!(log.release_invocations, 1);
    assert_eq!(log.draws.len(), draws);
    assert_eq!(log.resizes.last(), Some(&(800, 600)));
}

#[test]
fn unmount_before_the_first_frame() {
    unmount_after(0);
}

#[test]
fn unmount_during_the_flyover() {
    unmount_after(50);
}

#[test]
fn unmount_while_orbiting() {
    unmount_after(500);
}

#[test]
fn dropping_the_stage_releases_the_backend() {
    let (mut stage, log) = mounted(SceneConfig::default());
    run_frames(&mut stage, 10);
    drop(stage);
    assert_eq!(log.borrow().release_invocations, 1);
}

#[test]
fn failed_upload_releases_the_backend() {
    let (recorder, log) = Recorder::failing();
    let result = Stage::mount(recorder, SceneConfig::default(), 800, 600);
    assert!(result.is_err());
    assert_eq!(log.borrow().release_invocations, 1);
    assert!(log.borrow().resizes.is_empty());
}

#[test]
fn invalid_configuration_is_rejected() {
    let (recorder, log) = Recorder::new();
    let result = Stage::mount(
        recorder,
        SceneConfig::default().with_voxel_size(0.0),
        800,
        600,
    );
    assert!(result.is_err());
    assert!(log.borrow().uploads.is_empty());
    assert_eq!(log.borrow().release_invocations, 1);
}
