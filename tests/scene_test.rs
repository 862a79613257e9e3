use cgmath::Vector3;
use instant::Duration;
use voxel_f1::{
    config::FloatConfig,
    data_structures::{
        batch::InstanceBatch,
        scene::{SceneBuilder, float_motion, group_by_color},
        voxel::{Color, Voxel},
    },
    resources::f1::{self, palette},
};

use crate::common::test_utils::approx;

mod common;

#[test]
fn empty_model_builds_an_empty_scene() {
    let scene = SceneBuilder::new(0.3).build(&[]).unwrap();
    assert!(scene.batches.is_empty());
    assert_eq!(scene.instance_count(), 0);
}

#[test]
fn groups_follow_first_seen_colour_order() {
    let voxels = [
        Voxel::new(0, 0, 0, "#000002"),
        Voxel::new(1, 0, 0, "#000001"),
        Voxel::new(2, 0, 0, "#000002"),
        Voxel::new(3, 0, 0, "#000003"),
        Voxel::new(4, 0, 0, "#000001"),
    ];
    let groups = group_by_color(&voxels, 1.0);
    let colours: Vec<&str> = groups.iter().map(|g| g.color.as_str()).collect();
    assert_eq!(colours, ["#000002", "#000001", "#000003"]);
    assert_eq!(
        groups[0].positions,
        [Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0)]
    );
    assert_eq!(
        groups[1].positions,
        [Vector3::new(1.0, 0.0, 0.0), Vector3::new(4.0, 0.0, 0.0)]
    );
}

#[test]
fn coincident_voxels_are_all_kept() {
    let voxels = [
        Voxel::new(1, 1, 1, palette::RED),
        Voxel::new(1, 1, 1, palette::RED),
        Voxel::new(1, 1, 1, palette::WHITE),
    ];
    let scene = SceneBuilder::new(0.3).build(&voxels).unwrap();
    assert_eq!(scene.batches.len(), 2);
    assert_eq!(scene.batches[0].len(), 2);
    assert_eq!(scene.batches[1].len(), 1);
    assert_eq!(scene.instance_count(), 3);
}

#[test]
fn batches_partition_the_car() {
    let car = f1::generate();
    let scene = SceneBuilder::new(0.3).build(&car).unwrap();

    assert_eq!(scene.batches.len(), 14);
    assert_eq!(scene.instance_count(), car.len());

    let order: Vec<&Color> = scene.batches.iter().map(InstanceBatch::color).collect();
    assert_eq!(
        order,
        [
            &palette::BODY_DARK,
            &palette::RED,
            &palette::ENDPLATE,
            &palette::BODY_MID,
            &palette::BODY_LIGHT,
            &palette::METAL,
            &palette::TIRE,
            &palette::TIRE_INNER,
            &palette::FLOOR,
            &palette::COCKPIT,
            &palette::METAL_LIGHT,
            &palette::RED_DARK,
            &palette::YELLOW,
            &palette::WHITE,
        ]
    );
    for batch in &scene.batches {
        let expected = car.iter().filter(|v| &v.color == batch.color()).count();
        assert_eq!(batch.len(), expected, "{}", batch.color());
    }
}

#[test]
fn instances_sit_at_scaled_grid_positions() {
    let voxels = [Voxel::new(2, 3, -4, palette::METAL)];
    let mut scene = SceneBuilder::new(0.3).build(&voxels).unwrap();

    let position = scene.batches[0].instances()[0].position;
    assert!(approx(position.x, 0.6));
    assert!(approx(position.y, 0.9));
    assert!(approx(position.z, -1.2));

    let raw = scene.batches[0].take_pending().unwrap();
    let [x, y, z] = raw[0].translation();
    assert!(approx(x, 0.6) && approx(y, 0.9) && approx(z, -1.2));
}

#[test]
fn scene_root_lowers_the_model() {
    let voxels = [Voxel::new(1, 5, 0, palette::METAL)];
    let scene = SceneBuilder::new(0.3)
        .with_origin((0.0, -1.5, 0.0))
        .build(&voxels)
        .unwrap();
    let world: Vec<_> = scene.world_transforms().collect();
    assert_eq!(world.len(), 1);
    assert!(approx(world[0].position.x, 0.3));
    assert!(approx(world[0].position.y, 0.0));
    assert!(approx(world[0].position.z, 0.0));
}

#[test]
fn built_batches_are_marked_for_upload_once() {
    let mut scene = SceneBuilder::new(0.3).build(&f1::generate()).unwrap();
    for batch in scene.batches.iter_mut() {
        assert!(batch.needs_update());
        let pending = batch.take_pending().unwrap();
        assert_eq!(pending.len(), batch.len());
        assert!(!batch.needs_update());
        assert!(batch.take_pending().is_none());
    }
}

#[test]
fn writes_clear_the_upload_mark() {
    let mut batch = InstanceBatch::new(palette::RED, 2);
    assert!(batch.take_pending().is_none());

    batch.set_translation(0, Vector3::new(1.0, 0.0, 0.0)).unwrap();
    batch.mark_needs_update();
    batch.set_translation(1, Vector3::new(2.0, 0.0, 0.0)).unwrap();
    assert!(!batch.needs_update());
    assert!(batch.take_pending().is_none());

    batch.mark_needs_update();
    let pending = batch.take_pending().unwrap();
    assert_eq!(pending[1].translation(), [2.0, 0.0, 0.0]);
}

#[test]
fn writes_outside_the_batch_fail() {
    let mut batch = InstanceBatch::new(palette::RED, 1);
    assert!(batch.set_translation(1, Vector3::new(0.0, 0.0, 0.0)).is_err());
    assert!(InstanceBatch::new(palette::RED, 0)
        .set_translation(0, Vector3::new(0.0, 0.0, 0.0))
        .is_err());
}

#[test]
fn floating_stays_within_its_range() {
    let float = FloatConfig::default();
    let limit = float.range.1 * float.intensity + 1e-5;

    let rest = float_motion(&float, Duration::ZERO);
    assert!(approx(rest.position.y, 0.0));

    let mut moved = false;
    for ms in (0..20_000).step_by(50) {
        let motion = float_motion(&float, Duration::from_millis(ms));
        assert!(motion.position.y.abs() <= limit, "{} at {}ms", motion.position.y, ms);
        assert_eq!(motion.position.x, 0.0);
        assert_eq!(motion.position.z, 0.0);
        moved |= motion.position.y.abs() > limit / 2.0;
    }
    assert!(moved);
}
