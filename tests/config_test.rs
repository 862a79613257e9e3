use std::f32::consts::PI;

use voxel_f1::{
    config::{FogConfig, GridConfig, PointLightConfig, SceneConfig},
    data_structures::voxel::Color,
};

#[test]
fn defaults_are_valid() {
    let config = SceneConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.voxel_size, 0.30);
    assert_eq!(config.flyover_frame_cap, 100);
    assert_eq!(config.clear_colour, Color::from("#0a0a14"));
}

#[test]
fn invalid_values_are_rejected() {
    let invalid = [
        SceneConfig::default().with_voxel_size(0.0),
        SceneConfig::default().with_voxel_size(-0.3),
        SceneConfig::default().with_voxel_size(f32::NAN),
        SceneConfig::default().with_flyover_frame_cap(0),
        SceneConfig::default().with_orbit_distance(30.0, 8.0),
        SceneConfig::default().with_orbit_distance(0.0, 8.0),
        SceneConfig::default().with_polar_angle(PI / 2.0, PI / 6.0),
        SceneConfig::default().with_polar_angle(-0.1, PI / 2.0),
        SceneConfig::default().with_polar_angle(0.0, 4.0),
        SceneConfig {
            clear_colour: Color::from("black"),
            ..Default::default()
        },
        SceneConfig {
            cube_fill: 1.5,
            ..Default::default()
        },
        SceneConfig::default().with_flyover_frame_cap(u32::MAX),
        SceneConfig::default().with_fog(Some(FogConfig {
            near: 40.0,
            far: 18.0,
            ..Default::default()
        })),
        SceneConfig::default().with_grid(Some(GridConfig {
            opacity: 1.5,
            ..Default::default()
        })),
        SceneConfig::default().with_grid(Some(GridConfig {
            color: Color::from("grey"),
            ..Default::default()
        })),
        {
            let mut config = SceneConfig::default();
            config
                .light
                .points
                .push(PointLightConfig::new([0.0, 1.0, 0.0], "#ffffff", 1.0));
            config
        },
    ];
    for config in invalid {
        assert!(config.validate().is_err(), "{:?} was accepted", config);
    }
}

#[test]
fn edge_values_are_accepted() {
    assert!(SceneConfig::default().with_orbit_distance(10.0, 10.0).validate().is_ok());
    assert!(SceneConfig::default().with_polar_angle(0.0, PI).validate().is_ok());
    assert!(SceneConfig::default().with_flyover_frame_cap(1).validate().is_ok());
    assert!(
        SceneConfig::default()
            .with_flyover_frame_cap(u32::MAX - 1)
            .validate()
            .is_ok()
    );
    assert!(
        SceneConfig::default()
            .with_fog(None)
            .with_grid(None)
            .validate()
            .is_ok()
    );
}

#[test]
fn default_scene_has_grid_fog_and_three_point_lights() {
    let config = SceneConfig::default();
    let grid = config.grid.unwrap();
    assert_eq!(grid.half_cells, 22);
    assert_eq!(grid.color, Color::from("#2a2a3a"));
    assert_eq!(grid.opacity, 0.2);

    let fog = config.fog.unwrap();
    assert_eq!(fog.color, Color::from("#0a0a14"));
    assert_eq!((fog.near, fog.far), (18.0, 40.0));

    let colours: Vec<_> = config.light.points.iter().map(|p| p.color.clone()).collect();
    assert_eq!(
        colours,
        [Color::from("#e94560"), Color::from("#4a90d9"), Color::from("#f0c040")]
    );
}
