use std::collections::{HashMap, HashSet};

use voxel_f1::{
    data_structures::voxel::{Color, Voxel},
    resources::{
        cube::cube_geometry,
        f1::{self, palette},
        fill_rect, fill_row,
    },
};

mod common;

fn count_of(voxels: &[Voxel], color: &Color) -> usize {
    voxels.iter().filter(|v| &v.color == color).count()
}

fn contains(voxels: &[Voxel], x: i32, y: i32, z: i32, color: &Color) -> bool {
    voxels
        .iter()
        .any(|v| v.coords() == [x, y, z] && &v.color == color)
}

#[test]
fn fill_row_is_inclusive() {
    let row = fill_row(-3, 2, -2, 2, &palette::RED);
    assert_eq!(row.len(), 5);
    assert_eq!(row.first().map(Voxel::coords), Some([-2, 2, -3]));
    assert_eq!(row.last().map(Voxel::coords), Some([2, 2, -3]));
    assert!(row.iter().all(|v| v.color == palette::RED));
}

#[test]
fn fill_row_with_reversed_bounds_is_empty() {
    assert!(fill_row(0, 0, 3, 2, &palette::RED).is_empty());
}

#[test]
fn fill_rect_walks_z_then_x() {
    let rect = fill_rect(-15, 0, -6, 6, -14, &palette::BODY_DARK);
    assert_eq!(rect.len(), 26);
    assert_eq!(rect[0].coords(), [-6, 0, -15]);
    assert_eq!(rect[12].coords(), [6, 0, -15]);
    assert_eq!(rect[13].coords(), [-6, 0, -14]);
}

#[test]
fn generation_is_deterministic() {
    assert_eq!(f1::generate(), f1::generate());
}

#[test]
fn car_has_expected_size_and_livery() {
    let car = f1::generate();
    assert_eq!(car.len(), 949);

    let expected = [
        (palette::BODY_DARK, 190),
        (palette::RED, 80),
        (palette::ENDPLATE, 42),
        (palette::BODY_MID, 129),
        (palette::BODY_LIGHT, 68),
        (palette::METAL, 47),
        (palette::TIRE, 180),
        (palette::TIRE_INNER, 36),
        (palette::FLOOR, 112),
        (palette::COCKPIT, 15),
        (palette::METAL_LIGHT, 8),
        (palette::RED_DARK, 25),
        (palette::YELLOW, 16),
        (palette::WHITE, 1),
    ];
    for (color, count) in expected {
        assert_eq!(count_of(&car, &color), count, "{}", color);
    }

    let used: HashSet<&Color> = car.iter().map(|v| &v.color).collect();
    assert_eq!(used.len(), palette::all().len());
}

#[test]
fn car_fits_its_bounding_box() {
    let car = f1::generate();
    let xs = car.iter().map(|v| v.x);
    let ys = car.iter().map(|v| v.y);
    let zs = car.iter().map(|v| v.z);
    assert_eq!((xs.clone().min(), xs.max()), (Some(-7), Some(7)));
    assert_eq!((ys.clone().min(), ys.max()), (Some(0), Some(6)));
    assert_eq!((zs.clone().min(), zs.max()), (Some(-15), Some(12)));
}

#[test]
fn car_keeps_overlapping_voxels() {
    let car = f1::generate();
    let unique: HashSet<[i32; 3]> = car.iter().map(Voxel::coords).collect();
    assert_eq!(unique.len(), 908);
    assert!(unique.len() < car.len());
}

#[test]
fn car_is_mirror_symmetric() {
    let car = f1::generate();
    let mut counts: HashMap<(i32, i32, i32, &Color), usize> = HashMap::new();
    for v in &car {
        *counts.entry((v.x, v.y, v.z, &v.color)).or_default() += 1;
    }
    for ((x, y, z, color), n) in &counts {
        assert_eq!(
            counts.get(&(-x, *y, *z, *color)),
            Some(n),
            "{} at {:?} has no mirror image",
            color,
            (x, y, z)
        );
    }
}

#[test]
fn car_starts_at_the_front_wing_and_ends_with_the_skid_blocks() {
    let car = f1::generate();
    assert_eq!(car.first(), Some(&Voxel::new(-6, 0, -15, palette::BODY_DARK)));
    assert_eq!(car.last(), Some(&Voxel::new(1, 0, 4, palette::YELLOW)));
}

#[test]
fn car_has_its_landmarks() {
    let car = f1::generate();
    // nose number
    assert!(contains(&car, 0, 3, -8, &palette::WHITE));
    assert!(contains(&car, 0, 2, -8, &palette::YELLOW));
    // airbox
    assert!(contains(&car, 0, 6, -4, &palette::RED));
    // wing endplates
    assert!(contains(&car, 7, 0, -15, &palette::ENDPLATE));
    assert!(contains(&car, -7, 6, 12, &palette::ENDPLATE));
    // rear tires are wider than the front ones
    assert!(contains(&car, 7, 1, 9, &palette::TIRE));
    assert!(!contains(&car, 7, 1, -8, &palette::TIRE));
    assert!(contains(&car, 6, 1, -8, &palette::TIRE));
}

#[test]
fn palette_colours_parse() {
    for color in palette::all() {
        assert!(color.to_srgb().is_ok(), "{}", color);
    }
}

#[test]
fn colour_parsing() {
    let [r, g, b] = Color::from("#0a0a14").to_srgb().unwrap();
    assert!(common::test_utils::approx(r, 10.0 / 255.0));
    assert!(common::test_utils::approx(g, 10.0 / 255.0));
    assert!(common::test_utils::approx(b, 20.0 / 255.0));

    assert_eq!(Color::from("#fff").to_srgb().unwrap(), [1.0, 1.0, 1.0]);
    assert_eq!(Color::from("#000000").to_linear_rgb().unwrap(), [0.0, 0.0, 0.0]);
    for c in Color::from("#ffffff").to_linear_rgb().unwrap() {
        assert!(common::test_utils::approx(c, 1.0));
    }
    // mid grey is darker in linear space
    let [grey, _, _] = Color::from("#808080").to_linear_rgb().unwrap();
    assert!(grey > 0.2 && grey < 0.25);

    assert!(Color::from("red").to_srgb().is_err());
    assert!(Color::from("#12345").to_srgb().is_err());
    assert!(Color::from("#gg0000").to_srgb().is_err());
    assert!(Color::from(String::from("#aé")).to_srgb().is_err());
}

#[test]
fn colours_compare_by_text() {
    assert_eq!(Color::from("#ff4570"), Color::from(String::from("#ff4570")));
    assert_eq!(palette::RED, Color::from("#ff4570"));
    assert_ne!(Color::from("#FF4570"), palette::RED);
}

#[test]
fn cube_has_flat_outward_faces() {
    let edge = 0.3 * 0.95;
    let (vertices, indices) = cube_geometry(edge);
    assert_eq!(vertices.len(), 24);
    assert_eq!(indices.len(), 36);

    for v in &vertices {
        for c in v.position {
            assert!(common::test_utils::approx(c.abs(), edge / 2.0));
        }
    }

    for tri in indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| {
            let p = vertices[i as usize].position;
            cgmath::Vector3::new(p[0], p[1], p[2])
        });
        let n = vertices[tri[0] as usize].normal;
        let face_normal = (b - a).cross(c - a);
        let facing = face_normal.x * n[0] + face_normal.y * n[1] + face_normal.z * n[2];
        assert!(facing > 0.0, "triangle {:?} winds inwards", tri);
        // every corner lies on the plane of its face
        let along = a.x * n[0] + a.y * n[1] + a.z * n[2];
        assert!(common::test_utils::approx(along, edge / 2.0));
    }
}
