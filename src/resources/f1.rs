//! Procedural Formula 1 car.
//!
//! The car is roughly 30 cells long (`z` from -15 to 12), 15 wide and 7 tall.
//! Each anatomical section is authored on its own and appended in a fixed
//! order, so [`generate`] always returns the same sequence.

use crate::{
    data_structures::voxel::{Color, Voxel},
    resources::{fill_rect, fill_row},
};

/// Livery of the car.
pub mod palette {
    use crate::data_structures::voxel::Color;

    pub const BODY_DARK: Color = Color::from_static("#2a2a4e");
    pub const BODY_MID: Color = Color::from_static("#3642aa");
    pub const BODY_LIGHT: Color = Color::from_static("#4f6aff");
    pub const RED: Color = Color::from_static("#ff4570");
    pub const RED_DARK: Color = Color::from_static("#e82e55");
    pub const TIRE: Color = Color::from_static("#3c3c3c");
    pub const TIRE_INNER: Color = Color::from_static("#5a5a5a");
    pub const METAL: Color = Color::from_static("#7a7a9a");
    pub const METAL_LIGHT: Color = Color::from_static("#9e9ebe");
    pub const FLOOR: Color = Color::from_static("#333344");
    pub const COCKPIT: Color = Color::from_static("#1a1a34");
    pub const ENDPLATE: Color = Color::from_static("#444455");
    pub const WHITE: Color = Color::from_static("#ffffff");
    pub const YELLOW: Color = Color::from_static("#ffdd55");

    pub fn all() -> [Color; 14] {
        [
            BODY_DARK, BODY_MID, BODY_LIGHT, RED, RED_DARK, TIRE, TIRE_INNER, METAL,
            METAL_LIGHT, FLOOR, COCKPIT, ENDPLATE, WHITE, YELLOW,
        ]
    }
}

use palette::*;

/// Build the complete car.
pub fn generate() -> Vec<Voxel> {
    let mut car = Builder::default();
    car.front_wing();
    car.nose_cone();
    car.front_suspension();
    car.front_tires();
    car.monocoque();
    car.sidepods();
    car.cockpit();
    car.engine_cover();
    car.rear_suspension();
    car.rear_tires();
    car.diffuser();
    car.rear_wing();
    car.rear_light();
    car.nose_number();
    car.floor_details();
    car.voxels
}

#[derive(Default)]
struct Builder {
    voxels: Vec<Voxel>,
}

impl Builder {
    fn put(&mut self, x: i32, y: i32, z: i32, color: &Color) {
        self.voxels.push(Voxel::new(x, y, z, color.clone()));
    }

    fn row(&mut self, z: i32, y: i32, x_from: i32, x_to: i32, color: &Color) {
        self.voxels.extend(fill_row(z, y, x_from, x_to, color));
    }

    fn rect(&mut self, z: i32, y: i32, x_from: i32, x_to: i32, z_to: i32, color: &Color) {
        self.voxels.extend(fill_rect(z, y, x_from, x_to, z_to, color));
    }

    /// Puts the same voxel on both sides of the centre line.
    fn mirrored(&mut self, x: i32, y: i32, z: i32, color: &Color) {
        self.put(-x, y, z, color);
        self.put(x, y, z, color);
    }

    fn front_wing(&mut self) {
        self.rect(-15, 0, -6, 6, -14, &BODY_DARK);
        self.rect(-15, 1, -6, 6, -14, &RED);
        for z in -15..=-13 {
            for y in 0..=2 {
                self.mirrored(7, y, z, &ENDPLATE);
            }
        }
        // connection to the nose tip
        self.row(-13, 1, -2, 2, &RED);
        self.row(-13, 0, -2, 2, &BODY_DARK);
    }

    fn nose_cone(&mut self) {
        self.rect(-12, 1, -2, 2, -9, &BODY_DARK);
        self.rect(-12, 2, -1, 1, -11, &BODY_MID);
        self.rect(-10, 2, -2, 2, -9, &BODY_MID);
        // stripe
        self.row(-12, 2, -1, 1, &RED);
        self.row(-11, 2, -1, 1, &RED);
        self.rect(-10, 3, -1, 1, -9, &BODY_LIGHT);
    }

    fn front_suspension(&mut self) {
        for z in -10..=-8 {
            self.mirrored(3, 1, z, &METAL);
        }
    }

    /// A tire spans `inner..=outer` on the positive side and is mirrored.
    /// Top and bottom rows are narrower to round the profile.
    fn tire(&mut self, z_from: i32, z_to: i32, outer: i32) {
        for z in z_from..=z_to {
            for y in 0..=3 {
                if y == 0 || y == 3 {
                    self.mirrored(5, y, z, &TIRE);
                    self.mirrored(4, y, z, &TIRE);
                } else {
                    for x in (6..=outer).rev() {
                        self.mirrored(x, y, z, &TIRE);
                    }
                    self.mirrored(5, y, z, &TIRE_INNER);
                    self.mirrored(4, y, z, &TIRE);
                    if outer == 6 {
                        self.mirrored(3, y, z, &TIRE);
                    }
                }
            }
        }
    }

    fn front_tires(&mut self) {
        self.tire(-11, -8, 6);
    }

    fn monocoque(&mut self) {
        self.rect(-8, 1, -3, 3, 4, &FLOOR);
        for z in -8..=4 {
            self.mirrored(3, 2, z, &BODY_DARK);
            self.mirrored(2, 2, z, &BODY_MID);
            self.row(z, 2, -1, 1, &BODY_MID);
        }
        for z in -8..=4 {
            self.mirrored(3, 3, z, &BODY_DARK);
        }
    }

    fn sidepods(&mut self) {
        for z in -4..=3 {
            self.mirrored(4, 2, z, &BODY_DARK);
            self.mirrored(4, 3, z, &BODY_MID);
            if (-3..=2).contains(&z) {
                self.mirrored(4, 4, z, &BODY_LIGHT);
            }
        }
        for z in -3..=2 {
            self.row(z, 4, -3, 3, &BODY_LIGHT);
        }
        // inlets
        self.mirrored(4, 3, -4, &RED);
        self.mirrored(4, 4, -4, &RED);
    }

    fn cockpit(&mut self) {
        for z in -7..=-3 {
            self.row(z, 3, -1, 1, &COCKPIT);
        }
        for z in -7..=-3 {
            self.mirrored(2, 3, z, &BODY_MID);
        }
        self.row(-7, 3, -2, 2, &BODY_MID);
        self.row(-3, 3, -2, 2, &BODY_MID);

        // halo
        self.row(-7, 4, -1, 1, &METAL);
        self.row(-7, 5, -1, 1, &METAL_LIGHT);
        for z in -6..=-3 {
            self.mirrored(2, 4, z, &METAL);
        }
        self.row(-5, 5, -2, 2, &METAL_LIGHT);

        // headrest
        self.put(0, 4, -3, &BODY_DARK);
        self.put(0, 5, -3, &RED);
        self.mirrored(1, 4, -3, &BODY_DARK);
    }

    fn engine_cover(&mut self) {
        // airbox above the driver
        self.put(0, 5, -4, &BODY_DARK);
        self.put(0, 6, -4, &RED);
        self.mirrored(1, 5, -4, &BODY_DARK);

        for z in -3..=4 {
            self.put(0, 5, z, &BODY_LIGHT);
            if z <= 2 {
                self.mirrored(1, 5, z, &BODY_MID);
            }
        }
        for z in -2..=3 {
            self.put(0, 6, z, &RED);
        }
    }

    fn rear_suspension(&mut self) {
        for z in 5..=7 {
            self.mirrored(3, 1, z, &METAL);
            self.mirrored(3, 2, z, &METAL);
        }
        // gearbox
        self.rect(5, 2, -2, 2, 8, &BODY_DARK);
        self.rect(5, 3, -1, 1, 7, &BODY_DARK);
    }

    fn rear_tires(&mut self) {
        self.tire(5, 9, 7);
    }

    fn diffuser(&mut self) {
        self.rect(8, 1, -3, 3, 10, &FLOOR);
        self.row(9, 2, -2, 2, &BODY_DARK);
        self.row(10, 2, -2, 2, &BODY_DARK);
        for z in 8..=10 {
            self.mirrored(3, 2, z, &METAL);
        }
    }

    fn rear_wing(&mut self) {
        self.rect(11, 5, -6, 6, 12, &RED);
        self.rect(11, 4, -6, 6, 12, &BODY_DARK);
        self.rect(10, 6, -5, 5, 11, &RED_DARK);
        // DRS flap
        self.row(12, 6, -4, 4, &YELLOW);

        for z in 10..=12 {
            for y in 3..=6 {
                self.mirrored(7, y, z, &ENDPLATE);
            }
        }
        for y in 3..=4 {
            self.mirrored(1, y, 10, &METAL);
            self.put(0, y, 10, &METAL);
        }
    }

    fn rear_light(&mut self) {
        self.row(12, 3, -2, 2, &RED);
        self.row(12, 2, -1, 1, &RED_DARK);
    }

    fn nose_number(&mut self) {
        self.put(0, 3, -8, &WHITE);
        self.put(0, 2, -8, &YELLOW);
    }

    fn floor_details(&mut self) {
        // bargeboards
        for z in -6..=-4 {
            self.mirrored(3, 1, z, &METAL);
        }
        // skid blocks
        self.row(-2, 0, -1, 1, &YELLOW);
        self.row(4, 0, -1, 1, &YELLOW);
    }
}
