//! Voxels and colour identifiers.
//!
//! A [`Voxel`] is one unit cube at integer grid coordinates. Models are plain
//! `Vec<Voxel>`s; order only matters to the author, never to the renderer.

use std::{borrow::Cow, fmt};

use anyhow::{Context, bail};

/// An opaque colour identifier, usually a hex string such as `#ff4570`.
///
/// Colours are compared and hashed by their text, so two identifiers spelled the
/// same always land in the same batch no matter where they were created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const fn from_static(hex: &'static str) -> Self {
        Self(Cow::Borrowed(hex))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `#rrggbb` or `#rgb` into sRGB components in `0.0..=1.0`.
    pub fn to_srgb(&self) -> anyhow::Result<[f32; 3]> {
        let hex = self
            .0
            .strip_prefix('#')
            .with_context(|| format!("colour {:?} does not start with '#'", self.0))?;
        if !hex.is_ascii() {
            bail!("colour {:?} contains a non-hex channel", self.0);
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16)
                .map(|v| v as f32 / 255.0)
                .with_context(|| format!("colour {:?} contains a non-hex channel", self.0))
        };
        match hex.len() {
            6 => Ok([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok([expand(0)?, expand(1)?, expand(2)?])
            }
            _ => bail!("colour {:?} must have 3 or 6 hex digits", self.0),
        }
    }

    /// Linear RGB, ready for an sRGB render target.
    pub fn to_linear_rgb(&self) -> anyhow::Result<[f32; 3]> {
        Ok(self.to_srgb()?.map(srgb_to_linear))
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl From<&'static str> for Color {
    fn from(hex: &'static str) -> Self {
        Self::from_static(hex)
    }
}

impl From<String> for Color {
    fn from(hex: String) -> Self {
        Self(Cow::Owned(hex))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single coloured unit cube in model space.
///
/// `x` is the width axis, `y` the height and `z` the length; the front of the
/// car points towards negative `z`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Voxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: Color,
}

impl Voxel {
    pub fn new(x: i32, y: i32, z: i32, color: impl Into<Color>) -> Self {
        Self {
            x,
            y,
            z,
            color: color.into(),
        }
    }

    pub fn coords(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// World-space centre of this voxel for a given cell size.
    pub fn world_position(&self, voxel_size: f32) -> cgmath::Vector3<f32> {
        cgmath::Vector3::new(
            self.x as f32 * voxel_size,
            self.y as f32 * voxel_size,
            self.z as f32 * voxel_size,
        )
    }
}
