use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Projection {
    Perspective,
    Parallel,
}

/// Fixed camera placement applied before every capture.
///
/// The same value is used for every design, so renders stay comparable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Parallel-projection scale.
    pub magnification: f64,
    pub projection: Projection,
    /// View angle in degrees, used for perspective projection.
    pub view_angle_deg: f64,
}

impl CameraPose {
    /// The sector side view the picture flow has always used.
    pub const SECTOR_SIDE_VIEW: CameraPose = CameraPose {
        eye: [0.02787872615929598, 9.212431862836573E-4, -0.008763404275169969],
        target: [0.02787872615929598, -0.12411595435289759, -0.008763404275169931],
        up: [0.0, 3.074859849441974E-16, 1.0],
        magnification: 0.016963164754689935,
        projection: Projection::Parallel,
        view_angle_deg: 30.0,
    };

    /// True when every component matches bit for bit.
    pub fn bit_identical(&self, other: &CameraPose) -> bool {
        let vec_eq = |a: &Vec3, b: &Vec3| a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits());
        vec_eq(&self.eye, &other.eye)
            && vec_eq(&self.target, &other.target)
            && vec_eq(&self.up, &other.up)
            && self.magnification.to_bits() == other.magnification.to_bits()
            && self.projection == other.projection
            && self.view_angle_deg.to_bits() == other.view_angle_deg.to_bits()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::SECTOR_SIDE_VIEW
    }
}

/// Raster output settings for a scene capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub width: u32,
    pub height: u32,
    /// Supersampling factor passed to the renderer.
    pub supersample: u32,
    pub antialias: bool,
    pub transparent_background: bool,
}

impl Default for ImageRequest {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            supersample: 1,
            antialias: true,
            transparent_background: false,
        }
    }
}
