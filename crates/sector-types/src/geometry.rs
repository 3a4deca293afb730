use serde::{Deserialize, Serialize};

/// A 3D vector in the lab frame.
pub type Vec3 = [f64; 3];

/// A plane given by a normal and a point on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub origin: Vec3,
}

impl Plane {
    /// The XY plane through the lab origin. All comparison sections use it.
    pub const XY: Plane = Plane {
        normal: [0.0, 0.0, 1.0],
        origin: [0.0, 0.0, 0.0],
    };
}

impl Default for Plane {
    fn default() -> Self {
        Self::XY
    }
}

/// An RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f64; 3]);

impl Color {
    pub const GREEN: Color = Color([0.0, 1.0, 0.0]);
}

/// Coordinate system a derived part is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CoordinateSystem {
    /// The global laboratory frame.
    #[default]
    Lab,
}
