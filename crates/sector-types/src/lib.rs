pub mod camera;
pub mod design;
pub mod geometry;
pub mod options;
pub mod paths;

pub use camera::*;
pub use design::*;
pub use geometry::*;
pub use options::*;
pub use paths::{DirectoryKind, PathConfig, ResolvedDirectory};
