pub mod barycentric;
pub mod intersect_3d;

pub use barycentric::{barycentric, center_on_origin};

/// 2D point type (UV coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Normalizes `v`, returning `None` when its length is below [`TOLERANCE`].
#[must_use]
pub fn try_normalize(v: &Vector3) -> Option<Vector3> {
    v.try_normalize(TOLERANCE)
}
