use crate::geometry::surface::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Relationship of a ray with a plane.
#[derive(Debug)]
pub enum RayPlaneRelation {
    /// Ray line crosses the plane at a single point.
    Point { point: Point3, t: f64 },
    /// Ray is parallel to the plane (denominator below tolerance).
    Parallel,
    /// Ray lies entirely on the plane.
    OnPlane,
}

/// Intersects the line `origin + t * dir` with a plane.
///
/// `t` is unrestricted in sign, so a hit behind the origin is still reported.
/// When `|normal · dir|` falls below [`TOLERANCE`] no division happens and
/// [`RayPlaneRelation::Parallel`] or [`RayPlaneRelation::OnPlane`] is returned.
#[must_use]
pub fn ray_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> RayPlaneRelation {
    let normal = plane.plane_normal();
    let denom = normal.dot(dir);

    let diff = plane.origin() - origin;
    let numer = normal.dot(&diff);

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            RayPlaneRelation::OnPlane
        } else {
            RayPlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        RayPlaneRelation::Point {
            point: origin + dir * t,
            t,
        }
    }
}

/// Signed distance from a point to a plane.
/// Positive = on the normal side, negative = opposite.
#[must_use]
pub fn signed_distance_to_plane(point: &Point3, plane: &Plane) -> f64 {
    plane.plane_normal().dot(&(point - plane.origin()))
}
