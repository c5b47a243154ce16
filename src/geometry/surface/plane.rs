use crate::error::{GeometryError, Result};
use crate::math::{try_normalize, Point3, Vector3};

use super::{Surface, SurfaceDomain};

/// A cutting plane through a sweep station.
///
/// Stored as a point and a unit normal. In-plane axes are derived on demand
/// so the plane can also be sampled as a surface: `P(u, v) = origin + u * u_dir + v * v_dir`
/// with `u_dir x v_dir = normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane through `origin` with the given normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let normal = try_normalize(&normal).ok_or(GeometryError::ZeroVector)?;
        Ok(Self { origin, normal })
    }

    /// Returns the point the plane passes through.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns an in-plane unit axis, picked against the world axis least
    /// aligned with the normal.
    #[must_use]
    pub fn u_dir(&self) -> Vector3 {
        let reference = if self.normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        self.normal.cross(&reference).normalize()
    }

    /// Returns the second in-plane axis, `normal x u_dir`.
    #[must_use]
    pub fn v_dir(&self) -> Vector3 {
        self.normal.cross(&self.u_dir())
    }

    /// Orthogonally projects `p` onto the plane.
    #[must_use]
    pub fn project(&self, p: &Point3) -> Point3 {
        p - self.normal * self.normal.dot(&(p - self.origin))
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.origin + self.u_dir() * u + self.v_dir() * v)
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.normal)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_is_normalized() {
        let p = Plane::from_normal(Point3::origin(), Vector3::new(0.0, 0.0, 5.0)).unwrap();
        assert_relative_eq!(*p.plane_normal(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn zero_normal_fails() {
        assert!(Plane::from_normal(Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn axes_are_right_handed() {
        let p = Plane::from_normal(Point3::origin(), Vector3::new(1.0, 2.0, 3.0)).unwrap();
        let (u, v, n) = (p.u_dir(), p.v_dir(), *p.plane_normal());
        assert!(u.dot(&n).abs() < 1e-12);
        assert!(v.dot(&n).abs() < 1e-12);
        assert_relative_eq!(u.cross(&v), n, epsilon = 1e-12);
    }

    #[test]
    fn evaluated_points_lie_on_plane() {
        let p = Plane::from_normal(Point3::new(1.0, 1.0, 1.0), Vector3::x()).unwrap();
        let q = p.evaluate(2.5, -1.0).unwrap();
        assert!((q.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn projection_drops_normal_component() {
        let p = Plane::from_normal(Point3::new(0.0, 0.0, 2.0), Vector3::z()).unwrap();
        let q = p.project(&Point3::new(3.0, 4.0, 10.0));
        assert_relative_eq!(q, Point3::new(3.0, 4.0, 2.0), epsilon = 1e-12);
    }
}
