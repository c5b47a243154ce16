use crate::error::{GeometryError, Result};
use crate::geometry::curve::DifferentiableCurve;
use crate::math::{try_normalize, Point3, Vector3, TOLERANCE};

/// A moving frame on a curve: position plus a right-handed orthonormal basis
/// with `binormal = tangent x normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Point3,
    pub tangent: Vector3,
    pub normal: Vector3,
    pub binormal: Vector3,
}

impl Frame {
    /// Builds a frame from a position and tangent, deriving the normal from
    /// `reference` by Gram-Schmidt rejection.
    ///
    /// If `reference` is (nearly) parallel to the tangent, the world axis least
    /// aligned with the tangent is used instead.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `tangent` is zero-length.
    pub fn from_reference(position: Point3, tangent: Vector3, reference: Vector3) -> Result<Self> {
        let tangent = try_normalize(&tangent).ok_or(GeometryError::ZeroVector)?;
        let normal = try_normalize(&reject(&reference, &tangent)).unwrap_or_else(|| {
            let fallback = least_aligned_axis(&tangent);
            reject(&fallback, &tangent).normalize()
        });
        Ok(Self {
            position,
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        })
    }

    /// Checks that the three axes are unit length and mutually orthogonal
    /// within `eps`, and that the basis is right-handed.
    #[must_use]
    pub fn is_orthonormal(&self, eps: f64) -> bool {
        let unit = |v: &Vector3| (v.norm() - 1.0).abs() <= eps;
        unit(&self.tangent)
            && unit(&self.normal)
            && unit(&self.binormal)
            && self.tangent.dot(&self.normal).abs() <= eps
            && self.tangent.dot(&self.binormal).abs() <= eps
            && self.normal.dot(&self.binormal).abs() <= eps
            && (self.tangent.cross(&self.normal) - self.binormal).norm() <= eps
    }
}

/// Computes the Frenet-Serret frame of `curve` at `t`.
///
/// `tangent = normalize(f'(t))`, `normal = normalize(f'' - tangent (f'' . tangent))`,
/// `binormal = tangent x normal`.
///
/// # Errors
///
/// Returns [`GeometryError::NonFinite`] if the position or either derivative
/// contains NaN or infinity, [`GeometryError::ZeroTangent`] where `f'(t)`
/// vanishes and [`GeometryError::UndefinedNormal`] where the curve is locally
/// straight (the rejected second derivative vanishes relative to `|f''|`).
pub fn frenet_frame<C: DifferentiableCurve + ?Sized>(curve: &C, t: f64) -> Result<Frame> {
    let position = curve.position(t);
    let d1 = curve.derivative_at(t);
    let d2 = curve.second_derivative_at(t);
    let finite = |v: &Vector3| v.iter().all(|c| c.is_finite());
    if !t.is_finite() || !finite(&position.coords) || !finite(&d1) || !finite(&d2) {
        return Err(GeometryError::NonFinite { t }.into());
    }

    let tangent = try_normalize(&d1).ok_or(GeometryError::ZeroTangent { t })?;
    let rejected = reject(&d2, &tangent);
    let scale = d2.norm().max(1.0);
    if rejected.norm() <= TOLERANCE * scale {
        return Err(GeometryError::UndefinedNormal { t }.into());
    }
    let normal = rejected.normalize();

    Ok(Frame {
        position,
        tangent,
        normal,
        binormal: tangent.cross(&normal),
    })
}

/// Component of `v` perpendicular to the unit vector `axis`.
fn reject(v: &Vector3, axis: &Vector3) -> Vector3 {
    v - axis * v.dot(axis)
}

fn least_aligned_axis(v: &Vector3) -> Vector3 {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SweepError;
    use crate::geometry::curve::{BezierCurve, DifferentiableFunction, Helix};
    use approx::assert_relative_eq;

    fn unit_circle() -> impl DifferentiableCurve {
        DifferentiableFunction::new(
            |t: f64| Point3::new(t.cos(), t.sin(), 0.0),
            |t: f64| Vector3::new(-t.sin(), t.cos(), 0.0),
            |t: f64| Vector3::new(-t.cos(), -t.sin(), 0.0),
        )
    }

    #[test]
    fn circle_frames_are_orthonormal() {
        let c = unit_circle();
        for &t in &[0.0, 0.5, 1.7, 3.0, 5.9] {
            let f = frenet_frame(&c, t).unwrap();
            assert!(f.is_orthonormal(1e-12), "t = {t}: {f:?}");
        }
    }

    #[test]
    fn circle_normal_points_to_center() {
        let c = unit_circle();
        let f = frenet_frame(&c, 0.0).unwrap();
        assert_relative_eq!(f.position, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(f.tangent, Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(f.normal, -Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(f.binormal, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn helix_frames_are_orthonormal() {
        let h = Helix::new(2.0, 0.4).unwrap();
        for i in 0..10 {
            let f = frenet_frame(&h, f64::from(i) * 0.7).unwrap();
            assert!(f.is_orthonormal(1e-12));
            // Helix normals point horizontally at the axis.
            assert!(f.normal.z.abs() < 1e-12);
        }
    }

    #[test]
    fn bent_bezier_has_frames() {
        let c = BezierCurve::cubic(
            Point3::origin(),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, -1.0, 0.5),
            Point3::new(3.0, 0.0, 0.0),
        );
        for &t in &[0.1, 0.4, 0.9] {
            assert!(frenet_frame(&c, t).unwrap().is_orthonormal(1e-12));
        }
    }

    #[test]
    fn straight_line_normal_is_degenerate() {
        let line = BezierCurve::cubic(
            Point3::origin(),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(3.0, 3.0, 3.0),
        );
        let err = frenet_frame(&line, 0.5).unwrap_err();
        assert!(matches!(
            err,
            SweepError::Geometry(GeometryError::UndefinedNormal { .. })
        ));
    }

    #[test]
    fn unevenly_spaced_collinear_controls_are_degenerate() {
        let line = BezierCurve::cubic(
            Point3::origin(),
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(2.5, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        );
        assert!(frenet_frame(&line, 0.3).unwrap_err().is_degenerate());
    }

    #[test]
    fn stationary_point_tangent_is_degenerate() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let c = BezierCurve::cubic(p, p, Point3::new(2.0, 2.0, 3.0), Point3::new(3.0, 3.0, 3.0));
        let err = frenet_frame(&c, 0.0).unwrap_err();
        assert!(matches!(
            err,
            SweepError::Geometry(GeometryError::ZeroTangent { .. })
        ));
    }

    #[test]
    fn infinite_derivative_is_non_finite() {
        let c = DifferentiableFunction::new(
            |t: f64| Point3::new(t.cbrt(), t, 0.0),
            |t: f64| Vector3::new(1.0 / (3.0 * t.cbrt().powi(2)), 1.0, 0.0),
            |_| Vector3::new(0.0, 1.0, 0.0),
        );
        let err = frenet_frame(&c, 0.0).unwrap_err();
        assert!(matches!(
            err,
            SweepError::Geometry(GeometryError::NonFinite { .. })
        ));
        assert!(frenet_frame(&c, 1.0).is_ok());
    }

    #[test]
    fn nan_second_derivative_is_non_finite() {
        let c = DifferentiableFunction::new(
            |t: f64| Point3::new(t, 0.0, 0.0),
            |_| Vector3::x(),
            |_| Vector3::new(f64::NAN, 0.0, 0.0),
        );
        assert!(frenet_frame(&c, 0.5).unwrap_err().is_degenerate());
    }

    #[test]
    fn from_reference_rejects_reference() {
        let f = Frame::from_reference(
            Point3::origin(),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(f.normal, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(f.binormal, -Vector3::y(), epsilon = 1e-12);
        assert!(f.is_orthonormal(1e-12));
    }

    #[test]
    fn from_reference_parallel_falls_back() {
        let f = Frame::from_reference(Point3::origin(), Vector3::z(), Vector3::z()).unwrap();
        assert!(f.is_orthonormal(1e-12));
    }

    #[test]
    fn from_reference_zero_tangent_fails() {
        assert!(Frame::from_reference(Point3::origin(), Vector3::zeros(), Vector3::z()).is_err());
    }
}
