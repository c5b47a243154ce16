use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::DifferentiableCurve;

/// A circular helix around the Z axis.
///
/// `P(t) = (a cos t, a sin t, b t)` where `a` is the radius and `b` the slope;
/// one full turn rises by `2 pi b`.
#[derive(Debug, Clone, Copy)]
pub struct Helix {
    radius: f64,
    slope: f64,
}

impl Helix {
    /// Creates a new helix.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or not finite (a
    /// zero-radius helix is a straight line and has no Frenet normal), or if
    /// the slope is not finite.
    pub fn new(radius: f64, slope: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "helix radius must be positive and finite, got {radius}"
            ))
            .into());
        }
        if !slope.is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "helix slope must be finite, got {slope}"
            ))
            .into());
        }
        Ok(Self { radius, slope })
    }

    /// Returns the helix radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the helix slope.
    #[must_use]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Returns the rise per full turn.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        std::f64::consts::TAU * self.slope
    }
}

impl DifferentiableCurve for Helix {
    fn position(&self, t: f64) -> Point3 {
        let (sin, cos) = t.sin_cos();
        Point3::new(self.radius * cos, self.radius * sin, self.slope * t)
    }

    fn derivative_at(&self, t: f64) -> Vector3 {
        let (sin, cos) = t.sin_cos();
        Vector3::new(-self.radius * sin, self.radius * cos, self.slope)
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        let (sin, cos) = t.sin_cos();
        Vector3::new(-self.radius * cos, -self.radius * sin, 0.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    #[test]
    fn non_finite_parameters_are_rejected() {
        assert!(Helix::new(f64::NAN, 0.3).unwrap_err().is_degenerate());
        assert!(Helix::new(f64::INFINITY, 0.3).is_err());
        assert!(Helix::new(1.0, f64::NAN).is_err());
        assert!(Helix::new(0.0, 0.3).is_err());
    }

    #[test]
    fn starts_on_x_axis() {
        let h = Helix::new(2.0, 0.5).unwrap();
        assert!((h.position(0.0) - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn quarter_turn() {
        let h = Helix::new(2.0, 0.5).unwrap();
        let p = h.position(FRAC_PI_2);
        assert!((p - Point3::new(0.0, 2.0, 0.25 * std::f64::consts::PI)).norm() < 1e-12);
    }

    #[test]
    fn full_turn_rises_by_pitch() {
        let h = Helix::new(1.0, 0.3).unwrap();
        let rise = h.position(TAU).z - h.position(0.0).z;
        assert!((rise - h.pitch()).abs() < 1e-12);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = Helix::new(1.5, 0.2).unwrap();
        let eps = 1e-6;
        for &t in &[0.0, 0.7, 2.0, 5.5] {
            let fd1 = (h.position(t + eps) - h.position(t - eps)) / (2.0 * eps);
            assert!((h.derivative_at(t) - fd1).norm() < 1e-6);
            let fd2 = (h.derivative_at(t + eps) - h.derivative_at(t - eps)) / (2.0 * eps);
            assert!((h.second_derivative_at(t) - fd2).norm() < 1e-6);
        }
    }

    #[test]
    fn zero_radius_is_rejected() {
        assert!(Helix::new(0.0, 1.0).is_err());
    }
}
