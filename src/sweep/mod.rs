mod frame;
mod profile;
mod sweep_curve;
mod sweep_points;

pub use frame::{frenet_frame, Frame};
pub use profile::RadialProfile;
pub use sweep_curve::SweepCurve;
pub use sweep_points::SweepPoints;

use crate::error::{InputError, Result};
use crate::math::{Point3, Vector3};

/// A closed cross-section polygon. All rings of one sweep share a length.
pub type Ring = Vec<Point3>;

/// Parameter stepping for a parametric sweep.
///
/// Ring `i` is taken at `t = t_start + i * step_size` for `i` in `0..num_steps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepParams {
    /// Parameter of the first ring.
    pub t_start: f64,
    /// Parameter increment between rings.
    pub step_size: f64,
    /// Number of rings.
    pub num_steps: usize,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            step_size: 0.1,
            num_steps: 11,
        }
    }
}

impl SweepParams {
    /// Samples `num_steps` parameters evenly over `[t_start, t_end]`, both ends included.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spanning(t_start: f64, t_end: f64, num_steps: usize) -> Self {
        let step_size = if num_steps > 1 {
            (t_end - t_start) / (num_steps - 1) as f64
        } else {
            0.0
        };
        Self {
            t_start,
            step_size,
            num_steps,
        }
    }

    /// Returns the parameter of ring `i`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn parameter(&self, i: usize) -> f64 {
        self.t_start + i as f64 * self.step_size
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.num_steps < 2 {
            return Err(InputError::InvalidParameter(format!(
                "a sweep needs at least 2 steps, got {}",
                self.num_steps
            ))
            .into());
        }
        if !self.t_start.is_finite() || !self.step_size.is_finite() {
            return Err(InputError::InvalidParameter(
                "sweep start and step size must be finite".into(),
            )
            .into());
        }
        Ok(())
    }
}

/// What a point-sequence sweep does when a frame cannot be transported to the
/// next station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportFallback {
    /// Stop with [`GeometryError::TransportDegenerate`](crate::error::GeometryError::TransportDegenerate).
    #[default]
    Fail,
    /// Reuse the previous station's normal, re-orthogonalized against the new tangent.
    RetainPrevious,
}

/// Settings for a point-sequence sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSweepParams {
    /// Axis the first station's normal is derived from.
    pub reference_axis: Vector3,
    /// Behaviour when frame transport is undefined.
    pub fallback: TransportFallback,
}

impl Default for PointSweepParams {
    fn default() -> Self {
        Self {
            reference_axis: Vector3::z(),
            fallback: TransportFallback::Fail,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn spanning_includes_both_ends() {
        let p = SweepParams::spanning(1.0, 3.0, 5);
        assert!((p.parameter(0) - 1.0).abs() < 1e-12);
        assert!((p.parameter(4) - 3.0).abs() < 1e-12);
        assert!((p.step_size - 0.5).abs() < 1e-12);
    }

    #[test]
    fn too_few_steps_is_rejected() {
        let p = SweepParams::spanning(0.0, 1.0, 1);
        assert!(p.validate().unwrap_err().is_malformed_input());
    }

    #[test]
    fn non_finite_step_is_rejected() {
        let p = SweepParams {
            step_size: f64::NAN,
            ..SweepParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn defaults() {
        assert!(SweepParams::default().validate().is_ok());
        let p = PointSweepParams::default();
        assert_eq!(p.fallback, TransportFallback::Fail);
        assert_eq!(p.reference_axis, Vector3::z());
    }
}
