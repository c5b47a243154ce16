use std::f64::consts::TAU;
use std::fmt;
use std::sync::Arc;

use crate::error::{InputError, Result};
use crate::math::{Point3, Vector3};

use super::{Frame, Ring};

type RadiusFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// An elliptical cross-section sampled at `n` evenly spaced phases.
///
/// Point `i` sits at phase `2 pi i / n`:
/// `center + normal * rx(t) cos(phase) + binormal * ry(t) sin(phase)`.
/// The phase-`2 pi` point is not repeated, so a ring holds exactly `n` points.
/// Radii are functions of the sweep parameter, which allows tapering.
#[derive(Clone)]
pub struct RadialProfile {
    radius_x: RadiusFn,
    radius_y: RadiusFn,
    num_points: usize,
}

impl fmt::Debug for RadialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadialProfile")
            .field("num_points", &self.num_points)
            .finish_non_exhaustive()
    }
}

impl RadialProfile {
    /// Creates an elliptical profile with parameter-dependent radii.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_points < 3`.
    pub fn ellipse_with<X, Y>(radius_x: X, radius_y: Y, num_points: usize) -> Result<Self>
    where
        X: Fn(f64) -> f64 + Send + Sync + 'static,
        Y: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::build(Arc::new(radius_x), Arc::new(radius_y), num_points)
    }

    /// Creates a circular profile with a parameter-dependent radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_points < 3`.
    pub fn circle_with<R>(radius: R, num_points: usize) -> Result<Self>
    where
        R: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let radius: RadiusFn = Arc::new(radius);
        Self::build(Arc::clone(&radius), radius, num_points)
    }

    /// Creates an ellipse with constant radii.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_points < 3`.
    pub fn ellipse(radius_x: f64, radius_y: f64, num_points: usize) -> Result<Self> {
        Self::ellipse_with(move |_| radius_x, move |_| radius_y, num_points)
    }

    /// Creates a circle with a constant radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_points < 3`.
    pub fn circle(radius: f64, num_points: usize) -> Result<Self> {
        Self::circle_with(move |_| radius, num_points)
    }

    fn build(radius_x: RadiusFn, radius_y: RadiusFn, num_points: usize) -> Result<Self> {
        if num_points < 3 {
            return Err(InputError::TooFewPoints {
                required: 3,
                found: num_points,
            }
            .into());
        }
        Ok(Self {
            radius_x,
            radius_y,
            num_points,
        })
    }

    /// Number of points per ring.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Radius along the normal axis at `t`.
    #[must_use]
    pub fn radius_x(&self, t: f64) -> f64 {
        (self.radius_x)(t)
    }

    /// Radius along the binormal axis at `t`.
    #[must_use]
    pub fn radius_y(&self, t: f64) -> f64 {
        (self.radius_y)(t)
    }

    /// Phase angle of point `i`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn phase(&self, i: usize) -> f64 {
        TAU * i as f64 / self.num_points as f64
    }

    /// Samples the ring around `center` in the plane spanned by `normal` and `binormal`.
    #[must_use]
    pub fn points(&self, center: &Point3, normal: &Vector3, binormal: &Vector3, t: f64) -> Ring {
        let rx = self.radius_x(t);
        let ry = self.radius_y(t);
        (0..self.num_points)
            .map(|i| {
                let (sin, cos) = self.phase(i).sin_cos();
                center + normal * (rx * cos) + binormal * (ry * sin)
            })
            .collect()
    }

    /// Samples the ring in the normal plane of `frame`.
    #[must_use]
    pub fn ring(&self, frame: &Frame, t: f64) -> Ring {
        self.points(&frame.position, &frame.normal, &frame.binormal, t)
    }

    /// Like [`Self::ring`], but rejects non-finite radii.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidParameter`] if either radius at `t` is NaN or infinite.
    pub fn try_ring(&self, frame: &Frame, t: f64) -> Result<Ring> {
        if !self.radius_x(t).is_finite() || !self.radius_y(t).is_finite() {
            return Err(
                InputError::InvalidParameter(format!("profile radius is not finite at t = {t}"))
                    .into(),
            );
        }
        Ok(self.ring(frame, t))
    }
}
