mod bezier;
mod helix;

pub use bezier::{cubic_bernstein, cubic_bernstein_derivative, BezierCurve};
pub use helix::Helix;

use crate::math::{Point3, Vector3};

/// A parametric curve with analytic first and second derivatives.
///
/// Implementations must keep the three maps consistent: `derivative_at` is
/// the derivative of `position`, and `second_derivative_at` that of
/// `derivative_at`. Frenet frames are built from these values directly.
pub trait DifferentiableCurve {
    /// Evaluates the curve position at parameter `t`.
    fn position(&self, t: f64) -> Point3;

    /// Evaluates `f'(t)`.
    fn derivative_at(&self, t: f64) -> Vector3;

    /// Evaluates `f''(t)`.
    fn second_derivative_at(&self, t: f64) -> Vector3;
}

/// A curve given as a caller-supplied triple `(f, f', f'')`.
///
/// The derivatives are trusted, not checked: if `f_prime` is not the true
/// derivative of `f`, frames built from this function will be wrong.
pub struct DifferentiableFunction<F, D, S> {
    f: F,
    f_prime: D,
    f_double_prime: S,
}

impl<F, D, S> DifferentiableFunction<F, D, S>
where
    F: Fn(f64) -> Point3,
    D: Fn(f64) -> Vector3,
    S: Fn(f64) -> Vector3,
{
    /// Bundles a function with its first and second derivatives.
    #[must_use]
    pub fn new(f: F, f_prime: D, f_double_prime: S) -> Self {
        Self {
            f,
            f_prime,
            f_double_prime,
        }
    }
}

impl<F, D, S> DifferentiableCurve for DifferentiableFunction<F, D, S>
where
    F: Fn(f64) -> Point3,
    D: Fn(f64) -> Vector3,
    S: Fn(f64) -> Vector3,
{
    fn position(&self, t: f64) -> Point3 {
        (self.f)(t)
    }

    fn derivative_at(&self, t: f64) -> Vector3 {
        (self.f_prime)(t)
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        (self.f_double_prime)(t)
    }
}

impl<C: DifferentiableCurve + ?Sized> DifferentiableCurve for &C {
    fn position(&self, t: f64) -> Point3 {
        (**self).position(t)
    }

    fn derivative_at(&self, t: f64) -> Vector3 {
        (**self).derivative_at(t)
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        (**self).second_derivative_at(t)
    }
}
