use crate::error::{InputError, Result};
use crate::math::{Point3, Vector3};

use super::DifferentiableCurve;

/// A Bezier curve of degree 0 to 3 with a fixed-size control polygon.
///
/// Control points are stored as coordinate vectors so a curve and its
/// derivative (hodograph) share one representation. Degree 0 only arises from
/// differentiating a linear curve.
///
/// Parameters outside `[0, 1]` extrapolate through the same polynomial; clamp
/// before evaluating if the segment bounds matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BezierCurve {
    /// Degree 0: a constant value.
    Constant([Vector3; 1]),
    /// Degree 1: `(1-t) P0 + t P1`.
    Linear([Vector3; 2]),
    /// Degree 2.
    Quadratic([Vector3; 3]),
    /// Degree 3.
    Cubic([Vector3; 4]),
}

impl BezierCurve {
    /// Creates a linear curve (a segment).
    #[must_use]
    pub fn linear(p0: Point3, p1: Point3) -> Self {
        Self::Linear([p0.coords, p1.coords])
    }

    /// Creates a quadratic curve.
    #[must_use]
    pub fn quadratic(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self::Quadratic([p0.coords, p1.coords, p2.coords])
    }

    /// Creates a cubic curve.
    #[must_use]
    pub fn cubic(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self::Cubic([p0.coords, p1.coords, p2.coords, p3.coords])
    }

    /// Creates a curve whose degree is fixed by the number of control points.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ControlPointCount`] unless 2, 3 or 4 points are given.
    pub fn from_control_points(points: &[Point3]) -> Result<Self> {
        match points {
            [p0, p1] => Ok(Self::linear(*p0, *p1)),
            [p0, p1, p2] => Ok(Self::quadratic(*p0, *p1, *p2)),
            [p0, p1, p2, p3] => Ok(Self::cubic(*p0, *p1, *p2, *p3)),
            _ => Err(InputError::ControlPointCount {
                expected: "2, 3 or 4",
                found: points.len(),
            }
            .into()),
        }
    }

    /// Returns the polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.control_points().len() - 1
    }

    /// Returns the control points as coordinate vectors.
    #[must_use]
    pub fn control_points(&self) -> &[Vector3] {
        match self {
            Self::Constant(p) => p,
            Self::Linear(p) => p,
            Self::Quadratic(p) => p,
            Self::Cubic(p) => p,
        }
    }

    /// Evaluates the curve at `t` as a coordinate vector.
    #[must_use]
    pub fn evaluate_vector(&self, t: f64) -> Vector3 {
        match self {
            Self::Constant([p0]) => *p0,
            Self::Linear(p) => eval_linear(p, t),
            Self::Quadratic(p) => eval_quadratic(p, t),
            Self::Cubic(p) => eval_cubic(p, t),
        }
    }

    /// Evaluates the curve at `t` as a point.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> Point3 {
        Point3::from(self.evaluate_vector(t))
    }

    /// Returns the exact derivative curve, one degree lower.
    ///
    /// Control points are `degree * (P[i+1] - P[i])`. The derivative of a
    /// constant is the zero constant.
    #[must_use]
    pub fn derivative(&self) -> Self {
        match self {
            Self::Constant(_) => Self::Constant([Vector3::zeros()]),
            Self::Linear([p0, p1]) => Self::Constant([p1 - p0]),
            Self::Quadratic([p0, p1, p2]) => Self::Linear([(p1 - p0) * 2.0, (p2 - p1) * 2.0]),
            Self::Cubic([p0, p1, p2, p3]) => {
                Self::Quadratic([(p1 - p0) * 3.0, (p2 - p1) * 3.0, (p3 - p2) * 3.0])
            }
        }
    }

    /// Returns the second derivative curve.
    #[must_use]
    pub fn second_derivative(&self) -> Self {
        self.derivative().derivative()
    }
}

impl DifferentiableCurve for BezierCurve {
    fn position(&self, t: f64) -> Point3 {
        self.evaluate(t)
    }

    fn derivative_at(&self, t: f64) -> Vector3 {
        self.derivative().evaluate_vector(t)
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        self.second_derivative().evaluate_vector(t)
    }
}

/// Cubic Bernstein weights `[(1-t)^3, 3t(1-t)^2, 3t^2(1-t), t^3]`.
#[must_use]
pub fn cubic_bernstein(t: f64) -> [f64; 4] {
    let s = 1.0 - t;
    [s * s * s, 3.0 * t * s * s, 3.0 * t * t * s, t * t * t]
}

/// Derivatives of the cubic Bernstein weights with respect to `t`.
#[must_use]
pub fn cubic_bernstein_derivative(t: f64) -> [f64; 4] {
    let s = 1.0 - t;
    [
        -3.0 * s * s,
        3.0 * s * s - 6.0 * t * s,
        6.0 * t * s - 3.0 * t * t,
        3.0 * t * t,
    ]
}

fn eval_linear(p: &[Vector3; 2], t: f64) -> Vector3 {
    p[0] * (1.0 - t) + p[1] * t
}

fn eval_quadratic(p: &[Vector3; 3], t: f64) -> Vector3 {
    let s = 1.0 - t;
    p[0] * (s * s) + p[1] * (2.0 * s * t) + p[2] * (t * t)
}

fn eval_cubic(p: &[Vector3; 4], t: f64) -> Vector3 {
    let [k0, k1, k2, k3] = cubic_bernstein(t);
    p[0] * k0 + p[1] * k1 + p[2] * k2 + p[3] * k3
}
