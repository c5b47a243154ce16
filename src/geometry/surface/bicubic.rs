use crate::error::{GeometryError, InputError, Result};
use crate::geometry::curve::{cubic_bernstein, cubic_bernstein_derivative, BezierCurve};
use crate::math::{try_normalize, Point3, Vector3};

use super::{Surface, SurfaceDomain};

/// A bicubic Bezier patch over a 4x4 grid of control points.
///
/// Control point `(i, j)` lives at index `i * 4 + j` (row-major). The `u`
/// parameter runs along a row (over `j`), `v` runs across rows (over `i`):
///
/// `S(u, v) = sum_i sum_j B_i(v) B_j(u) P[i][j]`
///
/// The surface normal is `normalize(dS/du x dS/dv)`. Tessellation winds its
/// triangles to agree with this operand order.
#[derive(Debug, Clone, PartialEq)]
pub struct BicubicPatch {
    points: [Vector3; 16],
}

impl BicubicPatch {
    /// Creates a patch from 16 row-major control points.
    #[must_use]
    pub fn new(points: [Point3; 16]) -> Self {
        Self {
            points: points.map(|p| p.coords),
        }
    }

    /// Creates a patch from a control point list.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ControlPointCount`] unless exactly 16 points are given.
    pub fn from_control_points(points: &[Point3]) -> Result<Self> {
        let points: [Point3; 16] =
            points
                .try_into()
                .map_err(|_| InputError::ControlPointCount {
                    expected: "16",
                    found: points.len(),
                })?;
        Ok(Self::new(points))
    }

    /// Creates a patch from a shared vertex list and 16 one-based vertex indices.
    ///
    /// This is the layout produced by patch files that list vertex indices per
    /// patch and the vertices once.
    ///
    /// # Errors
    ///
    /// Returns an error if `indices` does not hold 16 entries or any index is
    /// zero or past the end of `vertices`.
    pub fn from_indexed(vertices: &[Point3], indices: &[usize]) -> Result<Self> {
        if indices.len() != 16 {
            return Err(InputError::ControlPointCount {
                expected: "16",
                found: indices.len(),
            }
            .into());
        }
        let mut points = [Vector3::zeros(); 16];
        for (slot, &index) in points.iter_mut().zip(indices) {
            let vertex = index
                .checked_sub(1)
                .and_then(|i| vertices.get(i))
                .ok_or(InputError::VertexIndexOutOfRange {
                    index,
                    count: vertices.len(),
                })?;
            *slot = vertex.coords;
        }
        Ok(Self { points })
    }

    /// Returns control point `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is 4 or more.
    #[must_use]
    pub fn control_point(&self, row: usize, col: usize) -> Point3 {
        assert!(row < 4 && col < 4, "control point ({row}, {col}) outside 4x4 grid");
        Point3::from(self.points[row * 4 + col])
    }

    fn row(&self, i: usize) -> [Vector3; 4] {
        [
            self.points[i * 4],
            self.points[i * 4 + 1],
            self.points[i * 4 + 2],
            self.points[i * 4 + 3],
        ]
    }

    fn column(&self, j: usize) -> [Vector3; 4] {
        [
            self.points[j],
            self.points[4 + j],
            self.points[8 + j],
            self.points[12 + j],
        ]
    }

    /// Evaluates the patch by collapsing each row at `u`, then the resulting
    /// cubic at `v`.
    #[must_use]
    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        let collapsed = [0, 1, 2, 3].map(|i| BezierCurve::Cubic(self.row(i)).evaluate_vector(u));
        BezierCurve::Cubic(collapsed).evaluate(v)
    }

    /// Evaluates the patch by collapsing each column at `v` first, then the
    /// resulting cubic at `u`. Agrees with [`Self::point_at`] up to rounding.
    #[must_use]
    pub fn evaluate_v_first(&self, u: f64, v: f64) -> Point3 {
        let collapsed =
            [0, 1, 2, 3].map(|j| BezierCurve::Cubic(self.column(j)).evaluate_vector(v));
        BezierCurve::Cubic(collapsed).evaluate(u)
    }

    /// Tensor-product blend with explicit weights along `u` (columns) and `v` (rows).
    fn blend(&self, wu: [f64; 4], wv: [f64; 4]) -> Vector3 {
        let mut acc = Vector3::zeros();
        for (i, bv) in wv.iter().enumerate() {
            for (j, bu) in wu.iter().enumerate() {
                acc += self.points[i * 4 + j] * (bv * bu);
            }
        }
        acc
    }

    /// Partial derivative `dS/du`.
    #[must_use]
    pub fn partial_u(&self, u: f64, v: f64) -> Vector3 {
        self.blend(cubic_bernstein_derivative(u), cubic_bernstein(v))
    }

    /// Partial derivative `dS/dv`.
    #[must_use]
    pub fn partial_v(&self, u: f64, v: f64) -> Vector3 {
        self.blend(cubic_bernstein(u), cubic_bernstein_derivative(v))
    }
}

impl Surface for BicubicPatch {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.point_at(u, v))
    }

    /// Analytic normal `normalize(dS/du x dS/dv)`.
    ///
    /// Fails at parameters where the partials are parallel or vanish, such as
    /// a corner with collapsed control points.
    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        let n = self.partial_u(u, v).cross(&self.partial_v(u, v));
        try_normalize(&n).ok_or_else(|| {
            GeometryError::Degenerate(format!("patch normal undefined at ({u}, {v})")).into()
        })
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::unit()
    }
}
