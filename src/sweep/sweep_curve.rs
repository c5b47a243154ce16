use tracing::debug;

use crate::error::Result;
use crate::geometry::curve::DifferentiableCurve;
use crate::tessellation::{join_rings, Mesh};

use super::{frenet_frame, Frame, RadialProfile, Ring, SweepParams};

/// Sweeps a radial profile along a differentiable curve using its
/// Frenet-Serret frames.
///
/// One ring is produced per parameter step; consecutive rings are stitched
/// into a closed tube. Every frame is computed before any triangle is emitted,
/// so a degenerate parameter anywhere aborts the whole sweep.
#[derive(Debug)]
pub struct SweepCurve<C> {
    curve: C,
    profile: RadialProfile,
    params: SweepParams,
}

impl<C: DifferentiableCurve> SweepCurve<C> {
    /// Creates a new sweep.
    #[must_use]
    pub fn new(curve: C, profile: RadialProfile, params: SweepParams) -> Self {
        Self {
            curve,
            profile,
            params,
        }
    }

    /// Computes the frame at every step, in parameter order.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or any frame is degenerate.
    pub fn frames(&self) -> Result<Vec<Frame>> {
        self.params.validate()?;
        (0..self.params.num_steps)
            .map(|i| frenet_frame(&self.curve, self.params.parameter(i)))
            .collect()
    }

    /// Computes the ring at every step, in parameter order.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, any frame is degenerate,
    /// or a profile radius is not finite.
    pub fn rings(&self) -> Result<Vec<Ring>> {
        let frames = self.frames()?;
        frames
            .iter()
            .enumerate()
            .map(|(i, frame)| self.profile.try_ring(frame, self.params.parameter(i)))
            .collect()
    }

    /// Executes the sweep, producing `2 * n * (num_steps - 1)` triangles.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or any frame is degenerate.
    pub fn execute<M: Clone>(&self, material: M) -> Result<Mesh<M>> {
        let rings = self.rings()?;
        let mesh = join_rings(&rings, material)?;
        debug!(
            rings = rings.len(),
            points_per_ring = self.profile.num_points(),
            triangles = mesh.len(),
            "swept curve"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, SweepError};
    use crate::geometry::curve::{BezierCurve, Helix};
    use crate::math::Point3;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn helix_sweep(steps: usize) -> SweepCurve<Helix> {
        SweepCurve::new(
            Helix::new(2.0, 0.3).unwrap(),
            RadialProfile::circle(0.25, 8).unwrap(),
            SweepParams::spanning(0.0, TAU, steps),
        )
    }

    #[test]
    fn helix_ring_count_and_cardinality() {
        let rings = helix_sweep(12).rings().unwrap();
        assert_eq!(rings.len(), 12);
        assert!(rings.iter().all(|r| r.len() == 8));
    }

    #[test]
    fn rings_sit_at_profile_radius() {
        let sweep = helix_sweep(6);
        let frames = sweep.frames().unwrap();
        let rings = sweep.rings().unwrap();
        for (frame, ring) in frames.iter().zip(&rings) {
            for p in ring {
                let offset = p - frame.position;
                assert_relative_eq!(offset.norm(), 0.25, epsilon = 1e-12);
                assert!(offset.dot(&frame.tangent).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn helix_triangle_count() {
        let mesh = helix_sweep(10).execute(()).unwrap();
        assert_eq!(mesh.len(), 2 * 8 * 9);
    }

    #[test]
    fn helix_triangles_face_outward() {
        let sweep = helix_sweep(24);
        let frames = sweep.frames().unwrap();
        let mesh = sweep.execute(()).unwrap();
        let per_band = 2 * 8;
        for (k, tri) in mesh.triangles().iter().enumerate() {
            let band = k / per_band;
            let center = frames[band].position;
            let centroid = tri.centroid();
            let normal = tri.normal().unwrap();
            assert!(normal.dot(&(centroid - center)) > 0.0, "triangle {k} faces inward");
        }
    }

    #[test]
    fn tapered_sweep_collapses_last_ring() {
        let sweep = SweepCurve::new(
            Helix::new(1.0, 0.2).unwrap(),
            RadialProfile::circle_with(|t| (TAU - t) * 0.1, 6).unwrap(),
            SweepParams::spanning(0.0, TAU, 5),
        );
        let rings = sweep.rings().unwrap();
        let last = rings.last().unwrap();
        let frames = sweep.frames().unwrap();
        let tip = frames.last().unwrap().position;
        for p in last {
            assert!((p - tip).norm() < 1e-12);
        }
    }

    #[test]
    fn straight_bezier_sweep_is_degenerate() {
        let line = BezierCurve::cubic(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 3.0),
        );
        let sweep = SweepCurve::new(
            line,
            RadialProfile::circle(0.5, 6).unwrap(),
            SweepParams::spanning(0.0, 1.0, 4),
        );
        let err = sweep.execute(()).unwrap_err();
        assert!(matches!(
            err,
            SweepError::Geometry(GeometryError::UndefinedNormal { .. })
        ));
    }

    #[test]
    fn curved_bezier_sweep() {
        let curve = BezierCurve::cubic(
            Point3::origin(),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 2.0, 1.0),
            Point3::new(4.0, 0.0, 0.0),
        );
        let sweep = SweepCurve::new(
            &curve,
            RadialProfile::ellipse(0.2, 0.1, 5).unwrap(),
            SweepParams::spanning(0.0, 1.0, 7),
        );
        let mesh = sweep.execute(7_u8).unwrap();
        assert_eq!(mesh.len(), 2 * 5 * 6);
        assert!(mesh.triangles().iter().all(|t| t.material == 7));
    }

    #[test]
    fn nan_radius_helix_is_rejected() {
        assert!(Helix::new(f64::NAN, 0.3).is_err());
    }

    #[test]
    fn pole_in_derivative_is_degenerate() {
        // f(t) = (t^(1/3), t, 0) has an unbounded derivative at t = 0.
        let cusp = crate::geometry::curve::DifferentiableFunction::new(
            |t: f64| Point3::new(t.cbrt(), t, 0.0),
            |t: f64| crate::math::Vector3::new(1.0 / (3.0 * t.cbrt().powi(2)), 1.0, 0.0),
            |t: f64| crate::math::Vector3::new(-2.0 / (9.0 * t.cbrt().powi(5)), 0.0, 0.0),
        );
        let sweep = SweepCurve::new(
            cusp,
            RadialProfile::circle(0.1, 4).unwrap(),
            SweepParams::spanning(0.0, 1.0, 5),
        );
        let err = sweep.execute(()).unwrap_err();
        assert!(matches!(
            err,
            SweepError::Geometry(GeometryError::NonFinite { .. })
        ));
    }

    #[test]
    fn non_finite_radius_is_rejected() {
        let sweep = SweepCurve::new(
            Helix::new(1.0, 0.2).unwrap(),
            RadialProfile::circle_with(|t| 1.0 / (t - 1.0), 4).unwrap(),
            SweepParams::spanning(0.0, 2.0, 3),
        );
        assert!(sweep.execute(()).unwrap_err().is_malformed_input());
    }

    #[test]
    fn single_step_is_rejected() {
        assert!(helix_sweep(1).execute(()).unwrap_err().is_malformed_input());
    }
}
