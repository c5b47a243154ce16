use tracing::{debug, warn};

use crate::error::{GeometryError, InputError, Result};
use crate::geometry::surface::Plane;
use crate::math::intersect_3d::{ray_plane_intersect, RayPlaneRelation};
use crate::math::{try_normalize, Point3, Vector3, TOLERANCE};
use crate::tessellation::{join_rings, Mesh};

use super::{Frame, PointSweepParams, RadialProfile, Ring, TransportFallback};

/// A transported axis shorter than this fraction of its offset counts as collapsed.
const MIN_TRANSPORTED_FRACTION: f64 = 1e-6;

/// Sweeps a radial profile along a polyline when no analytic derivative is
/// available.
///
/// Station `i` has tangent `normalize(p[i+1] - p[i-1])` (one-sided at the ends).
/// The first station's normal comes from the reference axis; every later frame
/// is carried over from the previous one by intersecting rays with the new
/// cutting plane, which keeps the rings from twisting. This is a best-effort
/// heuristic, not a closed-form transport.
///
/// Profile radii are evaluated at the normalized station parameter `i / (m - 1)`.
#[derive(Debug)]
pub struct SweepPoints {
    points: Vec<Point3>,
    profile: RadialProfile,
    params: PointSweepParams,
}

impl SweepPoints {
    /// Creates a new point-sequence sweep.
    #[must_use]
    pub fn new(points: Vec<Point3>, profile: RadialProfile, params: PointSweepParams) -> Self {
        Self {
            points,
            profile,
            params,
        }
    }

    /// Normalized parameter of station `i`.
    #[allow(clippy::cast_precision_loss)]
    fn station_parameter(&self, i: usize) -> f64 {
        i as f64 / (self.points.len() - 1) as f64
    }

    fn tangent(&self, i: usize) -> Result<Vector3> {
        let last = self.points.len() - 1;
        let chord = if i == 0 {
            self.points[1] - self.points[0]
        } else if i == last {
            self.points[last] - self.points[last - 1]
        } else {
            self.points[i + 1] - self.points[i - 1]
        };
        try_normalize(&chord).ok_or_else(|| {
            GeometryError::ZeroTangent {
                t: self.station_parameter(i),
            }
            .into()
        })
    }

    /// Computes one frame per station.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 points are given, a point is not
    /// finite, a station tangent vanishes (coincident neighbours), or
    /// transport fails under
    /// [`TransportFallback::Fail`].
    pub fn frames(&self) -> Result<Vec<Frame>> {
        let m = self.points.len();
        if m < 2 {
            return Err(InputError::TooFewPoints {
                required: 2,
                found: m,
            }
            .into());
        }
        if let Some(i) = self.points.iter().position(|p| !is_finite(p)) {
            return Err(InputError::InvalidParameter(format!("point {i} is not finite")).into());
        }

        let mut frames = Vec::with_capacity(m);
        frames.push(Frame::from_reference(
            self.points[0],
            self.tangent(0)?,
            self.params.reference_axis,
        )?);

        for i in 1..m {
            let prev = frames[i - 1];
            let t_prev = self.station_parameter(i - 1);
            let offsets = (self.profile.radius_x(t_prev), self.profile.radius_y(t_prev));
            let tangent = self.tangent(i)?;
            let position = self.points[i];

            let frame = match transport(&prev, offsets, position, tangent)? {
                Some(frame) => frame,
                None => match self.params.fallback {
                    TransportFallback::Fail => {
                        return Err(GeometryError::TransportDegenerate { station: i }.into());
                    }
                    TransportFallback::RetainPrevious => {
                        warn!(station = i, "frame transport undefined, retaining previous normal");
                        Frame::from_reference(position, tangent, prev.normal)?
                    }
                },
            };
            frames.push(frame);
        }
        Ok(frames)
    }

    /// Computes one ring per station.
    ///
    /// # Errors
    ///
    /// Same as [`Self::frames`], or a profile radius is not finite.
    pub fn rings(&self) -> Result<Vec<Ring>> {
        let frames = self.frames()?;
        frames
            .iter()
            .enumerate()
            .map(|(i, frame)| self.profile.try_ring(frame, self.station_parameter(i)))
            .collect()
    }

    /// Executes the sweep, producing `2 * n * (m - 1)` triangles for `m` points.
    ///
    /// # Errors
    ///
    /// Same as [`Self::frames`].
    pub fn execute<M: Clone>(&self, material: M) -> Result<Mesh<M>> {
        let rings = self.rings()?;
        let mesh = join_rings(&rings, material)?;
        debug!(
            stations = rings.len(),
            triangles = mesh.len(),
            "swept point sequence"
        );
        Ok(mesh)
    }
}

/// Carries `prev` onto the cutting plane through `position` with normal `tangent`.
///
/// Two rays travel along the new tangent: one from the previous center and one
/// from the previous center offset by the x radius along the previous normal.
/// The difference of their hits on the new plane is the transported normal.
/// If that collapses (previous normal along the new tangent) the binormal is
/// carried instead, offset by the y radius.
///
/// A right-angle turn is still transported: one of the previous axes lies
/// in the new plane and survives. Returns `Ok(None)` when the path turns by
/// more than a right angle between stations (the projection onto the new
/// plane flips the direction of travel), when neither axis survives, or when
/// the rays run parallel to the plane.
fn transport(
    prev: &Frame,
    (radius_x, radius_y): (f64, f64),
    position: Point3,
    tangent: Vector3,
) -> Result<Option<Frame>> {
    if prev.tangent.dot(&tangent) < -TOLERANCE {
        return Ok(None);
    }
    let plane = Plane::from_normal(position, tangent)?;

    if let Some(normal) = carry_axis(prev, &prev.normal, radius_x, &tangent, &plane) {
        return Ok(Some(Frame {
            position,
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }));
    }
    if let Some(binormal) = carry_axis(prev, &prev.binormal, radius_y, &tangent, &plane) {
        return Ok(Some(Frame {
            position,
            tangent,
            normal: binormal.cross(&tangent),
            binormal,
        }));
    }
    Ok(None)
}

/// Transports one axis of `prev` along `dir` onto `plane`, re-orthogonalized
/// against the plane normal. Zero radii use a unit offset.
fn carry_axis(
    prev: &Frame,
    axis: &Vector3,
    radius: f64,
    dir: &Vector3,
    plane: &Plane,
) -> Option<Vector3> {
    let offset = if radius.abs() > TOLERANCE { radius } else { 1.0 };
    let center_hit = hit(&prev.position, dir, plane)?;
    let offset_hit = hit(&(prev.position + axis * offset), dir, plane)?;

    let carried = (offset_hit - center_hit) / offset;
    if carried.norm() < MIN_TRANSPORTED_FRACTION {
        return None;
    }
    let n = plane.plane_normal();
    try_normalize(&(carried - n * carried.dot(n)))
}

fn is_finite(p: &Point3) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}

fn hit(origin: &Point3, dir: &Vector3, plane: &Plane) -> Option<Point3> {
    match ray_plane_intersect(origin, dir, plane) {
        RayPlaneRelation::Point { point, .. } => Some(point),
        RayPlaneRelation::Parallel | RayPlaneRelation::OnPlane => None,
    }
}
