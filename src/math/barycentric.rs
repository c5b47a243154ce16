use super::{Point3, Vector3, TOLERANCE};

/// Computes the barycentric weights `(w0, w1, w2)` of `p` with respect to
/// triangle `(a, b, c)`.
///
/// `p` is projected onto the triangle's plane first, so points slightly off the
/// surface still get weights that sum to one. Returns `None` for a triangle with
/// (near) zero area.
#[must_use]
pub fn barycentric(p: &Point3, a: &Point3, b: &Point3, c: &Point3) -> Option<(f64, f64, f64)> {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < TOLERANCE * TOLERANCE {
        return None;
    }

    let w1 = (d11 * d20 - d01 * d21) / denom;
    let w2 = (d00 * d21 - d01 * d20) / denom;
    Some((1.0 - w1 - w2, w1, w2))
}

/// Translates `points` so their centroid lies at the origin.
///
/// An empty slice yields an empty vector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn center_on_origin(points: &[Point3]) -> Vec<Point3> {
    if points.is_empty() {
        return Vec::new();
    }
    let sum: Vector3 = points.iter().map(|p| p.coords).sum();
    let centroid = sum / points.len() as f64;
    points.iter().map(|p| p - centroid).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri() -> (Point3, Point3, Point3) {
        (
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn vertices_have_unit_weights() {
        let (a, b, c) = tri();
        let (w0, w1, w2) = barycentric(&b, &a, &b, &c).unwrap();
        assert_relative_eq!(w0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(w1, 1.0, epsilon = 1e-12);
        assert_relative_eq!(w2, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn centroid_has_equal_weights() {
        let (a, b, c) = tri();
        let centroid = Point3::new(1.0 / 3.0, 1.0 / 3.0, 0.0);
        let (w0, w1, w2) = barycentric(&centroid, &a, &b, &c).unwrap();
        assert_relative_eq!(w0, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(w1, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(w2, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn off_plane_point_is_projected() {
        let (a, b, c) = tri();
        let p = Point3::new(0.25, 0.25, 5.0);
        let (w0, w1, w2) = barycentric(&p, &a, &b, &c).unwrap();
        assert_relative_eq!(w0 + w1 + w2, 1.0, epsilon = 1e-12);
        assert_relative_eq!(w1, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        let a = Point3::origin();
        let b = Point3::new(1.0, 1.0, 1.0);
        let c = Point3::new(2.0, 2.0, 2.0);
        assert!(barycentric(&a, &a, &b, &c).is_none());
    }

    #[test]
    fn centering_moves_centroid_to_origin() {
        let pts = vec![
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(3.0, 2.0, 1.0),
            Point3::new(2.0, 5.0, 2.0),
        ];
        let centered = center_on_origin(&pts);
        let sum: Vector3 = centered.iter().map(|p| p.coords).sum();
        assert!(sum.norm() < 1e-12);
        assert_relative_eq!(centered[0], Point3::new(-1.0, -1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn centering_empty_is_empty() {
        assert!(center_on_origin(&[]).is_empty());
    }
}
