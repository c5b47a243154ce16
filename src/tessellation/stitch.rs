use crate::error::{InputError, Result};
use crate::math::Point3;

use super::{Mesh, Triangle};

/// Stitches consecutive closed rings into a tube.
///
/// For rings `C_i`, `C_{i+1}` of `n` points, each quad
/// `a = C_i[j]`, `b = C_i[j+1]`, `c = C_{i+1}[j]`, `d = C_{i+1}[j+1]`
/// (indices mod `n`) becomes triangles `(a, b, c)` and `(c, b, d)`, for
/// `j` in `0..n`. `R` rings produce `2 n (R - 1)` triangles, ordered by band
/// then by `j`. Triangles face outward when rings wind counter-clockwise
/// about the direction of travel.
///
/// # Errors
///
/// Returns an error if fewer than 2 rings are given, a ring has fewer than
/// 3 points, or ring lengths differ. Nothing is emitted in that case.
pub fn join_rings<M: Clone>(rings: &[Vec<Point3>], material: M) -> Result<Mesh<M>> {
    let n = validate(rings, 3)?;
    let mut mesh = Mesh::with_capacity(2 * n * (rings.len() - 1));
    for pair in rings.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        for j in 0..n {
            push_quad(&mut mesh, lower, upper, j, (j + 1) % n, &material);
        }
    }
    Ok(mesh)
}

/// Stitches consecutive open polylines into a strip.
///
/// Same quad split as [`join_rings`], but the last point is not joined back to
/// the first, giving `2 (n - 1) (R - 1)` triangles.
///
/// # Errors
///
/// Returns an error if fewer than 2 rows are given, a row has fewer than
/// 2 points, or row lengths differ.
pub fn join_rings_open<M: Clone>(rows: &[Vec<Point3>], material: M) -> Result<Mesh<M>> {
    let n = validate(rows, 2)?;
    let mut mesh = Mesh::with_capacity(2 * (n - 1) * (rows.len() - 1));
    for pair in rows.windows(2) {
        for j in 0..n - 1 {
            push_quad(&mut mesh, &pair[0], &pair[1], j, j + 1, &material);
        }
    }
    Ok(mesh)
}

fn push_quad<M: Clone>(
    mesh: &mut Mesh<M>,
    lower: &[Point3],
    upper: &[Point3],
    j: usize,
    next: usize,
    material: &M,
) {
    let (a, b) = (lower[j], lower[next]);
    let (c, d) = (upper[j], upper[next]);
    mesh.push(Triangle::new(a, b, c, material.clone()));
    mesh.push(Triangle::new(c, b, d, material.clone()));
}

/// Checks ring count and cardinality, returning the shared ring length.
fn validate(rings: &[Vec<Point3>], min_points: usize) -> Result<usize> {
    if rings.len() < 2 {
        return Err(InputError::TooFewRings { found: rings.len() }.into());
    }
    let n = rings[0].len();
    if n < min_points {
        return Err(InputError::TooFewPoints {
            required: min_points,
            found: n,
        }
        .into());
    }
    if let Some((ring, r)) = rings.iter().enumerate().find(|(_, r)| r.len() != n) {
        return Err(InputError::RingCardinality {
            ring,
            expected: n,
            found: r.len(),
        }
        .into());
    }
    Ok(n)
}
