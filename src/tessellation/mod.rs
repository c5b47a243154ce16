mod stitch;
mod tessellate_patch;

pub use stitch::{join_rings, join_rings_open};
pub use tessellate_patch::TessellatePatch;

use std::collections::HashMap;

use crate::error::{GeometryError, Result, TessellationError};
use crate::math::{barycentric, try_normalize, Point2, Point3, Vector3};

/// Parameters controlling patch tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchParams {
    /// Samples per parameter direction, endpoints included. Must be at least 2.
    pub samples: usize,
}

impl Default for PatchParams {
    fn default() -> Self {
        Self { samples: 16 }
    }
}

/// A triangle carrying a material tag.
///
/// The winding `p0 -> p1 -> p2` is counter-clockwise seen from the side
/// [`Triangle::normal`] points to.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle<M> {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub material: M,
}

impl<M> Triangle<M> {
    /// Creates a new triangle.
    #[must_use]
    pub fn new(p0: Point3, p1: Point3, p2: Point3, material: M) -> Self {
        Self {
            p0,
            p1,
            p2,
            material,
        }
    }

    /// The three corners in winding order.
    #[must_use]
    pub fn vertices(&self) -> [Point3; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Unit normal `(p1 - p0) x (p2 - p0)`, or `None` if the triangle has no area.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3> {
        try_normalize(&(self.p1 - self.p0).cross(&(self.p2 - self.p0)))
    }

    #[must_use]
    pub fn centroid(&self) -> Point3 {
        Point3::from((self.p0.coords + self.p1.coords + self.p2.coords) / 3.0)
    }
}

/// An unindexed triangle soup.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<M> {
    triangles: Vec<Triangle<M>>,
}

impl<M> Default for Mesh<M> {
    fn default() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }
}

impl<M> Mesh<M> {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, triangle: Triangle<M>) {
        self.triangles.push(triangle);
    }

    /// Moves every triangle of `other` into this mesh.
    pub fn append(&mut self, other: &mut Mesh<M>) {
        self.triangles.append(&mut other.triangles);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[must_use]
    pub fn triangles(&self) -> &[Triangle<M>] {
        &self.triangles
    }

    #[must_use]
    pub fn into_triangles(self) -> Vec<Triangle<M>> {
        self.triangles
    }

    /// Writes the mesh as Wavefront OBJ text.
    ///
    /// Positions that compare equal share one `v` record (`-0.0` and `0.0`
    /// included). Faces reference vertices with 1-based indices in triangle
    /// winding order. Materials are not written.
    #[must_use]
    pub fn to_obj(&self) -> String {
        let mut index: HashMap<[u64; 3], usize> = HashMap::new();
        let mut vertices = String::new();
        let mut faces = String::new();

        for tri in &self.triangles {
            let mut face = [0usize; 3];
            for (slot, p) in face.iter_mut().zip(tri.vertices()) {
                let key = [coord_key(p.x), coord_key(p.y), coord_key(p.z)];
                let next = index.len() + 1;
                *slot = *index.entry(key).or_insert_with(|| {
                    vertices.push_str(&format!("v {} {} {}\n", p.x, p.y, p.z));
                    next
                });
            }
            faces.push_str(&format!("f {} {} {}\n", face[0], face[1], face[2]));
        }

        vertices.push_str(&faces);
        vertices
    }
}

/// Hash key for one coordinate. Adding `+0.0` folds `-0.0` into `+0.0`.
fn coord_key(c: f64) -> u64 {
    (c + 0.0).to_bits()
}

impl<M> FromIterator<Triangle<M>> for Mesh<M> {
    fn from_iter<I: IntoIterator<Item = Triangle<M>>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl<M> Extend<Triangle<M>> for Mesh<M> {
    fn extend<I: IntoIterator<Item = Triangle<M>>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

/// A shared-vertex grid mesh.
///
/// Vertex `(iu, iv)` is stored at `iv * u_count + iu`. `normals`, when present,
/// is indexed in parallel with `vertices`.
#[derive(Debug, Clone, Default)]
pub struct GridMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Per-vertex unit normals.
    pub normals: Option<Vec<Vector3>>,
    /// Per-vertex UV coordinates.
    pub uvs: Vec<Point2>,
    /// Samples along u.
    pub u_count: usize,
    /// Samples along v.
    pub v_count: usize,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl GridMesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    fn corners(&self, triangle: usize) -> Result<[usize; 3]> {
        let tri = self
            .indices
            .get(triangle)
            .ok_or(TessellationError::TriangleOutOfRange {
                index: triangle,
                count: self.indices.len(),
            })?;
        Ok(tri.map(|i| i as usize))
    }

    /// Expands the grid into an unindexed mesh with one material.
    ///
    /// # Errors
    ///
    /// Returns an error if an index points past the vertex array.
    pub fn to_mesh<M: Clone>(&self, material: M) -> Result<Mesh<M>> {
        let count = self.vertices.len();
        let vertex = |i: u32| {
            self.vertices
                .get(i as usize)
                .copied()
                .ok_or_else(|| {
                    TessellationError::InvalidParameters(format!(
                        "grid index {i} exceeds {count} vertices"
                    ))
                })
        };
        self.indices
            .iter()
            .map(|&[a, b, c]| -> Result<Triangle<M>> {
                Ok(Triangle::new(
                    vertex(a)?,
                    vertex(b)?,
                    vertex(c)?,
                    material.clone(),
                ))
            })
            .collect()
    }

    /// Interpolates the vertex normals of `triangle` at `point` with
    /// barycentric weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has no normals, `triangle` is out of range,
    /// or the triangle or the interpolated normal is degenerate.
    pub fn shading_normal(&self, triangle: usize, point: &Point3) -> Result<Vector3> {
        let normals = self.normals.as_ref().ok_or_else(|| {
            TessellationError::InvalidParameters("grid mesh has no vertex normals".into())
        })?;
        let [a, b, c] = self.corners(triangle)?;
        let pick = |i: usize| -> Result<(Point3, Vector3)> {
            match (self.vertices.get(i), normals.get(i)) {
                (Some(p), Some(n)) => Ok((*p, *n)),
                _ => Err(TessellationError::InvalidParameters(format!(
                    "grid index {i} has no vertex or normal"
                ))
                .into()),
            }
        };
        let (pa, na) = pick(a)?;
        let (pb, nb) = pick(b)?;
        let (pc, nc) = pick(c)?;
        interpolate_normal(point, [pa, pb, pc], [na, nb, nc])
    }
}

/// A triangle mesh paired with analytic normals at each triangle corner.
///
/// `corner_normals[i]` belongs to `mesh.triangles()[i]`, in the same winding order.
#[derive(Debug, Clone)]
pub struct NormalMappedMesh<M> {
    pub mesh: Mesh<M>,
    pub corner_normals: Vec<[Vector3; 3]>,
}

impl<M> NormalMappedMesh<M> {
    /// Interpolated shading normal at `point` on triangle `triangle`.
    ///
    /// # Errors
    ///
    /// Returns an error if `triangle` is out of range or the lookup is degenerate.
    pub fn shading_normal(&self, triangle: usize, point: &Point3) -> Result<Vector3> {
        let out_of_range = || TessellationError::TriangleOutOfRange {
            index: triangle,
            count: self.mesh.len(),
        };
        let tri = self.mesh.triangles().get(triangle).ok_or_else(out_of_range)?;
        let normals = self.corner_normals.get(triangle).ok_or_else(out_of_range)?;
        interpolate_normal(point, tri.vertices(), *normals)
    }
}

fn interpolate_normal(
    point: &Point3,
    corners: [Point3; 3],
    normals: [Vector3; 3],
) -> Result<Vector3> {
    let [a, b, c] = corners;
    let (w0, w1, w2) = barycentric(point, &a, &b, &c).ok_or_else(|| {
        GeometryError::Degenerate("shading lookup on a zero-area triangle".into())
    })?;
    let n = normals[0] * w0 + normals[1] * w1 + normals[2] * w2;
    try_normalize(&n).ok_or_else(|| GeometryError::ZeroVector.into())
}
