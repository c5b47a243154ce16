use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::geometry::surface::{Surface, SurfaceDomain};
use crate::math::{Point2, Point3};

use super::{join_rings_open, GridMesh, Mesh, NormalMappedMesh, PatchParams, Triangle};

/// Tessellates a surface on a uniform `k x k` parameter grid.
///
/// Sample `i` along either direction sits at `min + (max - min) * i / (k - 1)`,
/// so both domain edges are included. The grid has `k^2` vertices and
/// `2 (k - 1)^2` triangles. Rows are constant-`v` and run along `u`, so every
/// triangle winds the same way as `dS/du x dS/dv`.
pub struct TessellatePatch<S> {
    surface: S,
    params: PatchParams,
}

impl<S: Surface> TessellatePatch<S> {
    /// Creates a new `TessellatePatch` operation.
    #[must_use]
    pub fn new(surface: S, params: PatchParams) -> Self {
        Self { surface, params }
    }

    fn validate(&self) -> Result<(usize, SurfaceDomain)> {
        let k = self.params.samples;
        if k < 2 {
            return Err(TessellationError::InvalidParameters(format!(
                "patch tessellation needs at least 2 samples per direction, got {k}"
            ))
            .into());
        }
        let indexable = k
            .checked_mul(k)
            .and_then(|n| u32::try_from(n).ok())
            .is_some();
        if !indexable {
            return Err(TessellationError::InvalidParameters(format!(
                "{k} x {k} samples exceed the u32 index range"
            ))
            .into());
        }
        let domain = self.surface.domain();
        if !domain.is_bounded() {
            return Err(TessellationError::InvalidParameters(
                "surface domain must be bounded".into(),
            )
            .into());
        }
        Ok((k, domain))
    }

    /// Evaluates the `(u, v)` sample grid row by row (`v` outer, `u` inner).
    fn sample_rows(&self, k: usize, domain: &SurfaceDomain) -> Result<Vec<Vec<(Point2, Point3)>>> {
        (0..k)
            .map(|iv| -> Result<Vec<(Point2, Point3)>> {
                let v = lerp(domain.v_min, domain.v_max, iv, k);
                (0..k)
                    .map(|iu| -> Result<(Point2, Point3)> {
                        let u = lerp(domain.u_min, domain.u_max, iu, k);
                        Ok((Point2::new(u, v), self.surface.evaluate(u, v)?))
                    })
                    .collect()
            })
            .collect()
    }

    /// Executes the tessellation, returning independent triangles.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples < 2`, the domain is unbounded, or the
    /// surface fails to evaluate.
    pub fn execute<M: Clone>(&self, material: M) -> Result<Mesh<M>> {
        let (k, domain) = self.validate()?;
        let rows: Vec<Vec<Point3>> = self
            .sample_rows(k, &domain)?
            .into_iter()
            .map(|row| row.into_iter().map(|(_, p)| p).collect())
            .collect();
        let mesh = join_rings_open(&rows, material)?;
        debug!(samples = k, triangles = mesh.len(), "tessellated patch");
        Ok(mesh)
    }

    /// Executes the tessellation, returning a shared-vertex grid.
    ///
    /// With `with_normals`, each vertex also carries the analytic surface normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the surface fails to
    /// evaluate, or (with normals) the normal is undefined at a grid vertex.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute_grid(&self, with_normals: bool) -> Result<GridMesh> {
        let (k, domain) = self.validate()?;
        let mut mesh = GridMesh {
            u_count: k,
            v_count: k,
            ..GridMesh::default()
        };
        mesh.vertices.reserve(k * k);
        mesh.uvs.reserve(k * k);
        mesh.indices.reserve(2 * (k - 1) * (k - 1));

        for (uv, p) in self.sample_rows(k, &domain)?.into_iter().flatten() {
            mesh.vertices.push(p);
            mesh.uvs.push(uv);
        }

        if with_normals {
            let normals = mesh
                .uvs
                .iter()
                .map(|uv| self.surface.normal(uv.x, uv.y))
                .collect::<Result<Vec<_>>>()?;
            mesh.normals = Some(normals);
        }

        // Index range was checked in `validate`.
        for iv in 0..k - 1 {
            for iu in 0..k - 1 {
                let i00 = (iv * k + iu) as u32;
                let i10 = (iv * k + iu + 1) as u32;
                let i01 = ((iv + 1) * k + iu) as u32;
                let i11 = ((iv + 1) * k + iu + 1) as u32;
                mesh.indices.push([i00, i10, i01]);
                mesh.indices.push([i01, i10, i11]);
            }
        }

        debug!(
            samples = k,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            with_normals,
            "tessellated patch grid"
        );
        Ok(mesh)
    }

    /// Executes the tessellation, pairing each triangle with the analytic
    /// normals at its corners for interpolated shading.
    ///
    /// # Errors
    ///
    /// Same as [`Self::execute_grid`] with normals.
    pub fn execute_normal_mapped<M: Clone>(&self, material: M) -> Result<NormalMappedMesh<M>> {
        let grid = self.execute_grid(true)?;
        let normals = grid.normals.as_deref().ok_or_else(|| {
            TessellationError::InvalidParameters("grid mesh has no vertex normals".into())
        })?;
        let mut mesh = Mesh::with_capacity(grid.triangle_count());
        let mut corner_normals = Vec::with_capacity(grid.triangle_count());
        for tri in &grid.indices {
            let [a, b, c] = tri.map(|i| i as usize);
            mesh.push(Triangle::new(
                grid.vertices[a],
                grid.vertices[b],
                grid.vertices[c],
                material.clone(),
            ));
            corner_normals.push([normals[a], normals[b], normals[c]]);
        }
        Ok(NormalMappedMesh {
            mesh,
            corner_normals,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn lerp(min: f64, max: f64, i: usize, k: usize) -> f64 {
    min + (max - min) * i as f64 / (k - 1) as f64
}
