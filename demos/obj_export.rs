//! Sweeps a tube along a helix, tessellates a bicubic patch, and prints both
//! meshes as Wavefront OBJ on stdout.
//!
//! Run with `RUST_LOG=sweepgeo=debug` to see the mesh statistics.

use std::f64::consts::TAU;

use sweepgeo::geometry::{BicubicPatch, Helix};
use sweepgeo::math::Point3;
use sweepgeo::sweep::{RadialProfile, SweepCurve, SweepParams};
use sweepgeo::tessellation::{PatchParams, TessellatePatch};

fn main() -> sweepgeo::Result<()> {
    // Default: WARN for everything, INFO for sweepgeo.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("sweepgeo=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut tube = SweepCurve::new(
        Helix::new(2.0, 0.3)?,
        RadialProfile::circle_with(|t| 0.4 - 0.025 * t, 16)?,
        SweepParams::spanning(0.0, 2.0 * TAU, 96),
    )
    .execute(())?;

    let mut control = [Point3::origin(); 16];
    for (i, p) in control.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let (row, col) = ((i / 4) as f64, (i % 4) as f64);
        let inner = (1.0..3.0).contains(&row) && (1.0..3.0).contains(&col);
        let height = if inner { 1.0 } else { 0.0 };
        *p = Point3::new(col + 6.0, row, height);
    }
    let mut mesh = TessellatePatch::new(BicubicPatch::new(control), PatchParams::default())
        .execute(())?;

    mesh.append(&mut tube);
    print!("{}", mesh.to_obj());
    Ok(())
}
