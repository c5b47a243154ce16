pub mod curve;
pub mod surface;

pub use curve::{BezierCurve, DifferentiableCurve, DifferentiableFunction, Helix};
pub use surface::{BicubicPatch, Plane, Surface, SurfaceDomain};
