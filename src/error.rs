use thiserror::Error;

/// Top-level error type for sweep and tessellation operations.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

impl SweepError {
    /// Returns `true` if this error reports degenerate geometry
    /// (undefined tangent, normal, or frame transport).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }

    /// Returns `true` if this error reports malformed caller input.
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

/// Degenerate geometry encountered during evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("tangent is undefined at t = {t}: first derivative vanishes")]
    ZeroTangent { t: f64 },

    #[error("normal is undefined at t = {t}: second derivative is parallel to the tangent")]
    UndefinedNormal { t: f64 },

    #[error("curve evaluation is not finite at t = {t}")]
    NonFinite { t: f64 },

    #[error("frame transport is undefined at station {station}")]
    TransportDegenerate { station: usize },

    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Malformed input passed by the caller.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("expected {expected} control points, found {found}")]
    ControlPointCount { expected: &'static str, found: usize },

    #[error("ring {ring} has {found} points, expected {expected}")]
    RingCardinality {
        ring: usize,
        expected: usize,
        found: usize,
    },

    #[error("at least 2 rings are required for stitching, found {found}")]
    TooFewRings { found: usize },

    #[error("at least {required} points are required, found {found}")]
    TooFewPoints { required: usize, found: usize },

    #[error("vertex index {index} is out of range for {count} vertices (indices are 1-based)")]
    VertexIndexOutOfRange { index: usize, count: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors related to tessellation and shading lookups.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("triangle {index} is out of range for {count} triangles")]
    TriangleOutOfRange { index: usize, count: usize },
}

/// Convenience type alias for results using [`SweepError`].
pub type Result<T> = std::result::Result<T, SweepError>;
