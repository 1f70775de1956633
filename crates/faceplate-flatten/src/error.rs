//! Error types for the flattening core.

use thiserror::Error;

/// Errors surfaced by the flattening pipeline.
///
/// Per-edge and per-wire failures degrade locally and never appear here;
/// per-face failures degrade through the exact → mesh → placeholder
/// stages. Only the request-level conditions below reach callers.
#[derive(Error, Debug)]
pub enum FlattenError {
    /// The face normal has near-zero length and no basis can be built.
    #[error("face normal has near-zero length")]
    DegenerateNormal,

    /// A face index outside the session's face set.
    #[error("face index {index} out of range ({count} faces)")]
    InvalidFaceId {
        /// Requested index.
        index: usize,
        /// Number of faces available.
        count: usize,
    },

    /// A face carried no wires and no usable point set.
    #[error("no geometry found for face")]
    NoGeometry,

    /// Writing the drawing artifact failed; no partial output is kept.
    #[error("failed to write drawing artifact: {0}")]
    ExportWrite(#[from] std::io::Error),
}
