use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while preparing geometry for a frame.
#[derive(Debug, Error)]
pub enum ShadeError {
    /// Input data is malformed, e.g. a triangle soup whose length is not a multiple of 3.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A triangle is collinear, so its face normal has no direction.
    #[error("degenerate triangle {triangle}: face normal has zero length")]
    DegenerateTriangle { triangle: usize },

    /// The face normals around a vertex cancel out.
    #[error("degenerate vertex {vertex}: accumulated normal has zero length")]
    DegenerateVertex { vertex: usize },

    #[error("failed to load OBJ file {path}: {source}")]
    ObjLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl ShadeError {
    /// True for either flavour of zero-length normalisation.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            ShadeError::DegenerateTriangle { .. } | ShadeError::DegenerateVertex { .. }
        )
    }
}

pub type ShadeResult<T> = Result<T, ShadeError>;
