//! Load-time error taxonomy shared by the mesh and texture loaders.

use std::{io, path::PathBuf};

use thiserror::Error;

/// What exactly was wrong with a mesh line.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("missing {0}")]
    MissingToken(&'static str),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("invalid face index '{0}'")]
    InvalidIndex(String),
    #[error("faces with {0} vertices are not supported (expected 3 or 4)")]
    UnsupportedFaceArity(usize),
    #[error("face index {0} is not 1-based")]
    IndexUnderflow(i64),
    #[error("face index {index} refers past the {len} vertices seen so far")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{origin}:{line_no}: {kind} in '{line}'")]
    Parse {
        origin: String,
        line_no: usize,
        line: String,
        kind: ParseErrorKind,
    },
    #[error("failed to read {}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode image {}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}

pub type AssetResult<T> = Result<T, AssetError>;

impl AssetError {
    /// Parse failure kind, if this is a parse error.
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            AssetError::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
