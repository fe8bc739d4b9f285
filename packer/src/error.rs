//! Error type shared by all packer stages.

use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Reasons for a pipeline run to abort. None of them is retried, the build
/// should be fixed and run again.
#[derive(Debug, Error)]
pub enum Error {
    /// Source directory missing or unreadable, destination not writable,
    /// removal failed, etc.
    #[error("filesystem operation failed on {}", path.display())]
    FileSystem {
        /// The path that operation failed on.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: io::Error,
    },
    /// Compressor failed. Never expected with in-memory buffers, indicates
    /// broken environment.
    #[error("compression failed")]
    Compression(#[source] io::Error),
    /// Output could not be generated, eg. path not representable as route.
    #[error("generation failed: {0}")]
    Generation(String),
    /// Two different assets map to the same route path.
    #[error(
        "route {path} produced by both {} and {}",
        first.display(),
        second.display()
    )]
    RouteCollision {
        /// The colliding route path.
        path: String,
        /// Asset which added the route first.
        first: PathBuf,
        /// Asset which tried to add the same route.
        second: PathBuf,
    },
}
impl Error {
    /// Builds [Error::FileSystem] mapper for use with `map_err`.
    pub(crate) fn file_system(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::FileSystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(Path::to_path_buf).unwrap_or_default();
        Self::FileSystem {
            path,
            source: error.into(),
        }
    }
}
