//! Pack related types. Provides [Pack] trait.

use crate::file::File;
use anyhow::Error;
use http::Method;

/// Outcome of looking a request up in [Pack].
#[derive(PartialEq, Eq, Debug)]
pub enum Resolution {
    /// File exists for path and method.
    Found(File),
    /// Path exists, but not for requested method.
    MethodNotAllowed,
    /// Path does not exist.
    NotFound,
}

/// Trait representing packed output, a container for files identified by
/// request path and method.
pub trait Pack {
    /// Given request method and path, eg. `/dir1/dir2/file.html`, looks up
    /// the file. Returns error only if lookup itself failed (eg. file exists,
    /// but cannot be read).
    fn resolve(
        &self,
        method: &Method,
        path: &str,
    ) -> Result<Resolution, Error>;
}
