//! Packed directory reader. Provides [Directory].

use crate::{
    common::GZIP_SUFFIX,
    file::File,
    pack::{Pack, Resolution},
};
use anyhow::{Context, Error};
use http::Method;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Directory written by packer in filesystem mode. Request path is looked up
/// as-is (no percent decoding), with [GZIP_SUFFIX] appended, like the device
/// does.
#[derive(Debug)]
pub struct Directory {
    root: PathBuf,
}
impl Directory {
    /// Creates [self] serving files below `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Maps request path to file path, eg. `/css/app.css` to
    /// `<root>/css/app.css.gz`. Returns [None] for paths escaping root or
    /// otherwise not mappable.
    pub fn file_path(
        &self,
        path: &str,
    ) -> Option<PathBuf> {
        let relative = path.strip_prefix('/')?;

        let mut file_path = self.root.clone();
        for segment in relative.split('/') {
            if matches!(segment, "" | "." | "..") || segment.contains('\\') {
                return None;
            }
            file_path.push(segment);
        }

        let mut file_path = file_path.into_os_string();
        file_path.push(GZIP_SUFFIX);
        Some(PathBuf::from(file_path))
    }

    /// Root of the directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Pack for Directory {
    /// Only `GET` is served, other methods on existing file give
    /// [Resolution::MethodNotAllowed].
    fn resolve(
        &self,
        method: &Method,
        path: &str,
    ) -> Result<Resolution, Error> {
        let Some(file_path) = self.file_path(path) else {
            return Ok(Resolution::NotFound);
        };
        if !file_path.is_file() {
            return Ok(Resolution::NotFound);
        }
        if *method != Method::GET {
            return Ok(Resolution::MethodNotAllowed);
        }

        let content_gzip = fs::read(&file_path)
            .with_context(|| file_path.to_string_lossy().into_owned())?
            .into_boxed_slice();

        Ok(Resolution::Found(File::new(content_gzip)))
    }
}
