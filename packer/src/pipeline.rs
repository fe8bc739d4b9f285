//! Pipeline entry point. Contains [run], taking source directory and [Mode]
//! and producing requested output, to be called from any build orchestration.

use crate::{
    compress::{self, CompressionOptions},
    directory::{self, SearchOptions},
    error::Error,
    filesystem::{self, FilesystemOptions, PackReport},
    route_table::{self, RouteTableOptions, RouteTableReport},
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Output to be produced by [run].
#[derive(Debug)]
pub enum Mode {
    /// Generate route table with embedded payloads, written to `output_file`.
    Embedded {
        /// Path of generated table, eg. `build/generated/static_routes.h`.
        output_file: PathBuf,
        /// Table options.
        options: RouteTableOptions,
    },
    /// Write mirrored tree of gzip files below `destination`.
    Filesystem {
        /// Destination root, eg. `data/www`.
        destination: PathBuf,
        /// Packing options.
        options: FilesystemOptions,
    },
}

/// Options common for both [Mode]s.
///
/// If not sure what to set here, use [Default].
#[derive(Debug, Default)]
pub struct PipelineOptions {
    /// Source directory traversal options.
    pub search: SearchOptions,
    /// Compression options.
    pub compression: CompressionOptions,
}

/// Outcome of successful [run].
#[derive(Debug)]
pub enum Report {
    /// Result of [Mode::Embedded].
    Embedded(RouteTableReport),
    /// Result of [Mode::Filesystem].
    Filesystem(PackReport),
}

/// Runs the whole pipeline: walks `source`, compresses every asset and
/// produces output for `mode`. Stops on first error.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::fs;
/// # use www_pack_packer::pipeline::{run, Mode, PipelineOptions, Report};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let workspace = tempfile::tempdir()?;
/// let source = workspace.path().join("www");
/// fs::create_dir_all(source.join("css"))?;
/// fs::write(source.join("css").join("app.css"), "body{}")?;
///
/// let report = run(
///     &source,
///     &Mode::Filesystem {
///         destination: workspace.path().join("data").join("www"),
///         options: Default::default(),
///     },
///     &PipelineOptions::default(),
/// )?;
/// assert!(matches!(report, Report::Filesystem(_)));
/// assert!(workspace.path().join("data/www/css/app.css.gz").is_file());
/// #
/// # Ok(())
/// # }
/// ```
pub fn run(
    source: &Path,
    mode: &Mode,
    options: &PipelineOptions,
) -> Result<Report, Error> {
    log::info!("packing {}", source.display());

    let compressed_assets = directory::walk(source, &options.search)?.map(|asset| {
        asset.and_then(|asset| compress::compress_asset(asset, &options.compression))
    });

    let report = match mode {
        Mode::Embedded {
            output_file,
            options,
        } => {
            ensure_outside(source, output_file)?;
            let report = route_table::generate(compressed_assets, output_file, options.clone())?;
            Report::Embedded(report)
        }
        Mode::Filesystem {
            destination,
            options,
        } => {
            ensure_outside(source, destination)?;
            ensure_outside(destination, source)?;
            let report = filesystem::pack(compressed_assets, destination, options)?;
            Report::Filesystem(report)
        }
    };

    Ok(report)
}

/// Fails if `path` is `directory` or lies inside it.
///
/// Output written into the source would be picked up as asset by the next
/// run, and wiping a destination containing source would destroy it.
fn ensure_outside(
    directory: &Path,
    path: &Path,
) -> Result<(), Error> {
    let directory_resolved = resolve(directory)?;
    let path_resolved = resolve(path)?;

    if path_resolved.starts_with(&directory_resolved) {
        return Err(Error::FileSystem {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("must not be inside {}", directory.display()),
            ),
        });
    }

    Ok(())
}

/// Resolves `path` to absolute form. Symlinks are resolved for the longest
/// existing ancestor, the rest (not existing yet) is appended as is.
fn resolve(path: &Path) -> Result<PathBuf, Error> {
    let path_absolute = std::path::absolute(path).map_err(Error::file_system(path))?;

    for existing in path_absolute.ancestors() {
        match fs::canonicalize(existing) {
            Ok(existing_resolved) => {
                let rest = path_absolute.strip_prefix(existing).map_err(|_| {
                    Error::Generation(format!("cannot resolve {}", path.display()))
                })?;
                return Ok(existing_resolved.join(rest));
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => continue,
            Err(error) => return Err(Error::file_system(existing)(error)),
        }
    }

    Ok(path_absolute)
}
