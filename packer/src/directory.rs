//! Directory helpers. Contains [walk] and [search] functions, used to gather
//! assets from source directory recursively.

use crate::{common::asset::Asset, error::Error};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Settings for [walk] function.
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct SearchOptions {
    /// Whether to follow links while traversing directories.
    pub follow_links: bool,
}
impl Default for SearchOptions {
    fn default() -> Self {
        Self { follow_links: true }
    }
}

/// Lazily walks the fs recursively and reads every regular file found as
/// [Asset].
///
/// Directory `path` is checked upfront, so missing or non-directory source
/// fails before anything is yielded. Entries are visited sorted by file name,
/// which makes the order (and so the generated output) stable across
/// filesystems.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::{fs, path::PathBuf};
/// # use www_pack_packer::directory::{walk, SearchOptions};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let source = tempfile::tempdir()?;
/// fs::create_dir(source.path().join("css"))?;
/// fs::write(source.path().join("css").join("app.css"), "body{}")?;
/// fs::write(source.path().join("index.html"), "<h1>hi</h1>")?;
///
/// let relative_paths = walk(source.path(), &SearchOptions::default())?
///     .map(|asset| asset.map(|asset| asset.relative_path))
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(
///     relative_paths,
///     [PathBuf::from("css/app.css"), PathBuf::from("index.html")]
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn walk(
    path: &Path,
    options: &SearchOptions,
) -> Result<impl Iterator<Item = Result<Asset, Error>>, Error> {
    // fail fast if there is nothing to walk
    let metadata = fs::metadata(path).map_err(Error::file_system(path))?;
    if !metadata.is_dir() {
        return Err(Error::FileSystem {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "source is not a directory"),
        });
    }

    let root = path.to_path_buf();
    let assets = WalkDir::new(path)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter()
        .map(move |entry| -> Result<Option<Asset>, Error> {
            // detect search errors
            let entry = entry?;

            // we are interested in files only
            // if follow_links is true, this will be resolved as link target
            if !entry.file_type().is_file() {
                return Ok(None);
            }

            let asset = asset_from_path(entry.path(), &root)?;
            Ok(Some(asset))
        })
        .filter_map(|entry_result| entry_result.transpose()); // strips Ok(None)

    Ok(assets)
}

/// Collects [walk] results, failing on first error.
pub fn search(
    path: &Path,
    options: &SearchOptions,
) -> Result<Box<[Asset]>, Error> {
    let assets = walk(path, options)?.collect::<Result<Box<[_]>, Error>>()?;
    Ok(assets)
}

/// Reads file under `path` into [Asset] with path relative to `root`.
fn asset_from_path(
    path: &Path,
    root: &Path,
) -> Result<Asset, Error> {
    let relative_path: PathBuf = path
        .strip_prefix(root)
        .map_err(|_| {
            Error::Generation(format!(
                "{} is not inside {}",
                path.display(),
                root.display()
            ))
        })?
        .to_path_buf();

    let content = fs::read(path)
        .map_err(Error::file_system(path))?
        .into_boxed_slice();

    Ok(Asset {
        relative_path,
        content,
    })
}
