//! Filesystem helpers. Contains [pack] writing assets as a mirrored tree of
//! gzip files, to be flashed as device filesystem image.

use crate::{
    common::{GZIP_SUFFIX, asset::CompressedAsset, entry::FilesystemEntry},
    error::Error,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// How destination directory is brought in line with the source.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Strategy {
    /// Remove everything from destination, then write all entries.
    #[default]
    Wipe,
    /// Remove only files not produced by this run, write only added and
    /// changed entries.
    Sync,
}

/// Options for [pack].
///
/// If not sure what to set here, use [Default].
#[derive(Default, Debug)]
pub struct FilesystemOptions {
    /// Destination update strategy.
    pub strategy: Strategy,
}

/// Difference between destination directory content before the run and
/// entries produced by the run. All paths are relative to destination.
#[derive(Default, PartialEq, Eq, Debug)]
pub struct PackReport {
    /// Entries not present in destination before.
    pub added: Vec<PathBuf>,
    /// Entries present in destination, but with different content.
    pub changed: Vec<PathBuf>,
    /// Entries present in destination with identical content.
    pub unchanged: Vec<PathBuf>,
    /// Files present in destination, not produced by this run.
    pub removed: Vec<PathBuf>,
}

/// Creates [FilesystemEntry] for `compressed_asset`, eg. `css/app.css` becomes
/// `css/app.css.gz`.
pub fn entry_from_compressed_asset(compressed_asset: CompressedAsset) -> FilesystemEntry {
    let CompressedAsset {
        asset,
        content_gzip,
    } = compressed_asset;

    let mut destination_path = asset.relative_path.into_os_string();
    destination_path.push(GZIP_SUFFIX);

    FilesystemEntry {
        destination_path: PathBuf::from(destination_path),
        content_gzip,
    }
}

/// Compares `entries` against current content of `destination`.
///
/// Missing `destination` is treated as empty. Only regular files are read,
/// any other entry (eg. symlink) at an entry path is reported as changed.
pub fn diff(
    entries: &[FilesystemEntry],
    destination: &Path,
) -> Result<PackReport, Error> {
    let mut existing = existing_files(destination)?;
    let mut report = PackReport::default();

    for entry in entries {
        let Some(is_file) = existing.remove(&entry.destination_path) else {
            report.added.push(entry.destination_path.clone());
            continue;
        };
        if !is_file {
            report.changed.push(entry.destination_path.clone());
            continue;
        }

        let path = destination.join(&entry.destination_path);
        let content_gzip = fs::read(&path).map_err(Error::file_system(&path))?;
        if *content_gzip == *entry.content_gzip {
            report.unchanged.push(entry.destination_path.clone());
        } else {
            report.changed.push(entry.destination_path.clone());
        }
    }

    report.removed = existing.into_keys().collect();

    Ok(report)
}

/// Writes every compressed asset as [FilesystemEntry] below `destination`.
///
/// When finished, `destination` contains exactly one file per asset and
/// nothing else, regardless of [Strategy]. All assets are compressed before
/// `destination` is touched, so a failing asset leaves destination as it was.
/// Failure while writing may leave `destination` partially populated.
pub fn pack(
    compressed_assets: impl IntoIterator<Item = Result<CompressedAsset, Error>>,
    destination: &Path,
    options: &FilesystemOptions,
) -> Result<PackReport, Error> {
    let entries = compressed_assets
        .into_iter()
        .map(|compressed_asset| compressed_asset.map(entry_from_compressed_asset))
        .collect::<Result<Vec<_>, Error>>()?;
    ensure_no_conflicts(&entries)?;

    let report = diff(&entries, destination)?;
    for removed in report.removed.iter() {
        log::warn!("removing stale {}", removed.display());
    }

    match options.strategy {
        Strategy::Wipe => {
            wipe(destination)?;
            for entry in entries.iter() {
                write_entry(destination, entry)?;
            }
        }
        Strategy::Sync => {
            fs::create_dir_all(destination).map_err(Error::file_system(destination))?;
            for removed in report.removed.iter() {
                let path = destination.join(removed);
                fs::remove_file(&path).map_err(Error::file_system(&path))?;
            }
            prune_empty_directories(destination)?;

            let rewrite = report
                .added
                .iter()
                .chain(report.changed.iter())
                .collect::<BTreeSet<_>>();
            for entry in entries
                .iter()
                .filter(|entry| rewrite.contains(&entry.destination_path))
            {
                let path = destination.join(&entry.destination_path);
                remove_non_file(&path)?;
                write_entry(destination, entry)?;
            }
        }
    }

    log::info!(
        "packed {} files to {} (added {}, changed {}, unchanged {}, removed {})",
        entries.len(),
        destination.display(),
        report.added.len(),
        report.changed.len(),
        report.unchanged.len(),
        report.removed.len()
    );

    Ok(report)
}

/// Lists non-directory entries below `destination`, relative to it, with flag
/// telling whether entry is a regular file. Links are not followed.
fn existing_files(destination: &Path) -> Result<BTreeMap<PathBuf, bool>, Error> {
    match fs::metadata(destination) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            return Err(Error::FileSystem {
                path: destination.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::NotADirectory,
                    "destination is not a directory",
                ),
            });
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(error) => return Err(Error::file_system(destination)(error)),
    }

    WalkDir::new(destination)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) => Some(
                entry
                    .path()
                    .strip_prefix(destination)
                    .map(|relative_path| {
                        (relative_path.to_path_buf(), entry.file_type().is_file())
                    })
                    .map_err(|_| {
                        Error::Generation(format!(
                            "{} is not inside {}",
                            entry.path().display(),
                            destination.display()
                        ))
                    }),
            ),
            Err(error) => Some(Err(error.into())),
        })
        .collect()
}

/// Fails when an entry would need to be both a file and a directory, eg.
/// source `x` and `x.gz/y` give `x.gz` and `x.gz/y.gz`.
fn ensure_no_conflicts(entries: &[FilesystemEntry]) -> Result<(), Error> {
    let destination_paths = entries
        .iter()
        .map(|entry| entry.destination_path.as_path())
        .collect::<BTreeSet<_>>();

    for entry in entries {
        if let Some(ancestor) = entry
            .destination_path
            .ancestors()
            .skip(1)
            .find(|ancestor| destination_paths.contains(ancestor))
        {
            return Err(Error::Generation(format!(
                "{} would be written both as file and as directory of {}",
                ancestor.display(),
                entry.destination_path.display()
            )));
        }
    }

    Ok(())
}

/// Removes all content of `destination`, keeping (or creating) the directory
/// itself.
fn wipe(destination: &Path) -> Result<(), Error> {
    fs::create_dir_all(destination).map_err(Error::file_system(destination))?;

    for entry in fs::read_dir(destination).map_err(Error::file_system(destination))? {
        let entry = entry.map_err(Error::file_system(destination))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(Error::file_system(&path))?;

        let result = if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(Error::file_system(&path))?;
    }

    log::debug!("wiped {}", destination.display());
    Ok(())
}

/// Removes directories left empty below `destination` (but not `destination`
/// itself).
fn prune_empty_directories(destination: &Path) -> Result<(), Error> {
    for entry in WalkDir::new(destination).min_depth(1).contents_first(true) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let is_empty = fs::read_dir(entry.path())
            .map_err(Error::file_system(entry.path()))?
            .next()
            .is_none();
        if is_empty {
            fs::remove_dir(entry.path()).map_err(Error::file_system(entry.path()))?;
            log::debug!("removed empty directory {}", entry.path().display());
        }
    }

    Ok(())
}

/// Removes whatever is at `path` unless it is a regular file or nothing. A
/// symlink is removed itself, never written through.
fn remove_non_file(path: &Path) -> Result<(), Error> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(Error::file_system(path)(error)),
    };

    let file_type = metadata.file_type();
    if file_type.is_file() {
        return Ok(());
    }

    let result = if file_type.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(Error::file_system(path))?;

    log::debug!("removed non-file entry {}", path.display());
    Ok(())
}

fn write_entry(
    destination: &Path,
    entry: &FilesystemEntry,
) -> Result<(), Error> {
    let path = destination.join(&entry.destination_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::file_system(parent))?;
    }
    fs::write(&path, &entry.content_gzip).map_err(Error::file_system(&path))?;

    log::debug!(
        "written {} ({} bytes)",
        path.display(),
        entry.content_gzip.len()
    );
    Ok(())
}
