//! Assets, single files found in the source directory.

use std::path::PathBuf;

/// [Asset] represents an original file from the source directory.
///
/// Assets are created once per file by walking the source directory and never
/// modified afterwards.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Asset {
    /// Path of the file relative to the source directory, eg. `css/app.css`.
    pub relative_path: PathBuf,
    /// Raw (not compressed) file contents.
    pub content: Box<[u8]>,
}

/// [Asset] together with its gzip compressed content.
///
/// Compression is deterministic, so the same [Asset] always produces the same
/// `content_gzip`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CompressedAsset {
    /// The source asset.
    pub asset: Asset,
    /// Gzip compressed `asset.content`.
    pub content_gzip: Box<[u8]>,
}
