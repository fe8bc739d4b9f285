//! Compression helpers. Contains [compress] turning raw content into
//! reproducible gzip stream and [compress_asset] doing the same for [Asset].

use crate::{
    common::asset::{Asset, CompressedAsset},
    error::Error,
};
use flate2::{Compression, GzBuilder, read::GzDecoder};
use std::io::{self, Read, Write};

/// Options for [compress].
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct CompressionOptions {
    /// Deflate level, `0` (store) to `9` (best). Payload size is what matters
    /// on the device, so the default is the best ratio.
    pub level: u32,
}
impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            level: Compression::best().level(),
        }
    }
}

/// Gzip compresses `content`.
///
/// Gzip header carries modification time, here it is always set to `0` (and
/// file name is not set at all), so identical `content` and `options` always
/// give identical bytes.
///
/// Unlike negotiating servers, the device always sends compressed body, so
/// even empty or incompressible content is compressed.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use www_pack_packer::compress::{compress, decompress, CompressionOptions};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let content_gzip = compress(b"<h1>hi</h1>", &CompressionOptions::default())?;
/// assert_eq!(&content_gzip[..2], b"\x1f\x8b");
/// assert_eq!(&*decompress(&content_gzip)?, b"<h1>hi</h1>");
/// #
/// # Ok(())
/// # }
/// ```
pub fn compress(
    content: &[u8],
    options: &CompressionOptions,
) -> Result<Box<[u8]>, Error> {
    if options.level > Compression::best().level() {
        return Err(Error::Compression(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("compression level {} out of range 0-9", options.level),
        )));
    }

    let mut content_gzip = GzBuilder::new()
        .mtime(0)
        .write(Vec::new(), Compression::new(options.level));
    content_gzip.write_all(content).map_err(Error::Compression)?;
    let content_gzip = content_gzip
        .finish()
        .map_err(Error::Compression)?
        .into_boxed_slice();

    Ok(content_gzip)
}

/// Compresses [Asset] content with [compress].
pub fn compress_asset(
    asset: Asset,
    options: &CompressionOptions,
) -> Result<CompressedAsset, Error> {
    let content_gzip = compress(&asset.content, options)?;

    log::info!(
        "compressed {}: content.len={}, content_gzip.len={}",
        asset.relative_path.display(),
        asset.content.len(),
        content_gzip.len()
    );

    Ok(CompressedAsset {
        asset,
        content_gzip,
    })
}

/// Reverses [compress]. Used to verify produced output.
pub fn decompress(content_gzip: &[u8]) -> Result<Box<[u8]>, Error> {
    let mut content = Vec::new();
    GzDecoder::new(content_gzip)
        .read_to_end(&mut content)
        .map_err(Error::Compression)?;
    Ok(content.into_boxed_slice())
}
