//! Output entries, one per asset, depending on the packing mode.

use crate::{asset::CompressedAsset, route_path::RoutePath};
use std::{fmt, path::PathBuf};

/// Request method a route answers to. Static assets are only ever served for
/// `GET`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Method {
    /// `GET` request.
    Get,
}
impl Method {
    /// Method name as it appears in request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}
impl fmt::Display for Method {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single entry of generated route table. Maps (`path`, `method`) to a handler
/// serving embedded `compressed_asset.content_gzip`.
#[derive(Clone, Debug)]
pub struct RouteEntry {
    /// Request path the entry answers to.
    pub path: RoutePath,
    /// Request method the entry answers to.
    pub method: Method,
    /// The payload, embedded as a literal.
    pub compressed_asset: CompressedAsset,
}

/// Single file written in filesystem mode.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FilesystemEntry {
    /// Path relative to destination root, eg. `css/app.css.gz`.
    pub destination_path: PathBuf,
    /// Gzip compressed content to be written.
    pub content_gzip: Box<[u8]>,
}
