//! Single file related types. Provides [File].

use anyhow::Error;
use flate2::read::GzDecoder;
use std::io::Read;

/// Single file resolved from a `pack`. Content is kept gzip compressed, the
/// same way it is sent over the wire.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct File {
    content_gzip: Box<[u8]>,
}
impl File {
    /// Creates [self] from compressed content.
    pub fn new(content_gzip: Box<[u8]>) -> Self {
        Self { content_gzip }
    }

    /// Accesses file content in `gzip` encoding.
    pub fn content_gzip(&self) -> &[u8] {
        &self.content_gzip
    }

    /// Consumes [self] returning compressed content.
    pub fn into_content_gzip(self) -> Box<[u8]> {
        self.content_gzip
    }

    /// Decompresses content, the way receiving client does.
    pub fn content(&self) -> Result<Box<[u8]>, Error> {
        let mut content = Vec::new();
        GzDecoder::new(&*self.content_gzip).read_to_end(&mut content)?;
        Ok(content.into_boxed_slice())
    }
}
