//! Common crate, containing types shared between
//! `www-pack-packer` (the build time part) and `www-pack-loader` (the host side
//! reader of packed output).
//!
//! The packer turns a directory of static files into one of two outputs:
//! - a generated route table (see [artifact]), included into the firmware
//!   source, with every file embedded as a gzip compressed byte literal (see
//!   [literal]),
//! - a mirrored directory of gzip compressed files, each named after the
//!   original with [GZIP_SUFFIX] appended.
//!
//! The root types of this crate are [asset::Asset] (file read from source
//! directory), [asset::CompressedAsset] (the same file after compression) and
//! their output forms [entry::RouteEntry] and [entry::FilesystemEntry].

#![warn(missing_docs)]

pub mod artifact;
pub mod asset;
pub mod entry;
pub mod literal;
pub mod route_path;

/// Suffix appended to every file written in filesystem mode. The device looks
/// up request path + this suffix.
pub const GZIP_SUFFIX: &str = ".gz";
