//! www-pack-packer is the build time part of www-pack. It takes a directory of
//! static web assets (html, css, js, images, ...) and prepares them to be served
//! by a minimal http server running on a resource constrained device.
//!
//! Every asset is gzip compressed (at the best ratio, with zeroed timestamp, so
//! the output is reproducible) and the device always serves it with
//! `Content-Encoding: gzip`. Two deployment modes are available:
//! - **embedded**, where a route table is generated as a C++ source fragment,
//!   with each asset embedded as a byte literal and compiled into the firmware
//!   image. See [route_table].
//! - **filesystem**, where the source tree is mirrored into a destination
//!   directory, each file replaced with its compressed form and `.gz` suffix
//!   appended, to be flashed as filesystem image. See [filesystem].
//!
//! This crate is used in build scripts, not on the device. It can be used in
//! two ways:
//! - As a standalone application, run as a custom build step. See `--help`
//!   for details.
//! - As a library, calling [pipeline::run] or composing individual stages.
//!
//! # Using as a standalone application
//!
//! ```text
//! $ www-pack-packer routes ./www ./build/generated/static_routes.h
//! $ www-pack-packer filesystem ./www ./data/www
//! ```
//!
//! # Using as a library
//!
//! ```no_run
//! # use anyhow::Error;
//! # use std::path::PathBuf;
//! # use www_pack_packer::{
//! #     pipeline::{run, Mode, PipelineOptions},
//! #     route_table::RouteTableOptions,
//! # };
//!
//! # fn main() -> Result<(), Error> {
//! run(
//!     &PathBuf::from("www"),
//!     &Mode::Embedded {
//!         output_file: PathBuf::from("build/generated/static_routes.h"),
//!         options: RouteTableOptions::default(),
//!     },
//!     &PipelineOptions::default(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! Stages can also be used directly: [directory::walk] to read assets,
//! [compress::compress_asset] to compress them, then [route_table::Builder] or
//! [filesystem::pack].

#![warn(missing_docs)]

pub use www_pack_common as common;

pub mod compress;
pub mod directory;
pub mod error;
pub mod filesystem;
pub mod pipeline;
pub mod route_path;
pub mod route_table;

pub use error::Error;
