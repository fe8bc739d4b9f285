//! www-pack-loader is the host side counterpart of
//! [www-pack-packer](../www_pack_packer/index.html). It reads output produced by
//! the packer and answers http requests the way the device does, which is
//! useful for previewing and verifying packed assets without flashing them.
//!
//! Two [pack::Pack] implementations are provided, one per packing mode:
//! - [route_table::RouteTable], parsed back from generated route table source.
//! - [directory::Directory], looking files up in packed directory by request
//!   path + `.gz`.
//!
//! Both return [file::File], holding gzip compressed content. [responder]
//! wraps [pack::Pack] and builds http responses with headers the device
//! sends: `Content-Encoding: gzip`, `Content-Length`, `Cache-Control` and
//! `Content-Type` for known extensions.
//!
//! # Examples
//!
//! ```
//! # use anyhow::Error;
//! # use http::{Method, StatusCode, header};
//! # use www_pack_loader::{responder::Responder, route_table::RouteTable};
//! #
//! # fn main() -> Result<(), Error> {
//! #
//! let route_table = RouteTable::parse(concat!(
//!     "// Generated by www-pack-packer. Do not edit.\n",
//!     r#"    {"/index.html"sv, "GET"sv, [](WiFiClient& client, HttpRequest& request) { serve_static(client, request, "\x1f\x8b"sv); }},"#,
//!     "\n",
//! ))?;
//! let responder = Responder::new(&route_table);
//!
//! let response = responder.respond_flatten(&Method::GET, "/index.html");
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
//! assert_eq!(&**response.body(), b"\x1f\x8b");
//!
//! let response = responder.respond_flatten(&Method::GET, "/missing.html");
//! assert_eq!(response.status(), StatusCode::NOT_FOUND);
//! #
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use www_pack_common as common;

pub mod directory;
pub mod file;
pub mod pack;
pub mod responder;
pub mod route_table;
