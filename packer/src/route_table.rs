//! Route table helpers. Contains [Builder], builder for [RouteTable], and
//! [store_file] writing it as a source fragment for the firmware.

use crate::{
    common::{
        artifact,
        asset::CompressedAsset,
        entry::{Method, RouteEntry},
        literal,
        route_path::RoutePath,
    },
    error::Error,
    route_path::{self, RouteKey},
};
use std::{
    collections::{HashMap, hash_map},
    ffi::OsString,
    fmt::Write as _,
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

/// Options for [Builder].
///
/// If not sure what to set here, use [Default].
#[derive(Clone, Debug)]
pub struct RouteTableOptions {
    /// How to derive route paths from asset paths.
    pub route_key: RouteKey,
    /// Name of device function called with `client`, `request` and the
    /// payload.
    pub handler: String,
}
impl Default for RouteTableOptions {
    fn default() -> Self {
        Self {
            route_key: RouteKey::default(),
            handler: artifact::HANDLER_DEFAULT.to_owned(),
        }
    }
}

/// Complete route table, ready to be rendered.
#[derive(Debug)]
pub struct RouteTable {
    /// Name of device function serving the payload.
    pub handler: String,
    /// Entries in order they were added.
    pub route_entries: Box<[RouteEntry]>,
}

/// Main builder for [RouteTable]. Keeps entries in insertion (walk) order and
/// refuses duplicated route paths.
#[derive(Debug)]
pub struct Builder {
    options: RouteTableOptions,
    route_entries: Vec<RouteEntry>,
    relative_paths_by_route_path: HashMap<RoutePath, PathBuf>,
}
impl Builder {
    /// Creates empty [self] to be filled with assets.
    pub fn new(options: RouteTableOptions) -> Result<Self, Error> {
        if !artifact::is_identifier(&options.handler) {
            return Err(Error::Generation(format!(
                "handler {:?} is not a valid identifier",
                options.handler
            )));
        }

        Ok(Self {
            options,
            route_entries: Vec::new(),
            relative_paths_by_route_path: HashMap::new(),
        })
    }

    /// Adds asset to the table.
    pub fn compressed_asset_add(
        &mut self,
        compressed_asset: CompressedAsset,
    ) -> Result<(), Error> {
        let relative_path = &compressed_asset.asset.relative_path;
        let path = route_path::from_asset_relative_path(relative_path, self.options.route_key)?;

        let entry = match self.relative_paths_by_route_path.entry(path.clone()) {
            hash_map::Entry::Occupied(entry) => {
                return Err(Error::RouteCollision {
                    path: path.into_string(),
                    first: entry.get().clone(),
                    second: relative_path.clone(),
                });
            }
            hash_map::Entry::Vacant(entry) => entry,
        };
        entry.insert(relative_path.clone());

        log::info!(
            "route {} {} -> {}",
            Method::Get,
            path,
            relative_path.display()
        );

        self.route_entries.push(RouteEntry {
            path,
            method: Method::Get,
            compressed_asset,
        });

        Ok(())
    }

    /// Adds collection of assets to the table.
    pub fn compressed_assets_add(
        &mut self,
        compressed_assets: impl IntoIterator<Item = CompressedAsset>,
    ) -> Result<(), Error> {
        compressed_assets
            .into_iter()
            .try_for_each(|compressed_asset| self.compressed_asset_add(compressed_asset))?;

        Ok(())
    }

    /// Finalizes the builder, returning built [RouteTable].
    pub fn finalize(self) -> RouteTable {
        RouteTable {
            handler: self.options.handler,
            route_entries: self.route_entries.into_boxed_slice(),
        }
    }
}

/// Renders `route_table` as source text, one entry per line.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use www_pack_packer::{
/// #     common::asset::{Asset, CompressedAsset},
/// #     route_table::{render, Builder, RouteTableOptions},
/// # };
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let mut route_table = Builder::new(RouteTableOptions::default())?;
/// route_table.compressed_asset_add(CompressedAsset {
///     asset: Asset {
///         relative_path: PathBuf::from("index.html"),
///         content: Box::new(*b"hi"),
///     },
///     content_gzip: Box::new([0x1f, 0x8b]),
/// })?;
/// let route_table = route_table.finalize();
///
/// assert_eq!(
///     render(&route_table),
///     "// Generated by www-pack-packer. Do not edit.\n    \
///      {\"/index.html\"sv, \"GET\"sv, [](WiFiClient& client, HttpRequest& request) \
///      { serve_static(client, request, \"\\x1f\\x8b\"sv); }},\n"
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn render(route_table: &RouteTable) -> String {
    let mut text = String::new();
    text.push_str(artifact::HEADER);
    text.push('\n');

    for route_entry in route_table.route_entries.iter() {
        // writing to String never fails
        writeln!(
            text,
            "{}{{{}, {}, {} {{ {}({}, {}); }}}},",
            artifact::ENTRY_INDENT,
            literal::encode_text(&route_entry.path),
            literal::encode_text(route_entry.method.as_str()),
            artifact::HANDLER_SIGNATURE,
            route_table.handler,
            artifact::HANDLER_ARGUMENTS,
            literal::encode(&route_entry.compressed_asset.content_gzip),
        )
        .unwrap();
    }

    text
}

/// Renders `route_table` and writes it to given file path.
///
/// Parent directory is created if needed. Content is written to a temporary
/// file next to `path` and renamed over `path` only when complete, so `path`
/// never contains a partially written table.
pub fn store_file(
    route_table: &RouteTable,
    path: &Path,
) -> Result<(), Error> {
    let text = render(route_table);

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(Error::file_system(parent))?;
    }

    let path_temporary = path_temporary(path)?;
    let result = store_file_temporary(&text, &path_temporary)
        .and_then(|()| fs::rename(&path_temporary, path).map_err(Error::file_system(path)));
    if result.is_err() {
        // leftover is not usable anyway, error of the store is more relevant
        let _ = fs::remove_file(&path_temporary);
    }

    result
}

/// Builds path of the temporary file used by [store_file], eg.
/// `static_routes.h` -> `.static_routes.h.tmp`.
fn path_temporary(path: &Path) -> Result<PathBuf, Error> {
    let file_name = path.file_name().ok_or_else(|| {
        Error::Generation(format!("output path {} has no file name", path.display()))
    })?;

    let mut file_name_temporary = OsString::from(".");
    file_name_temporary.push(file_name);
    file_name_temporary.push(".tmp");

    Ok(path.with_file_name(file_name_temporary))
}

fn store_file_temporary(
    text: &str,
    path: &Path,
) -> Result<(), Error> {
    let write = || -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        Ok(())
    };
    write().map_err(Error::file_system(path))
}

/// Summary of [generate] run.
#[derive(Debug)]
pub struct RouteTableReport {
    /// Route paths in table order.
    pub route_paths: Box<[RoutePath]>,
    /// Total length of raw assets.
    pub content_length: usize,
    /// Total length of embedded payloads.
    pub content_gzip_length: usize,
}

/// Builds [RouteTable] from `compressed_assets` and writes it to `path`.
///
/// Previously generated file is removed first, so if anything fails there is
/// no table at `path` at all (rather than a stale one).
pub fn generate(
    compressed_assets: impl IntoIterator<Item = Result<CompressedAsset, Error>>,
    path: &Path,
    options: RouteTableOptions,
) -> Result<RouteTableReport, Error> {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("removed previous route table {}", path.display()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(Error::file_system(path)(error)),
    }

    let mut builder = Builder::new(options)?;
    for compressed_asset in compressed_assets {
        builder.compressed_asset_add(compressed_asset?)?;
    }
    let route_table = builder.finalize();

    store_file(&route_table, path)?;

    let report = RouteTableReport {
        route_paths: route_table
            .route_entries
            .iter()
            .map(|route_entry| route_entry.path.clone())
            .collect(),
        content_length: route_table
            .route_entries
            .iter()
            .map(|route_entry| route_entry.compressed_asset.asset.content.len())
            .sum(),
        content_gzip_length: route_table
            .route_entries
            .iter()
            .map(|route_entry| route_entry.compressed_asset.content_gzip.len())
            .sum(),
    };

    log::info!(
        "written {} routes to {} ({} -> {} bytes)",
        report.route_paths.len(),
        path.display(),
        report.content_length,
        report.content_gzip_length
    );

    Ok(report)
}
