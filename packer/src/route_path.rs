//! Route path helpers. Contains [from_relative_path] creating route paths from
//! relative fs paths.

use crate::{common::route_path::RoutePath, error::Error};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::{
    iter,
    path::{Component, Path},
};

/// Characters escaped in route path segment. Beside controls and non-ascii
/// (always escaped) this covers characters not allowed in url path segment and
/// quote/backslash, which would need escaping in string literal.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// How asset relative path is turned into route path.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum RouteKey {
    /// Whole relative path is used, eg. `css/app.css` -> `/css/app.css`. Two
    /// assets can never map to the same route.
    #[default]
    RelativePath,
    /// Only file name is used, eg. `css/app.css` -> `/app.css`. Files with the
    /// same name in different directories collide, which is reported as
    /// error.
    FileName,
}

/// Creates route path according to [RouteKey].
pub fn from_asset_relative_path(
    relative_path: &Path,
    route_key: RouteKey,
) -> Result<RoutePath, Error> {
    match route_key {
        RouteKey::RelativePath => from_relative_path(relative_path),
        RouteKey::FileName => from_file_name(relative_path),
    }
}

/// Creates route path (eg. "/dir1/dir2/file.html") from relative fs path (eg.
/// "dir1/dir2/file.html").
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use www_pack_packer::{
/// #    common::route_path::RoutePath, route_path::from_relative_path,
/// # };
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// assert_eq!(
///     from_relative_path(&PathBuf::from("path/to/my file.txt"))?,
///     RoutePath::from_string("/path/to/my%20file.txt".to_owned()),
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn from_relative_path(relative_path: &Path) -> Result<RoutePath, Error> {
    // list of path components, eg. ["dir1", "dir2", "file.bin"]
    let relative_path_components = relative_path
        .components()
        .map(|component| segment_from_component(relative_path, component))
        .collect::<Result<Vec<_>, Error>>()?;

    if relative_path_components.is_empty() {
        return Err(Error::Generation("relative path must not be empty".to_owned()));
    }

    // we add empty element at the beginning to have path starting with /
    let route_path_string = itertools::join(
        iter::once(String::new()).chain(relative_path_components),
        "/",
    );

    Ok(RoutePath::from_string(route_path_string))
}

/// Creates route path (eg. "/file.html") from file name of relative fs path
/// (eg. "dir1/dir2/file.html"), discarding directories.
pub fn from_file_name(relative_path: &Path) -> Result<RoutePath, Error> {
    let file_name = relative_path
        .components()
        .next_back()
        .ok_or_else(|| Error::Generation("relative path must not be empty".to_owned()))?;

    let segment = segment_from_component(relative_path, file_name)?;

    Ok(RoutePath::from_string(format!("/{}", segment)))
}

/// Validates and percent-encodes single path component.
fn segment_from_component(
    relative_path: &Path,
    component: Component<'_>,
) -> Result<String, Error> {
    // we cannot handle things like '/' or '.' or '..' here
    let Component::Normal(component) = component else {
        return Err(Error::Generation(format!(
            "relative path {} must contain only standard path items, got {:?}",
            relative_path.display(),
            component
        )));
    };

    let component = component.to_str().ok_or_else(|| {
        Error::Generation(format!(
            "cannot convert path component of {} to string",
            relative_path.display()
        ))
    })?;

    Ok(utf8_percent_encode(component, SEGMENT).to_string())
}
