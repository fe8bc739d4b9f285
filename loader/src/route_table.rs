//! Route table reader. Provides [RouteTable], parsed back from source
//! generated by packer.

use crate::{
    common::{artifact, literal},
    file::File,
    pack::{Pack, Resolution},
};
use anyhow::{Context, Error, anyhow, bail, ensure};
use http::Method;
use std::{fs, path::Path};

/// Single parsed table entry.
#[derive(PartialEq, Eq, Debug)]
pub struct Route {
    /// Request path, eg. `/index.html`.
    pub path: String,
    /// Request method, eg. `GET`.
    pub method: String,
    /// Name of device function called to serve payload.
    pub handler: String,
    /// Embedded payload.
    pub content_gzip: Box<[u8]>,
}
impl Route {
    /// Parses single entry line, without indentation.
    pub fn parse(line: &str) -> Result<Self, Error> {
        let mut rest = line
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix("},"))
            .ok_or_else(|| anyhow!("entry must be enclosed in `{{` and `}},`"))?;

        let path = take_literal(&mut rest).context("path")?;
        take_token(&mut rest, ", ")?;
        let method = take_literal(&mut rest).context("method")?;
        take_token(&mut rest, ", ")?;
        take_token(&mut rest, artifact::HANDLER_SIGNATURE)?;
        take_token(&mut rest, " { ")?;

        let (handler, remainder) = rest
            .split_once('(')
            .ok_or_else(|| anyhow!("missing handler call"))?;
        ensure!(
            artifact::is_identifier(handler),
            "handler {:?} is not an identifier",
            handler
        );
        rest = remainder;

        take_token(&mut rest, artifact::HANDLER_ARGUMENTS)?;
        take_token(&mut rest, ", ")?;
        let content_gzip = take_literal(&mut rest).context("payload")?;
        take_token(&mut rest, "); }")?;
        ensure!(rest.is_empty(), "unexpected trailing content {:?}", rest);

        Ok(Self {
            path: String::from_utf8(path.into_vec()).context("path")?,
            method: String::from_utf8(method.into_vec()).context("method")?,
            handler: handler.to_owned(),
            content_gzip,
        })
    }
}

/// Strips `token` from the beginning of `rest`.
fn take_token(
    rest: &mut &str,
    token: &str,
) -> Result<(), Error> {
    *rest = rest.strip_prefix(token).ok_or_else(|| {
        anyhow!(
            "expected {:?}, got {:?}",
            token,
            rest.chars().take(token.len() + 16).collect::<String>()
        )
    })?;
    Ok(())
}

/// Takes string literal (quotes and suffix included) from the beginning of
/// `rest` and decodes it.
fn take_literal(rest: &mut &str) -> Result<Box<[u8]>, Error> {
    let bytes = rest.as_bytes();
    ensure!(bytes.first() == Some(&b'"'), "expected literal");

    // find closing quote, skipping escaped characters
    let mut index = 1;
    loop {
        match bytes.get(index) {
            Some(b'\\') => index += 2,
            Some(b'"') => break,
            Some(_) => index += 1,
            None => bail!("unterminated literal"),
        }
    }
    let end = index + 1 + literal::SUFFIX.len();
    ensure!(
        rest.get(index + 1..end) == Some(literal::SUFFIX),
        "literal without `{}` suffix",
        literal::SUFFIX
    );

    let content = literal::decode(&rest[..end])?;
    *rest = &rest[end..];
    Ok(content)
}

/// Route table parsed from generated source.
#[derive(Debug)]
pub struct RouteTable {
    /// Entries in table order.
    pub routes: Box<[Route]>,
}
impl RouteTable {
    /// Parses generated table source. Empty lines and `//` comments are
    /// skipped.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let routes = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with("//"))
            .map(|(index, line)| Route::parse(line).with_context(|| format!("line {}", index + 1)))
            .collect::<Result<Box<[_]>, Error>>()?;

        Ok(Self { routes })
    }

    /// Reads and parses generated table file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .with_context(|| path.to_string_lossy().into_owned())?;
        Self::parse(&text).with_context(|| path.to_string_lossy().into_owned())
    }
}

impl Pack for RouteTable {
    /// Scans entries in table order, like the device router: first entry
    /// matching both path and method wins, path matching with other method
    /// gives [Resolution::MethodNotAllowed].
    fn resolve(
        &self,
        method: &Method,
        path: &str,
    ) -> Result<Resolution, Error> {
        let mut bad_method = false;
        for route in self.routes.iter() {
            if route.path != path {
                continue;
            }
            if route.method != method.as_str() {
                bad_method = true;
                continue;
            }
            return Ok(Resolution::Found(File::new(route.content_gzip.clone())));
        }

        if bad_method {
            Ok(Resolution::MethodNotAllowed)
        } else {
            Ok(Resolution::NotFound)
        }
    }
}
