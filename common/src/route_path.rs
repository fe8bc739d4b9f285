//! Route path contains custom type for representing request path of a route.

use std::{borrow::Borrow, fmt, ops::Deref};

/// [RoutePath] represents request path a generated route answers to, eg.
/// `/css/app.css`. It is compared byte by byte with the path from request
/// line, so it is kept in percent-encoded form.
///
/// Custom type is used to enforce some rules, eg. starts with "/", contains
/// only characters safe to put in a request line and a string literal.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RoutePath {
    inner: String,
}
impl RoutePath {
    /// Construct path from string representation. Refer to [self] for details.
    /// Providing invalid path won't result in catastrophic failure, but
    /// such path will never be matched.
    pub fn from_string(inner: String) -> Self {
        Self { inner }
    }

    /// Consumes [self] returning inner string.
    pub fn into_string(self) -> String {
        self.inner
    }
}

// to allow searching in HashMap directly by request path (which is str)
impl Deref for RoutePath {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl Borrow<str> for RoutePath {
    fn borrow(&self) -> &str {
        self.inner.as_str()
    }
}
impl fmt::Display for RoutePath {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.inner)
    }
}
