//! Module containing [Responder] - service taking http request (parts) and
//! returning http responses, as the device would.

use crate::pack::{Pack, Resolution};
use anyhow::Error;
use http::{
    HeaderValue, Method, StatusCode, header,
    response::Response as HttpResponse,
};

/// Http response type specialization. Body is gzip compressed.
pub type Response = HttpResponse<Box<[u8]>>;

/// `cache-control` sent with every file.
pub const CACHE_CONTROL: &str = "max-age=86400";

/// Responder service, providing http response for requests, looking for
/// file in [Pack].
///
/// There are two main methods for this type:
/// - [Self::respond] - generates http response for successful requests and lets
///   user handle errors manually.
/// - [Self::respond_flatten] - like above, but generates default responses also
///   for errors.
#[derive(Debug)]
pub struct Responder<'p, P>
where
    P: Pack,
{
    pack: &'p P,
}
impl<'p, P> Responder<'p, P>
where
    P: Pack,
{
    /// Creates new instance, based on [Pack].
    pub const fn new(pack: &'p P) -> Self {
        Self { pack }
    }

    /// Returns http response for given request parts or rust error to be
    /// handled by user.
    ///
    /// Successful response always carries compressed body, with
    /// `content-encoding: gzip`. There is no fallback for clients not
    /// accepting gzip.
    pub fn respond(
        &self,
        method: &Method,
        path: &str,
    ) -> Result<Response, ResponderRespondError> {
        let file = match self.pack.resolve(method, path) {
            Ok(Resolution::Found(file)) => file,
            Ok(Resolution::MethodNotAllowed) => {
                return Err(ResponderRespondError::HttpMethodNotAllowed);
            }
            Ok(Resolution::NotFound) => {
                return Err(ResponderRespondError::PathNotFound);
            }
            Err(error) => {
                return Err(ResponderRespondError::Pack(error));
            }
        };

        let content_gzip = file.into_content_gzip();

        let mut response = Response::new(Box::default());
        let headers = response.headers_mut();
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL),
        );
        if let Some(content_type) = content_type_from_path(path) {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_gzip.len()));
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        *response.body_mut() = content_gzip;

        Ok(response)
    }

    /// Like [Self::respond], but generates "default" (proper http
    /// status code and empty body) responses also for errors. This will for
    /// example generate HTTP 404 response for request path not found.
    ///
    /// For manual error handling, see [Self::respond].
    pub fn respond_flatten(
        &self,
        method: &Method,
        path: &str,
    ) -> Response {
        match self.respond(method, path) {
            Ok(response) => response,
            Err(responder_error) => {
                log::warn!("{} {}: {}", method, path, responder_error);
                responder_error.into_response()
            }
        }
    }
}

/// Possible errors during [Responder::respond] handling.
#[derive(Debug)]
pub enum ResponderRespondError {
    /// Path exists, but not for this method. This maps to HTTP
    /// `METHOD_NOT_ALLOWED`.
    HttpMethodNotAllowed,

    /// Request path was not found in [Pack]. This maps to HTTP `NOT_FOUND`.
    PathNotFound,

    /// [Pack] failed to provide the file. This maps to HTTP
    /// `INTERNAL_SERVER_ERROR`.
    Pack(Error),
}
impl ResponderRespondError {
    /// Converts error into best matching HTTP error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResponderRespondError::HttpMethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ResponderRespondError::PathNotFound => StatusCode::NOT_FOUND,
            ResponderRespondError::Pack(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Creates default response (status code + empty body) for this error.
    pub fn into_response(&self) -> Response {
        let mut response = Response::new(Box::default());
        *response.status_mut() = self.status_code();
        response
            .headers_mut()
            .insert(header::CONTENT_LENGTH, HeaderValue::from(0_usize));
        response
    }
}
impl std::fmt::Display for ResponderRespondError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ResponderRespondError::HttpMethodNotAllowed => f.write_str("method not allowed"),
            ResponderRespondError::PathNotFound => f.write_str("path not found"),
            ResponderRespondError::Pack(error) => write!(f, "pack error: {:#}", error),
        }
    }
}

/// Guesses `content-type` from request path extension. Only types the device
/// knows are returned.
fn content_type_from_path(path: &str) -> Option<&'static str> {
    if path.ends_with(".html") {
        Some("text/html")
    } else if path.ends_with(".css") {
        Some("text/css")
    } else if path.ends_with(".js") {
        Some("text/javascript")
    } else {
        None
    }
}
