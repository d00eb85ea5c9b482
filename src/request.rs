//! Decoded request type.

use http::header::CONTENT_ENCODING;
use http::HeaderValue;

use crate::body::Body;
use crate::error::Error;
use crate::method::Method;

/// One decoded, ready-to-send HTTP call.
///
/// Built by [`Decoder::decode`](crate::Decoder::decode) and never mutated
/// afterwards. `body` is `None` exactly when the spec string had no body segment.
#[derive(Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<Body>,
}

impl Request {
    pub(crate) fn new(method: Method, path: String, body: Option<Body>) -> Self {
        Self { method, path, body }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> Option<&Body> { self.body.as_ref() }
    pub fn has_body(&self) -> bool { self.body.is_some() }

    /// Takes the body out, consuming the request.
    pub fn into_body(self) -> Option<Body> {
        self.body
    }

    /// Builds an [`http::Request`] against `base` (e.g. `http://localhost:8080`).
    ///
    /// `base` and the path are joined with a single `/`; an empty `base` gives
    /// an origin-form target. Compressed bodies get `content-encoding: gzip`.
    /// A request without a body segment is sent with an empty body.
    pub fn into_http(self, base: &str) -> Result<http::Request<Body>, Error> {
        let target = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.path.trim_start_matches('/'),
        );
        let body = self.body.unwrap_or_default();

        let mut builder = http::Request::builder()
            .method(http::Method::from(self.method))
            .uri(target);
        if body.is_gzip() {
            builder = builder.header(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        }
        Ok(builder.body(body)?)
    }
}
