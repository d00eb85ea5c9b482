//! Request-spec decoder.
//!
//! A spec is one of:
//!
//! ```text
//! <method>:<path>
//! <method>:<path>:<inline-body-text>
//! <method>:<path>:file:<filesystem-path>
//! ```
//!
//! The string is split on the first two colons only, so the body may contain
//! colons of its own. There is no escaping: a colon inside the path ends the
//! path.

use flate2::Compression;
use tracing::debug;

use crate::body::Body;
use crate::error::Error;
use crate::gzip;
use crate::method::Method;
use crate::placeholder::{Expand, Placeholders};
use crate::request::Request;
use crate::resolve::{FileOrInline, Resolve};

/// Decodes `spec` with the built-in placeholder expander and body resolver.
///
/// Shorthand for `Decoder::new().gzip(compress).decode(spec)`.
///
/// ```rust
/// let req = reqspec::decode("get:ping", false).unwrap();
/// assert_eq!(req.method(), reqspec::Method::Get);
/// assert_eq!(req.path(), "ping");
/// assert!(req.body().is_none());
/// ```
///
/// No async runtime is needed, even with `compress` set.
pub fn decode(spec: &str, compress: bool) -> Result<Request, Error> {
    Decoder::new().gzip(compress).decode(spec)
}

/// Turns spec strings into [`Request`]s.
///
/// Build it once and reuse it; decoding takes `&self` and keeps no state
/// between calls.
///
/// ```rust,no_run
/// use reqspec::Decoder;
///
/// # async fn run() -> Result<(), reqspec::Error> {
/// let decoder = Decoder::new().gzip(true).level(9);
/// let req = decoder.decode(r#"post:/orders:{"id": {$range|min=1,max=100}}"#)?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct Decoder<E = Placeholders, R = FileOrInline> {
    expander: E,
    resolver: R,
    compression: Option<Compression>,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            expander: Placeholders,
            resolver: FileOrInline,
            compression: None,
        }
    }
}

impl Default for Decoder {
    fn default() -> Self { Self::new() }
}

impl<E, R> Decoder<E, R>
where
    E: Expand,
    R: Resolve,
{
    /// Gzip bodies on the fly. Off by default.
    pub fn gzip(mut self, enabled: bool) -> Self {
        self.compression = match (enabled, self.compression) {
            (true, Some(level)) => Some(level),
            (true, None) => Some(Compression::default()),
            (false, _) => None,
        };
        self
    }

    /// Sets the gzip level, 0 (store) to 9 (best), and turns gzip on.
    /// Larger values are clamped to 9.
    pub fn level(mut self, level: u32) -> Self {
        self.compression = Some(Compression::new(level.min(9)));
        self
    }

    /// Replaces the placeholder expander.
    pub fn expander<E2: Expand>(self, expander: E2) -> Decoder<E2, R> {
        Decoder {
            expander,
            resolver: self.resolver,
            compression: self.compression,
        }
    }

    /// Replaces the body resolver.
    pub fn resolver<R2: Resolve>(self, resolver: R2) -> Decoder<E, R2> {
        Decoder {
            expander: self.expander,
            resolver,
            compression: self.compression,
        }
    }

    /// Decodes one spec string.
    ///
    /// The method is matched case-insensitively against the nine RFC 9110
    /// verbs. Path and body are expanded independently. An empty body segment
    /// (`post:/x:`) still yields a body, just an empty one.
    pub fn decode(&self, spec: &str) -> Result<Request, Error> {
        let mut parts = spec.splitn(3, ':');
        let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
            return Err(Error::MalformedSpec { spec: spec.to_owned() });
        };

        let method = method.to_ascii_uppercase();
        let Ok(method) = method.parse::<Method>() else {
            return Err(Error::UnsupportedMethod { spec: spec.to_owned(), method });
        };

        let path = self.expander.expand(path);

        let body = match parts.next() {
            None => None,
            Some(segment) => Some(self.body(segment)?),
        };

        debug!(
            %method,
            path = %path,
            has_body = body.is_some(),
            gzip = body.as_ref().is_some_and(Body::is_gzip),
            "decoded request spec",
        );
        Ok(Request::new(method, path, body))
    }

    fn body(&self, segment: &str) -> Result<Body, Error> {
        let raw = self
            .resolver
            .resolve(segment)
            .map_err(|source| Error::BodyResolutionFailed {
                segment: segment.to_owned(),
                source,
            })?;
        let text = self.expander.expand(&raw);

        Ok(match self.compression {
            Some(level) => gzip::compress(text, level),
            None => Body::full(text),
        })
    }
}
