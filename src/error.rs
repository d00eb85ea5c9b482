//! Unified error type.

use std::io;

/// The error type returned by reqspec's fallible operations.
///
/// Decode-time variants are returned straight from [`decode`](crate::decode).
/// [`Compression`](Error::Compression) is different: the gzip producer runs
/// next to the reader, so its failures only show up while the
/// [`Body`](crate::Body) is being drained.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fewer than two colon-delimited segments.
    #[error("invalid request spec: {spec}, expected format <method>:<path>[:body]")]
    MalformedSpec { spec: String },

    /// The method token is not one of the allowed verbs.
    #[error("invalid request spec: {spec}, method {method} is not supported")]
    UnsupportedMethod { spec: String, method: String },

    /// The body segment could not be turned into text (e.g. unreadable file).
    #[error("unable to resolve body for request: {segment}")]
    BodyResolutionFailed {
        segment: String,
        #[source]
        source: io::Error,
    },

    /// The gzip producer failed while writing the body stream.
    #[error("gzip body stream: {0}")]
    Compression(#[source] io::Error),

    /// The request could not be turned into an [`http::Request`].
    #[error("invalid request target: {0}")]
    Http(#[from] http::Error),
}
