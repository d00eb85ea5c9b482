//! Outgoing request body.
//!
//! A [`Body`] is either a single in-memory chunk or the read end of the gzip
//! pipe fed by [`gzip::compress`](crate::gzip::compress). Either way it is a
//! [`hyper::body::Body`], so it can be handed to a hyper client as is.
//!
//! The body is consumed at most once. Dropping it closes the read end, which
//! makes a still-running gzip producer fail its next write and exit.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::{Frame, SizeHint};
use tokio::sync::mpsc;

use crate::error::Error;

/// A byte stream carrying a decoded request body.
pub struct Body {
    kind: Kind,
}

enum Kind {
    Full(Option<Bytes>),
    Gzip(mpsc::Receiver<Result<Bytes, Error>>),
}

impl Body {
    /// A body with no bytes at all.
    pub fn empty() -> Self {
        Self { kind: Kind::Full(None) }
    }

    /// A body that yields `data` in one chunk.
    ///
    /// Empty `data` gives the same body as [`Body::empty`]: no frames at all.
    pub fn full(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        if data.is_empty() {
            return Self::empty();
        }
        Self { kind: Kind::Full(Some(data)) }
    }

    pub(crate) fn gzip(rx: mpsc::Receiver<Result<Bytes, Error>>) -> Self {
        Self { kind: Kind::Gzip(rx) }
    }

    /// Whether the bytes are gzip-encoded.
    pub fn is_gzip(&self) -> bool {
        matches!(self.kind, Kind::Gzip(_))
    }

    /// Drains the whole stream into one buffer.
    ///
    /// For gzip bodies this is where a producer failure surfaces.
    pub async fn into_bytes(self) -> Result<Bytes, Error> {
        Ok(self.collect().await?.to_bytes())
    }
}

impl hyper::body::Body for Body {
    type Data = Bytes;
    type Error = Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match &mut self.get_mut().kind {
            Kind::Full(data) => Poll::Ready(data.take().map(|d| Ok(Frame::data(d)))),
            Kind::Gzip(rx) => rx
                .poll_recv(cx)
                .map(|item| item.map(|chunk| chunk.map(Frame::data))),
        }
    }

    fn is_end_stream(&self) -> bool {
        match &self.kind {
            Kind::Full(data) => data.is_none(),
            // Unknown until the producer closes its end.
            Kind::Gzip(_) => false,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match &self.kind {
            Kind::Full(data) => {
                SizeHint::with_exact(data.as_ref().map_or(0, |d| d.len() as u64))
            }
            Kind::Gzip(_) => SizeHint::default(),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Full(data) => f
                .debug_struct("Body::Full")
                .field("len", &data.as_ref().map_or(0, Bytes::len))
                .finish(),
            Kind::Gzip(_) => f.write_str("Body::Gzip"),
        }
    }
}
