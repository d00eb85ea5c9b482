//! Streaming gzip compressor.
//!
//! The compressed body is never built up front. [`compress`] starts a
//! producer on its own thread that pushes the text through a [`GzEncoder`]
//! whose sink is one end of a single-slot channel; the returned [`Body`] is
//! the other end. The producer can only run one chunk ahead of the reader:
//!
//! ```text
//! text ─▶ GzEncoder ─▶ PipeWriter ══ mpsc(1) ══▶ Body ─▶ transport
//!         (producer thread)                       (caller)
//! ```
//!
//! No runtime is needed on either side, and one body left unread never holds
//! up another. A failed write or flush is delivered as the last item of the
//! stream, so the reader sees it exactly where the output stops. If the
//! reader drops the body first, the next write fails with `BrokenPipe` and
//! the producer exits.

use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use tokio::sync::mpsc;
use tracing::{trace, warn};

use crate::body::Body;
use crate::error::Error;

type Chunk = Result<Bytes, Error>;

/// Returns a body that yields the gzip encoding of `text`.
///
/// The producer is launched before this returns. Nothing blocks here;
/// reading the body is what drives the compression forward. If the producer
/// thread cannot be started, the body's first read reports it.
pub fn compress(text: String, level: Compression) -> Body {
    let (tx, rx) = mpsc::channel(1);
    // Detached; the producer ends on its own once the body is drained or dropped.
    let _ = start(text, level, tx);
    Body::gzip(rx)
}

fn start(text: String, level: Compression, tx: mpsc::Sender<Chunk>) -> Option<JoinHandle<()>> {
    let fallback = tx.clone();
    let spawned = thread::Builder::new()
        .name("reqspec-gzip".to_owned())
        .spawn(move || {
            let pipe = PipeWriter { tx: tx.clone() };
            produce(&text, level, pipe, &tx);
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("gzip producer could not start: {e}");
            // Fresh channel, so the slot is free.
            let _ = fallback.try_send(Err(Error::Compression(e)));
            None
        }
    }
}

fn produce<W: Write>(text: &str, level: Compression, sink: W, tx: &mpsc::Sender<Chunk>) {
    match encode(text, level, sink) {
        Ok(()) => trace!(input_len = text.len(), "gzip producer finished"),
        // The reader hung up; there is nobody left to tell.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            trace!("gzip producer stopped, body dropped");
        }
        Err(e) => {
            warn!("gzip producer failed: {e}");
            let _ = tx.blocking_send(Err(Error::Compression(e)));
        }
    }
}

fn encode<W: Write>(text: &str, level: Compression, sink: W) -> io::Result<()> {
    let mut encoder = GzEncoder::new(sink, level);
    encoder.write_all(text.as_bytes())?;
    // Writes the gzip trailer and drops the sink, closing the pipe.
    encoder.finish()?;
    Ok(())
}

/// Write half of the body pipe.
struct PipeWriter {
    tx: mpsc::Sender<Chunk>,
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        trace!(len = buf.len(), "gzip chunk");
        self.tx
            .blocking_send(Ok(Bytes::copy_from_slice(buf)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "body stream closed"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
