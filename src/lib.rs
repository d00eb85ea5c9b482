//! # reqspec
//!
//! Decodes the compact request specs a warm-up tool is configured with into
//! HTTP requests that are ready to send.
//!
//! ## The format
//!
//! ```text
//! <method>:<path>
//! <method>:<path>:<inline-body-text>
//! <method>:<path>:file:<filesystem-path>
//! ```
//!
//! - `<method>` is case-insensitive and must be one of GET, HEAD, POST, PUT,
//!   PATCH, DELETE, CONNECT, OPTIONS or TRACE.
//! - Path and body may carry placeholders such as `{$currentTimestamp}`,
//!   `{$range|min=1,max=10}` or `{$random|foo,bar}` (see [`placeholder`]).
//! - Only the first two colons split; the body keeps any colons it has.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use reqspec::Decoder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), reqspec::Error> {
//!     let decoder = Decoder::new().gzip(true);
//!
//!     let req = decoder.decode(r#"post:/users:{"id": {$range|min=1,max=99}}"#)?;
//!
//!     // Body is a hyper body: hand it to any hyper client.
//!     let http_req = req.into_http("http://localhost:8080")?;
//!     # drop(http_req);
//!     Ok(())
//! }
//! ```
//!
//! With gzip on, the body is compressed while it is being read, never
//! buffered as a whole (see [`gzip`]).

mod body;
mod decode;
mod error;
mod method;
mod request;

pub mod gzip;
pub mod placeholder;
pub mod resolve;

pub use body::Body;
pub use decode::{Decoder, decode};
pub use error::Error;
pub use method::Method;
pub use placeholder::{Expand, Placeholders};
pub use request::Request;
pub use resolve::{FileOrInline, Resolve};
