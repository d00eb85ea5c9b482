//! Body sourcing: inline text or `file:<path>`.

use std::fs;
use std::io;

/// Prefix that marks a body segment as a path to read.
pub const FILE_PREFIX: &str = "file:";

/// Turns the raw body segment of a spec into body text.
///
/// Implemented for closures so tests can avoid the filesystem.
pub trait Resolve {
    fn resolve(&self, segment: &str) -> io::Result<String>;
}

impl<F> Resolve for F
where
    F: Fn(&str) -> io::Result<String>,
{
    fn resolve(&self, segment: &str) -> io::Result<String> {
        self(segment)
    }
}

/// The built-in resolver.
///
/// `file:/tmp/body.json` reads the file; any other segment is the body itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileOrInline;

impl Resolve for FileOrInline {
    fn resolve(&self, segment: &str) -> io::Result<String> {
        match segment.strip_prefix(FILE_PREFIX) {
            Some(path) => fs::read_to_string(path),
            None => Ok(segment.to_owned()),
        }
    }
}
