//! Placeholder expansion for path and body text.
//!
//! A placeholder looks like `{$name}` or `{$name|args}`:
//!
//! | Token | Expands to |
//! |---|---|
//! | `{$currentTimestamp}` | milliseconds since the Unix epoch |
//! | `{$range\|min=1,max=10}` | an integer in `[min, max]` |
//! | `{$random\|foo,bar}` | one of the listed values |
//!
//! Every occurrence is drawn on its own, so `{$random|a,b} {$random|a,b}` can
//! become `a b`. Tokens the expander does not understand are kept verbatim.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::seq::IndexedRandom;

/// Text-to-text placeholder substitution.
///
/// Implemented for plain closures, which is handy for stubbing:
///
/// ```rust
/// use reqspec::Decoder;
///
/// let decoder = Decoder::new().expander(|text: &str| text.replace("{$id}", "42"));
/// let req = decoder.decode("get:/users/{$id}").unwrap();
/// assert_eq!(req.path(), "/users/42");
/// ```
pub trait Expand {
    fn expand(&self, text: &str) -> String;
}

impl<F> Expand for F
where
    F: Fn(&str) -> String,
{
    fn expand(&self, text: &str) -> String {
        self(text)
    }
}

/// The built-in expander.
#[derive(Clone, Copy, Debug, Default)]
pub struct Placeholders;

impl Expand for Placeholders {
    fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("{$") {
            out.push_str(&rest[..start]);
            let token = &rest[start..];

            let Some(end) = token.find('}') else {
                rest = token;
                break;
            };
            let inner = &token[2..end];
            match evaluate(inner) {
                Some(value) => out.push_str(&value),
                None => out.push_str(&token[..=end]),
            }
            rest = &token[end + 1..];
        }

        out.push_str(rest);
        out
    }
}

fn evaluate(inner: &str) -> Option<String> {
    let (name, args) = match inner.split_once('|') {
        Some((name, args)) => (name, Some(args)),
        None => (inner, None),
    };

    match (name, args) {
        ("currentTimestamp", None) => current_timestamp(),
        ("range", Some(args)) => range(args),
        ("random", Some(args)) => random(args),
        _ => None,
    }
}

fn current_timestamp() -> Option<String> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    Some(elapsed.as_millis().to_string())
}

fn range(args: &str) -> Option<String> {
    let mut min = None;
    let mut max = None;
    for arg in args.split(',') {
        match arg.trim().split_once('=')? {
            ("min", v) => min = Some(v.trim().parse::<i64>().ok()?),
            ("max", v) => max = Some(v.trim().parse::<i64>().ok()?),
            _ => return None,
        }
    }
    let (min, max) = (min?, max?);
    if min > max {
        return None;
    }
    Some(rand::rng().random_range(min..=max).to_string())
}

fn random(args: &str) -> Option<String> {
    let choices: Vec<&str> = args.split(',').collect();
    choices.choose(&mut rand::rng()).map(|s| (*s).to_owned())
}
