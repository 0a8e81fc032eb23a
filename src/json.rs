//! Field extraction from JSON response bodies
//!
//! Provider responses are read field by field rather than deserialized into
//! fixed structs, so a missing or oddly-typed field never fails a request;
//! it simply reads as an empty string and the caller decides what that
//! means.

use serde_json::Value;

/// Reads named string fields out of a raw response body.
pub trait FieldExtractor: Send + Sync {
    /// Returns the string at `path`, or an empty string when the body is not
    /// JSON, the path does not exist, or the value there is not a string.
    ///
    /// `path` is a dot-separated list of object keys; numeric segments index
    /// into arrays (`"items.0.id"`).
    fn get(&self, body: &[u8], path: &str) -> String;
}

/// Default [`FieldExtractor`] backed by `serde_json`.
///
/// # Examples
///
/// ```
/// use google_oauth2::json::{FieldExtractor, JsonFieldExtractor};
///
/// let body = br#"{"aud":"client-1","expires_in":3599,"user":{"id":"42"}}"#;
/// assert_eq!(JsonFieldExtractor.get(body, "aud"), "client-1");
/// assert_eq!(JsonFieldExtractor.get(body, "user.id"), "42");
/// // Only JSON strings are returned.
/// assert_eq!(JsonFieldExtractor.get(body, "expires_in"), "");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFieldExtractor;

impl FieldExtractor for JsonFieldExtractor {
    fn get(&self, body: &[u8], path: &str) -> String {
        let Ok(root) = serde_json::from_slice::<Value>(body) else {
            return String::new();
        };
        lookup(&root, path)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
