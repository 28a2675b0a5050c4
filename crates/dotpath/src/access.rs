//! String-path entry points for callers that hold paths as `&str`.

use crate::error::Result;
use crate::query;
use crate::types::Path;
use serde_json::Value;
use tracing::trace;

/// Read the value at a dot-delimited `path`.
///
/// Total over its inputs: a malformed path resolves to `None` just like a
/// missing one.
///
/// ```
/// use serde_json::json;
///
/// let item = json!({ "a": { "b": { "c": 1 } } });
/// assert_eq!(dotpath::v1::get(&item, "a.b.c"), Some(&json!(1)));
/// assert_eq!(dotpath::v1::get(&item, "a.x.c"), None);
/// assert_eq!(dotpath::v1::get(&item, "a..c"), None);
/// ```
pub fn get<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    match Path::parse(path) {
        Ok(path) => query::get(item, &path),
        Err(err) => {
            trace!(path, %err, "ignoring malformed path");
            None
        }
    }
}

/// Assign `value` at a dot-delimited `path`, returning `item` itself.
///
/// ```
/// use serde_json::json;
///
/// let mut item = json!({ "a": { "b": { "c": 1 } } });
/// dotpath::v1::set(&mut item, "a.b.c", 2).unwrap();
/// assert_eq!(item, json!({ "a": { "b": { "c": 2 } } }));
/// ```
pub fn set<'a>(item: &'a mut Value, path: &str, value: impl Into<Value>) -> Result<&'a mut Value> {
    let path = Path::parse(path)?;
    query::set(item, &path, value.into())
}
