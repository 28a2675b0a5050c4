//! Path resolution, assignment and enumeration over JSON values.

use crate::error::{PathError, Result};
use crate::types::{Kind, Path, Segment};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Largest number of `null`s [`set`] will insert to reach an index past the
/// end of an array.
pub const MAX_ARRAY_GAP: usize = 1 << 16;

/// Resolve `path` against `value`, returning the leaf if every segment exists.
///
/// Objects are indexed by key, arrays by canonical decimal index. Indexing a
/// scalar, a missing key, an out-of-range index or a non-index segment on an
/// array all produce `None`; this function never fails.
///
/// # Examples
///
/// ```
/// use dotpath::v1::{Path, query};
/// use serde_json::json;
///
/// let doc = json!([{ "a": { "b": { "c": 1 } } }]);
/// let path: Path = "0.a.b.c".parse().unwrap();
/// assert_eq!(query::get(&doc, &path), Some(&json!(1)));
///
/// let missing: Path = "0.a.x.c".parse().unwrap();
/// assert_eq!(query::get(&doc, &missing), None);
/// ```
pub fn get<'a>(value: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = value;
    for (depth, segment) in path.segments().iter().enumerate() {
        current = match child(current, segment) {
            Some(next) => next,
            None => {
                trace!(%path, at = %path.location(depth), %segment, "path does not resolve");
                return None;
            }
        };
    }
    Some(current)
}

/// Mutable counterpart of [`get`], with identical resolution rules.
pub fn get_mut<'a>(value: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    let mut current = value;
    for segment in path.segments() {
        current = child_mut(current, segment)?;
    }
    Some(current)
}

/// Read the value at `path` as a `T`.
///
/// Returns `Ok(None)` when the path does not resolve and
/// [`PathError::Type`] when it resolves to something `T` cannot be
/// deserialized from.
///
/// ```
/// use dotpath::v1::{Path, query};
/// use serde_json::json;
///
/// let doc = json!({ "server": { "port": 8080 } });
/// let port: Option<u16> = query::get_as(&doc, &"server.port".parse::<Path>().unwrap()).unwrap();
/// assert_eq!(port, Some(8080));
/// ```
pub fn get_as<T: DeserializeOwned>(value: &Value, path: &Path) -> Result<Option<T>> {
    get(value, path)
        .map(|found| {
            T::deserialize(found).map_err(|source| PathError::Type {
                at: path.to_string(),
                source,
            })
        })
        .transpose()
}

/// Assign `leaf` at `path`, creating missing intermediates, and return `value`.
///
/// Every segment but the last is walked from the root. A missing object key
/// gets a fresh `{}`, even when the segment looks numeric. An array index past
/// the end pads the array with `null` and places `{}` at the index. The leaf
/// is then inserted into an object or stored at an array index, padding with
/// `null` in the same way.
///
/// The returned reference is `value` itself, not a copy.
///
/// # Errors
///
/// - [`PathError::NotAContainer`] when the root, an existing intermediate, or
///   the leaf's parent is a scalar.
/// - [`PathError::NotAnIndex`] when an array is indexed by a non-index segment.
/// - [`PathError::IndexOutOfRange`] when reaching an index would need more
///   than [`MAX_ARRAY_GAP`] padding elements, or the padding cannot be
///   allocated.
///
/// All of these only arise on nodes that already existed, before anything has
/// been created, so a failed call leaves `value` unchanged.
///
/// # Examples
///
/// ```
/// use dotpath::v1::{Path, query};
/// use serde_json::json;
///
/// let mut doc = json!({});
/// let path: Path = "a.b.c".parse().unwrap();
/// query::set(&mut doc, &path, json!(1)).unwrap();
/// assert_eq!(doc, json!({ "a": { "b": { "c": 1 } } }));
/// ```
pub fn set<'a>(value: &'a mut Value, path: &Path, leaf: Value) -> Result<&'a mut Value> {
    let (last, parents) = path.split_last();

    let mut target = &mut *value;
    for (depth, segment) in parents.iter().enumerate() {
        target = child_or_insert(target, segment, || path.location(depth))?;
    }
    assign(target, last, leaf, || path.location(parents.len()))?;

    Ok(value)
}

/// Every path that resolves in `value`, parents before children.
///
/// Object entries are visited in map order and array elements by ascending
/// index. Empty containers appear but contribute no children. A scalar root
/// has no paths. Keys that cannot be written as a segment (empty, or
/// containing `.`) are skipped together with everything beneath them.
///
/// ```
/// use dotpath::v1::query;
/// use serde_json::json;
///
/// let doc = json!({ "a": { "b": { "c": 1 } }, "b": 2 });
/// let paths: Vec<String> = query::paths(&doc).iter().map(|p| p.to_string()).collect();
/// assert_eq!(paths, vec!["a", "a.b", "a.b.c", "b"]);
/// ```
pub fn paths(value: &Value) -> Vec<Path> {
    let mut out = Vec::new();
    walk(value, &mut Vec::new(), &mut |prefix: &[Segment], _: &Value| {
        out.push(Path::from_vec(prefix.to_vec()))
    });
    out
}

/// The paths from [`paths`] whose value is of the given kind.
///
/// ```
/// use dotpath::v1::{Kind, query};
/// use serde_json::json;
///
/// let doc = json!({ "a": { "b": { "c": 1 } }, "b": 2 });
/// let numbers: Vec<String> = query::paths_of(&doc, Kind::Number)
///     .iter()
///     .map(|p| p.to_string())
///     .collect();
/// assert_eq!(numbers, vec!["a.b.c", "b"]);
/// ```
pub fn paths_of(value: &Value, kind: Kind) -> Vec<Path> {
    let mut out = Vec::new();
    walk(value, &mut Vec::new(), &mut |prefix: &[Segment], found: &Value| {
        if Kind::of(found) == kind {
            out.push(Path::from_vec(prefix.to_vec()));
        }
    });
    out
}

fn child<'a>(node: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment.as_str()),
        Value::Array(items) => items.get(segment.as_index()?),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment.as_str()),
        Value::Array(items) => items.get_mut(segment.as_index()?),
        _ => None,
    }
}

fn array_index(segment: &Segment, at: impl Fn() -> String) -> Result<usize> {
    segment.as_index().ok_or_else(|| PathError::NotAnIndex {
        at: at(),
        segment: segment.to_string(),
    })
}

/// Make room for `items[index]`, where `index >= items.len()`.
///
/// Fails without touching `items` when the gap exceeds [`MAX_ARRAY_GAP`] or
/// the allocation cannot be made.
fn reserve_through(items: &mut Vec<Value>, index: usize, at: impl Fn() -> String) -> Result<()> {
    let len = items.len();
    let gap = index - len;
    if gap > MAX_ARRAY_GAP || items.try_reserve(gap + 1).is_err() {
        return Err(PathError::IndexOutOfRange {
            at: at(),
            index,
            len,
        });
    }
    Ok(())
}

fn child_or_insert<'a>(
    node: &'a mut Value,
    segment: &Segment,
    at: impl Fn() -> String,
) -> Result<&'a mut Value> {
    match node {
        Value::Object(map) => Ok(map.entry(segment.as_str()).or_insert_with(|| {
            debug!(%segment, "creating missing intermediate object");
            Value::Object(Map::new())
        })),
        Value::Array(items) => {
            let index = array_index(segment, &at)?;
            if index >= items.len() {
                debug!(index, len = items.len(), "extending array for intermediate");
                reserve_through(items, index, &at)?;
                items.resize(index, Value::Null);
                items.push(Value::Object(Map::new()));
            }
            Ok(&mut items[index])
        }
        scalar => Err(PathError::NotAContainer {
            at: at(),
            found: Kind::of(scalar),
        }),
    }
}

fn assign(
    node: &mut Value,
    segment: &Segment,
    leaf: Value,
    at: impl Fn() -> String,
) -> Result<()> {
    match node {
        Value::Object(map) => {
            map.insert(segment.as_str().to_string(), leaf);
        }
        Value::Array(items) => {
            let index = array_index(segment, &at)?;
            if index < items.len() {
                items[index] = leaf;
            } else {
                reserve_through(items, index, &at)?;
                items.resize(index, Value::Null);
                items.push(leaf);
            }
        }
        scalar => {
            return Err(PathError::NotAContainer {
                at: at(),
                found: Kind::of(scalar),
            });
        }
    }
    Ok(())
}

fn walk<'v>(
    node: &'v Value,
    prefix: &mut Vec<Segment>,
    visit: &mut dyn FnMut(&[Segment], &'v Value),
) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                let Ok(segment) = Segment::new(key.as_str()) else {
                    debug!(key = %key, "skipping key that cannot be addressed by a path");
                    continue;
                };
                prefix.push(segment);
                visit(prefix.as_slice(), value);
                walk(value, prefix, visit);
                prefix.pop();
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                prefix.push(Segment::index(index));
                visit(prefix.as_slice(), value);
                walk(value, prefix, visit);
                prefix.pop();
            }
        }
        _ => {}
    }
}
