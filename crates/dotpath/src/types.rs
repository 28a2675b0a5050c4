use crate::error::{PathError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Separator between segments in the string form of a [`Path`].
pub const DELIMITER: char = '.';

// ============================================================================
// Segment
// ============================================================================

/// One token of a [`Path`]: an object key or an array index.
///
/// A segment is never empty and never contains [`DELIMITER`]. Whether it acts
/// as a key or an index is decided by the container it is applied to: objects
/// look the raw token up as a key, arrays accept it only when
/// [`as_index`](Segment::as_index) succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(String);

impl Segment {
    /// Validate a single token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() || token.contains(DELIMITER) {
            return Err(PathError::InvalidSegment(token));
        }
        Ok(Self(token))
    }

    /// Segment addressing position `index` of an array.
    pub fn index(index: usize) -> Self {
        Self(index.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The array index this segment denotes, if it is a canonical decimal.
    ///
    /// `"0"` and `"42"` are indices; `"007"`, `"-1"`, `"+1"` and `"1e3"` are
    /// not, and neither is a number too large for `usize`.
    ///
    /// ```
    /// use dotpath::v1::Segment;
    ///
    /// assert_eq!(Segment::new("12").unwrap().as_index(), Some(12));
    /// assert_eq!(Segment::new("012").unwrap().as_index(), None);
    /// assert_eq!(Segment::new("name").unwrap().as_index(), None);
    /// ```
    pub fn as_index(&self) -> Option<usize> {
        let token = self.0.as_str();
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if token.len() > 1 && token.starts_with('0') {
            return None;
        }
        token.parse().ok()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Path
// ============================================================================

/// A parsed, non-empty sequence of [`Segment`]s.
///
/// The string form is the segments joined by `.`, following the grammar
/// `segment ("." segment)*` with `segment = [^.]+`. There is no escaping, so
/// keys containing `.` cannot be addressed.
///
/// Serializes as its string form:
///
/// ```
/// use dotpath::v1::Path;
///
/// let path: Path = "items.0.name".parse().unwrap();
/// assert_eq!(serde_json::to_string(&path).unwrap(), "\"items.0.name\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

// A `Path` always holds at least one segment, so there is no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl Path {
    /// Parse a dot-delimited path.
    ///
    /// Fails on the empty string and on any empty segment (`"a..b"`, `".a"`,
    /// `"a."`), reporting the byte offset where the empty segment starts.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut offset = 0;
        for token in path.split(DELIMITER) {
            if token.is_empty() {
                return Err(PathError::EmptySegment {
                    path: path.to_string(),
                    offset,
                });
            }
            segments.push(Segment(token.to_string()));
            offset += token.len() + DELIMITER.len_utf8();
        }

        Ok(Self { segments })
    }

    /// Build a path from already validated segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Result<Self> {
        let segments: Vec<Segment> = segments.into_iter().collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { segments })
    }

    /// Caller guarantees `segments` is non-empty.
    pub(crate) fn from_vec(segments: Vec<Segment>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments, at least one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn first(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// The leaf segment and the segments leading to it.
    pub fn split_last(&self) -> (&Segment, &[Segment]) {
        let (parents, leaf) = self.segments.split_at(self.segments.len() - 1);
        (&leaf[0], parents)
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self> {
        let mut segments = self.segments.clone();
        segments.push(Segment::new(segment)?);
        Ok(Self { segments })
    }

    /// The path without its last segment, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<Self> {
        match self.segments.len() {
            1 => None,
            n => Some(Self {
                segments: self.segments[..n - 1].to_vec(),
            }),
        }
    }

    /// Dot-joined form of the first `depth` segments, used to locate errors.
    pub(crate) fn location(&self, depth: usize) -> String {
        if depth == 0 {
            return crate::error::ROOT.to_string();
        }
        join(&self.segments[..depth])
    }

    /// See [`query::get`](crate::v1::query::get).
    pub fn get<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        crate::query::get(value, self)
    }

    /// See [`query::get_mut`](crate::v1::query::get_mut).
    pub fn get_mut<'a>(&self, value: &'a mut Value) -> Option<&'a mut Value> {
        crate::query::get_mut(value, self)
    }

    /// See [`query::set`](crate::v1::query::set).
    pub fn set<'a>(&self, value: &'a mut Value, leaf: impl Into<Value>) -> Result<&'a mut Value> {
        crate::query::set(value, self, leaf.into())
    }
}

fn join(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(segment.as_str());
    }
    out
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.segments))
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Kind
// ============================================================================

/// The variant of a JSON value, used to filter enumerated paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "null" => Ok(Kind::Null),
            "bool" => Ok(Kind::Bool),
            "number" => Ok(Kind::Number),
            "string" => Ok(Kind::String),
            "array" => Ok(Kind::Array),
            "object" => Ok(Kind::Object),
            other => Err(PathError::UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Parsing ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_single_segment() {
        let path = Path::parse("a").unwrap();
        assert_eq!(path.segments().len(), 1);
        assert_eq!(path.first().as_str(), "a");
        assert_eq!(path.last().as_str(), "a");
    }

    #[test]
    fn test_parse_nested() {
        let path = Path::parse("a.0.c").unwrap();
        let tokens: Vec<&str> = path.segments().iter().map(Segment::as_str).collect();
        assert_eq!(tokens, vec!["a", "0", "c"]);
    }

    #[test]
    fn test_parse_empty_is_rejected() {
        assert!(matches!(Path::parse(""), Err(PathError::Empty)));
    }

    #[test]
    fn test_parse_empty_segment_offsets() {
        match Path::parse("a..b") {
            Err(PathError::EmptySegment { offset, .. }) => assert_eq!(offset, 2),
            other => panic!("Expected EmptySegment, got {:?}", other),
        }
        match Path::parse(".a") {
            Err(PathError::EmptySegment { offset, .. }) => assert_eq!(offset, 0),
            other => panic!("Expected EmptySegment, got {:?}", other),
        }
        match Path::parse("ab.") {
            Err(PathError::EmptySegment { offset, .. }) => assert_eq!(offset, 3),
            other => panic!("Expected EmptySegment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_keeps_whitespace_and_unicode() {
        let path = Path::parse(" a .ключ").unwrap();
        assert_eq!(path.first().as_str(), " a ");
        assert_eq!(path.last().as_str(), "ключ");
    }

    #[test]
    fn test_display_roundtrip() {
        for raw in ["a", "a.b.c", "0.a.1", "x y.z"] {
            assert_eq!(Path::parse(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_from_str_and_try_from() {
        let a: Path = "a.b".parse().unwrap();
        let b = Path::try_from("a.b").unwrap();
        assert_eq!(a, b);
    }

    // ── Segments ───────────────────────────────────────────────────────

    #[test]
    fn test_segment_rejects_delimiter_and_empty() {
        assert!(matches!(Segment::new(""), Err(PathError::InvalidSegment(_))));
        assert!(matches!(Segment::new("a.b"), Err(PathError::InvalidSegment(_))));
        assert!(Segment::new("a-b").is_ok());
    }

    #[test]
    fn test_segment_as_index() {
        assert_eq!(Segment::new("0").unwrap().as_index(), Some(0));
        assert_eq!(Segment::new("10").unwrap().as_index(), Some(10));
        assert_eq!(Segment::new("00").unwrap().as_index(), None);
        assert_eq!(Segment::new("01").unwrap().as_index(), None);
        assert_eq!(Segment::new("-1").unwrap().as_index(), None);
        assert_eq!(Segment::new("+1").unwrap().as_index(), None);
        assert_eq!(Segment::new("1a").unwrap().as_index(), None);
        assert_eq!(
            Segment::new("99999999999999999999999999").unwrap().as_index(),
            None
        );
    }

    #[test]
    fn test_segment_index_constructor() {
        let seg = Segment::index(7);
        assert_eq!(seg.as_str(), "7");
        assert_eq!(seg.as_index(), Some(7));
    }

    // ── Derived paths ──────────────────────────────────────────────────

    #[test]
    fn test_child_and_parent() {
        let path = Path::parse("a.b").unwrap();
        let child = path.child("c").unwrap();
        assert_eq!(child.to_string(), "a.b.c");
        assert_eq!(child.parent().unwrap(), path);
        assert!(Path::parse("a").unwrap().parent().is_none());
        // The original is untouched
        assert_eq!(path.to_string(), "a.b");
    }

    #[test]
    fn test_child_rejects_invalid_segment() {
        let path = Path::parse("a").unwrap();
        assert!(path.child("b.c").is_err());
        assert!(path.child("").is_err());
    }

    #[test]
    fn test_split_last() {
        let path = Path::parse("a.b.c").unwrap();
        let (leaf, parents) = path.split_last();
        assert_eq!(leaf.as_str(), "c");
        assert_eq!(parents.len(), 2);

        let single = Path::parse("x").unwrap();
        let (leaf, parents) = single.split_last();
        assert_eq!(leaf.as_str(), "x");
        assert!(parents.is_empty());
    }

    #[test]
    fn test_from_segments() {
        let path = Path::from_segments([Segment::index(0), Segment::new("a").unwrap()]).unwrap();
        assert_eq!(path.to_string(), "0.a");
        assert!(matches!(
            Path::from_segments(Vec::new()),
            Err(PathError::Empty)
        ));
    }

    #[test]
    fn test_location_labels() {
        let path = Path::parse("a.b.c").unwrap();
        assert_eq!(path.location(0), "(root)");
        assert_eq!(path.location(2), "a.b");
    }

    // ── Serde ──────────────────────────────────────────────────────────

    #[test]
    fn test_path_serde_as_string() {
        let path = Path::parse("a.0").unwrap();
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, json!("a.0"));
        let back: Path = serde_json::from_value(json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_path_deserialize_invalid() {
        let result: std::result::Result<Path, _> = serde_json::from_value(json!("a..b"));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Empty segment"));
    }

    // ── Kind ───────────────────────────────────────────────────────────

    #[test]
    fn test_kind_of() {
        assert_eq!(Kind::of(&json!(null)), Kind::Null);
        assert_eq!(Kind::of(&json!(true)), Kind::Bool);
        assert_eq!(Kind::of(&json!(1.5)), Kind::Number);
        assert_eq!(Kind::of(&json!("s")), Kind::String);
        assert_eq!(Kind::of(&json!([])), Kind::Array);
        assert_eq!(Kind::of(&json!({})), Kind::Object);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("number".parse::<Kind>().unwrap(), Kind::Number);
        assert_eq!("bool".parse::<Kind>().unwrap(), Kind::Bool);
        assert!("boolean".parse::<Kind>().is_err());
        assert!(matches!(
            "tuple".parse::<Kind>(),
            Err(PathError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_kind_str_roundtrip() {
        for kind in [
            Kind::Null,
            Kind::Bool,
            Kind::Number,
            Kind::String,
            Kind::Array,
            Kind::Object,
        ] {
            assert_eq!(kind.to_string().parse::<Kind>().unwrap(), kind);
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, json!(kind.as_str()));
            assert_eq!(serde_json::from_value::<Kind>(json).unwrap(), kind);
        }
    }

    // ── Access through Path methods ────────────────────────────────────

    #[test]
    fn test_path_len() {
        assert_eq!(Path::parse("a").unwrap().len(), 1);
        assert_eq!(Path::parse("a.0.c").unwrap().len(), 3);
        assert_eq!(Path::parse("a.b").unwrap().child("c").unwrap().len(), 3);
    }

    #[test]
    fn test_path_get_method() {
        let doc = json!({ "a": [{ "b": 1 }] });
        let path = Path::parse("a.0.b").unwrap();
        assert_eq!(path.get(&doc), Some(&json!(1)));
        assert_eq!(Path::parse("a.1.b").unwrap().get(&doc), None);
    }

    #[test]
    fn test_path_get_mut_method() {
        let mut doc = json!({ "a": [{ "b": 1 }] });
        let path = Path::parse("a.0.b").unwrap();
        *path.get_mut(&mut doc).unwrap() = json!("changed");
        assert_eq!(doc, json!({ "a": [{ "b": "changed" }] }));
        assert!(Path::parse("a.x").unwrap().get_mut(&mut doc).is_none());
    }

    #[test]
    fn test_path_set_method_returns_same_root() {
        let mut doc = json!({});
        let root: *const Value = &doc;
        let path = Path::parse("a.b").unwrap();
        let returned = path.set(&mut doc, 5).unwrap();
        assert!(std::ptr::eq(returned, root));
        assert_eq!(doc, json!({ "a": { "b": 5 } }));
    }

    #[test]
    fn test_path_set_method_accepts_into_value() {
        let mut doc = json!({});
        Path::parse("s").unwrap().set(&mut doc, "text").unwrap();
        Path::parse("f").unwrap().set(&mut doc, false).unwrap();
        Path::parse("v").unwrap().set(&mut doc, json!([1])).unwrap();
        assert_eq!(doc, json!({ "s": "text", "f": false, "v": [1] }));
    }
}
