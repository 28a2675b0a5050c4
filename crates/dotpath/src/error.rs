use crate::types::Kind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PathError>;

/// Location label used when the failing node is the root value itself.
pub(crate) const ROOT: &str = "(root)";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Empty segment at offset {offset} in path: {path}")]
    EmptySegment { path: String, offset: usize },

    #[error("Invalid segment: {0:?}")]
    InvalidSegment(String),

    #[error("Cannot index into {found} at: {at}")]
    NotAContainer { at: String, found: Kind },

    #[error("Segment {segment:?} is not an array index at: {at}")]
    NotAnIndex { at: String, segment: String },

    #[error("Index {index} is too far past the end of the array (length {len}) at: {at}")]
    IndexOutOfRange { at: String, index: usize, len: usize },

    #[error("Value at {at} does not match the requested type: {source}")]
    Type {
        at: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown value kind: {0}")]
    UnknownKind(String),
}
