#![doc = include_str!("../README.md")]

mod access;
mod error;
mod query;
mod types;

pub mod v1 {
    //! Versioned public API for dot-path access to JSON values.
    //!
    //! # Paths
    //!
    //! - [`Path`]: a parsed, non-empty list of segments (`"a.0.b"`)
    //! - [`Segment`]: one key or array index
    //! - [`Kind`]: the variant of a value, for filtering enumerated paths
    //!
    //! # Access
    //!
    //! - [`get`] and [`set`] take the path as a string
    //! - [`query`] holds the same operations over a parsed [`Path`], plus
    //!   mutable and typed reads and path enumeration
    //!
    //! # Example: fill in a partially populated document
    //!
    //! ```
    //! use dotpath::v1::*;
    //! use serde_json::json;
    //!
    //! let mut config = json!({ "server": {} });
    //! assert_eq!(get(&config, "server.tls.enabled"), None);
    //!
    //! set(&mut config, "server.tls.enabled", true).unwrap();
    //! set(&mut config, "server.port", 8443).unwrap();
    //!
    //! assert_eq!(get(&config, "server.tls.enabled"), Some(&json!(true)));
    //! assert_eq!(
    //!     config,
    //!     json!({ "server": { "port": 8443, "tls": { "enabled": true } } })
    //! );
    //! ```

    /// Resolution, assignment and enumeration over parsed paths.
    ///
    /// These functions take `&Path` so a path can be parsed once and reused.
    ///
    /// # Example: list every numeric leaf, then bump each one
    ///
    /// ```
    /// use dotpath::v1::{Kind, query};
    /// use serde_json::json;
    ///
    /// let mut doc = json!({ "a": { "b": { "c": 1 } }, "b": 2, "name": "x" });
    /// for path in query::paths_of(&doc, Kind::Number) {
    ///     let current = query::get_as::<i64>(&doc, &path).unwrap().unwrap();
    ///     query::set(&mut doc, &path, json!(current + 10)).unwrap();
    /// }
    /// assert_eq!(doc, json!({ "a": { "b": { "c": 11 } }, "b": 12, "name": "x" }));
    /// ```
    pub mod query {
        pub use crate::query::{MAX_ARRAY_GAP, get, get_as, get_mut, paths, paths_of, set};
    }
    pub use crate::access::{get, set};
    pub use crate::error::{PathError, Result};
    pub use crate::types::{DELIMITER, Kind, Path, Segment};
}
