//! # browser-utils
//!
//! Small, independent utilities for browser-facing code, written in pure Rust
//! so they can run natively or be exported to JavaScript through WASM.
//!
//! The centerpiece is [`deep_clone`], which copies a composite JSON value so
//! that the copy shares no array or object with the original. Everything else
//! is a self-contained helper.
//!
//! ## Quick start
//!
//! ```rust
//! use browser_utils::{deep_clone, query_object, thousands};
//! use serde_json::json;
//!
//! let original = json!({"tags": ["a", "b"]});
//! let copy = deep_clone(&original).unwrap();
//! assert_eq!(copy, original);
//!
//! let q = query_object("https://example.com/?page=2");
//! assert_eq!(q["page"], "2");
//!
//! assert_eq!(thousands(1234567.0), "1,234,567");
//! ```
//!
//! ## Modules
//!
//! - [`clone`] — deep clone of arrays/objects (`deep_clone`, `Shape`)
//! - [`query`] — URL query string → key/value map
//! - [`bytes`] — UTF-16-aware byte length
//! - [`id`] — random UUIDs
//! - [`storage`] — JSON wrappers over local/session key-value stores
//! - [`date`] — timestamp formatting and day differences
//! - [`number`] — thousands separators, numeric filtering, divide/multiply/keep-decimals
//! - [`browser`] — IE / legacy Edge detection
//! - [`array`] — de-duplicate object arrays by key
//! - [`error`] — error types

pub mod array;
pub mod browser;
pub mod bytes;
pub mod clone;
pub mod date;
pub mod error;
pub mod id;
pub mod number;
pub mod query;
pub mod storage;

pub use array::dedup_by_key;
pub use browser::{ie_version, IeVersion};
pub use bytes::{byte_length, byte_length_utf16};
pub use clone::{deep_clone, deep_clone_json, Shape};
pub use date::{date_diff_days, date_diff_now, format_date, format_millis, DateFormat};
pub use error::UtilError;
pub use id::uuid;
pub use number::{
    divide, filter_numeric, keep_decimals, multiply, parse_numeric, thousands, thousands_str,
    DEFAULT_DIGITS, DEFAULT_FACTOR,
};
pub use query::query_object;
pub use storage::{BrowserStorage, FileStore, KeyValueStore, MemoryStore, StorageArea};
