//! Serde support for bit sets and filters.
//!
//! Only available with the `serde` feature (on by default):
//!
//! ```toml
//! [dependencies]
//! atombloom = { version = "0.1", features = ["serde"] }
//! ```
//!
//! The serde form carries the same three logical fields as the binary wire
//! format in [`codec`](crate::codec), so a filter can move between JSON,
//! bincode and the raw encoding without losing bits. Use the binary codec
//! when byte-exact compatibility with other readers matters; serde formats
//! choose their own integer encodings.

pub mod standard;
