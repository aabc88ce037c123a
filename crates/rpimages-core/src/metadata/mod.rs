//! Metadata persistence.
//!
//! Atomic JSON reads and writes shared by the override tables, generated
//! variant models and the key summary.

mod atomic;

pub use atomic::{atomic_read_json, atomic_write_json, to_pretty_json};
