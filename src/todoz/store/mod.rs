//! # Storage Layer
//!
//! The collection manager never touches a file directly. It talks to a
//! [`Storage`]: a contract over one opaque blob of serialized text. The
//! storage does not know the blob is YAML, nor that it holds todos.
//!
//! ## Contract
//!
//! - `read()` on a never-written medium must return something the decoder
//!   accepts as an empty collection (`"[]"` or blank text).
//! - `write()` replaces the whole blob. There is no append and no delta.
//! - Failures surface as [`crate::error::TodosError`] values carrying the
//!   offending path where there is one. Nothing is retried.
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: one file at `<base_dir>/<filename>`, written
//!   atomically (temp file + rename).
//! - [`memory::InMemoryStorage`]: a `String`, for tests. Can simulate write
//!   failures.
//!
//! Neither implementation locks anything. One process owns the medium.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Read/write access to a single serialized blob.
pub trait Storage {
    /// Read the whole blob
    fn read(&self) -> Result<String>;

    /// Replace the whole blob
    fn write(&mut self, data: &str) -> Result<()>;
}
