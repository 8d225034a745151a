//! # Todoz Architecture
//!
//! Todoz is a **small, file-backed todo library** with a CLI client on top.
//! The library never prints and never exits; the CLI is the only layer that
//! knows about a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over the collection manager                  │
//! │  - Derived listings (due today, overdue, most recent)       │
//! │  - Returns structured Result<CmdResult> values              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collection Manager (todos.rs)                              │
//! │  - Lazy one-time load, id allocation, CRUD and filters      │
//! │  - Rewrites the whole collection after every mutation       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract Storage trait over one text blob                │
//! │  - FileStorage (production), InMemoryStorage (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! The first call that needs the todos reads the blob once and decodes it
//! ([`model::decode_collection`]). Every mutating call re-encodes the full
//! working set and writes it back. There is no locking: one process owns a
//! data file at a time.
//!
//! ## Testing Strategy
//!
//! 1. **Model and manager** (`model.rs`, `todos.rs`): unit tests against
//!    `InMemoryStorage`. Most of the tests live here.
//! 2. **API** (`api.rs`): dispatch and message tests.
//! 3. **File storage and CLI** (`tests/`): tempdir-backed integration tests.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`todos`]: The collection manager
//! - [`model`]: `Todo`, status, update payloads and the YAML codec
//! - [`store`]: Storage abstraction and implementations
//! - [`dates`]: Day/week cutoffs and due-date parsing
//! - [`config`]: Configuration management
//! - [`init`]: Resolves directories and wires the API for the binary
//! - [`logging`]: File logging via `tracing`
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod init;
pub mod logging;
pub mod model;
pub mod store;
pub mod todos;
