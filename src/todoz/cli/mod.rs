//! # CLI Layer
//!
//! One possible UI client for todoz. This is the only place that:
//! - Parses shell arguments (`setup.rs`, clap derive)
//! - Wires the API from config and environment (`commands.rs`)
//! - Writes to stdout (`print.rs`)
//!
//! Business rules live in the library; handlers only dispatch and print.

mod commands;
mod print;
mod setup;

pub use commands::run;
