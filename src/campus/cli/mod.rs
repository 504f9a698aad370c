//! # CLI Layer
//!
//! This module is **one possible UI client** for campus. It is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, the confirmation prompt)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats students for human consumption
//!
//! ## Structure
//!
//! - `setup`: clap definitions and the grouped help screen
//! - `commands`: `run()` (called by `main.rs`), context setup and `handle_*()`
//! - `render`: pure string rendering plus the `print_*()` helpers

pub mod commands;
pub mod render;
pub mod setup;
