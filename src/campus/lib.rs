//! # Campus Architecture
//!
//! Campus is a **UI-agnostic student directory library**. The CLI shipped with
//! it is one client; a mobile or web front end would sit in the same place.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  List Controller (controller.rs) + Forms (form.rs)          │
//! │  - Cached record set, client-side filtering, notices        │
//! │  - Validates input before anything reaches the store        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) → Command Layer (commands/*.rs)         │
//! │  - Thin facade, then pure business logic per operation      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StudentStore trait                                       │
//! │  - SqliteStore (production), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From the controller inward, code takes Rust arguments and returns Rust
//! types. It never prints and never exits the process. Failures come back as
//! [`error::CampusError`], and [`error::CampusError::user_message`] turns them
//! into the text a UI shows.
//!
//! ## No Singletons
//!
//! The store is constructed by the caller and moved into [`api::CampusApi`],
//! which in turn is handed to [`controller::StudentList`]. Nothing holds a
//! process-wide database handle.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`controller`]: The list controller
//! - [`form`]: Add/edit form validation
//! - [`avatar`]: Default avatars and device capture
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Student`, `Avatar`)
//! - [`config`]: Configuration management
//! - [`init`]: Building a ready-to-use context from a home directory
//! - [`error`]: Error types

pub mod api;
pub mod avatar;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod init;
pub mod model;
pub mod store;
