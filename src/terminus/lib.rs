//! # Terminus Architecture
//!
//! Terminus organizes study material per university module: free-form notes,
//! flashcard-style questions and scheduled meeting links. The core is a
//! library; the CLI is one client of it.
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
//! │  API Layer (api.rs)                                         │
//! │  - Owns the registry and the store for one session          │
//! │  - Resolves module selectors, applies storage requests      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Mutates the in-memory registry                           │
//! │  - Says which persistence step must follow                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ModuleStore trait                                        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## On-disk Layout
//!
//! ```text
//! <data-dir>/
//!   config.json        optional settings
//!   main.json          modules with their questions and links
//!   CS2103/            one directory per module
//!     lecture1.txt     one file per note, named after the note
//! ```
//!
//! Notes are never part of `main.json`; their files are the only copy.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the
//! process. Diagnostics go through the `log` facade; the binary decides
//! where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Module`, `ContentManager`, `Note`, `Question`, `Link`)
//! - [`validate`]: Name, day, time and URL checks
//! - [`config`]: Configuration management
//! - [`init`]: Session setup from a data directory
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
pub mod validate;
