//! # Storage Layer
//!
//! Persistence for the module registry is split across two stores that are
//! kept in sync by a [`ModuleStore`]:
//!
//! - a single JSON document with every module, question and link
//! - one directory per module holding a text file per note
//!
//! Notes are kept as plain files so they can be read and edited outside of
//! terminus. The JSON document never contains note bodies.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage on the local filesystem
//! - [`memory::InMemoryStore`]: an in-memory mirror of the same layout, for
//!   testing the API layer without touching the disk
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data-dir>/
//! ├── main.json           # modules, questions and links
//! ├── config.json         # optional configuration
//! └── CS2103/             # one directory per module
//!     ├── lecture1.txt    # one file per note
//!     └── lecture2.txt
//! ```
//!
//! ## Failure Model
//!
//! Every operation is a sequence of blocking writes with no rollback. If a
//! deletion fails half-way through a directory, the directory is left with
//! whatever was not yet removed and the error is returned to the caller. The
//! in-memory registry is never rolled back after a failed save.
//!
//! Only files are deleted. A non-empty sub-directory inside a module
//! directory is left alone.

use crate::error::Result;
use crate::model::ModuleRegistry;

pub mod fs;
pub mod memory;

/// Reconciles an in-memory [`ModuleRegistry`] with its persisted form.
pub trait ModuleStore {
    /// Load the registry and the notes of every module.
    ///
    /// A missing store is created empty. An unreadable document is a soft
    /// failure that yields an empty registry.
    fn load_file(&mut self) -> Result<ModuleRegistry>;

    /// Persist modules, questions and links (never note bodies).
    fn save_file(&mut self, registry: &ModuleRegistry) -> Result<()>;

    /// Replace the stored notes of `module` with the in-memory ones.
    fn save_notes_from_module(&mut self, registry: &ModuleRegistry, module: &str) -> Result<()>;

    /// Reload the in-memory notes of `module` from storage.
    fn load_notes_from_module(&mut self, registry: &mut ModuleRegistry, module: &str)
        -> Result<()>;

    /// Remove the stored notes of a module that no longer exists.
    fn clean_after_delete_module(&mut self, module: &str) -> Result<()>;

    /// Make room for the notes of a freshly added module.
    fn create_module_directory(&mut self, module: &str) -> Result<()>;

    fn save_all_notes(&mut self, registry: &ModuleRegistry) -> Result<()> {
        for module in registry.module_names() {
            self.save_notes_from_module(registry, &module)?;
        }
        Ok(())
    }
}
