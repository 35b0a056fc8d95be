//! # API Facade
//!
//! [`TerminusApi`] is the single entry point for every terminus operation. It
//! owns the [`ModuleRegistry`] and the [`ModuleStore`] for the lifetime of a
//! session, so there is exactly one synchronizer and no global state.
//!
//! Each method runs a command from `commands/*.rs` against the registry, then
//! carries out the [`StorageRequest`] the command returned. Commands decide
//! *what* must be persisted; the API decides *how* using the store.
//!
//! ## Generic Over ModuleStore
//!
//! - Production: `TerminusApi<FileStore>`
//! - Testing: `TerminusApi<InMemoryStore>`
//!
//! ## Shutdown
//!
//! [`TerminusApi::shutdown`] flushes the whole registry (JSON and every note
//! directory) if anything was changed during the session.

use crate::commands::{self, StorageRequest};
use crate::error::Result;
use crate::model::{ContentKind, Link, ModuleRegistry, Note, Question};
use crate::store::ModuleStore;
use log::debug;
use std::path::PathBuf;

pub struct TerminusApi<S: ModuleStore> {
    store: S,
    registry: ModuleRegistry,
    config_dir: PathBuf,
    dirty: bool,
}

impl<S: ModuleStore> TerminusApi<S> {
    /// Loads the registry from `store`.
    pub fn open(mut store: S, config_dir: PathBuf) -> Result<Self> {
        let registry = store.load_file()?;
        debug!("Loaded {} modules", registry.len());
        Ok(Self {
            store,
            registry,
            config_dir,
            dirty: false,
        })
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list_modules(&self) -> Result<CmdResult> {
        commands::module::list(&self.registry)
    }

    /// Note files already sitting in the module's directory are adopted.
    pub fn add_module(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::module::add(&mut self.registry, name)?;
        let mut result = self.commit(result)?;

        let name = name.trim();
        let adopted = self.registry.module(name)?.count(ContentKind::Note);
        if adopted > 0 {
            result.add_message(CmdMessage::warning(format!(
                "Found {} existing notes for {} and kept them",
                adopted, name
            )));
        }
        Ok(result)
    }

    pub fn delete_module(&mut self, selector: &str) -> Result<CmdResult> {
        let result = commands::module::delete(&mut self.registry, selector)?;
        self.commit(result)
    }

    pub fn rename_module(&mut self, selector: &str, new_name: &str) -> Result<CmdResult> {
        let result = commands::module::rename(&mut self.registry, selector, new_name)?;
        self.commit(result)
    }

    pub fn add_note(&mut self, module: &str, name: &str, data: &str) -> Result<CmdResult> {
        let module = self.module_name(module)?;
        let result = commands::note::add(&mut self.registry, &module, name, data)?;
        self.commit(result)
    }

    pub fn edit_note(&mut self, module: &str, index: usize, data: &str) -> Result<CmdResult> {
        let module = self.module_name(module)?;
        let result = commands::note::edit(&mut self.registry, &module, index, data)?;
        self.commit(result)
    }

    pub fn add_question(&mut self, module: &str, question: &str, answer: &str) -> Result<CmdResult> {
        let module = self.module_name(module)?;
        let result = commands::question::add(&mut self.registry, &module, question, answer)?;
        self.commit(result)
    }

    pub fn add_link(&mut self, module: &str, input: &LinkInput) -> Result<CmdResult> {
        let module = self.module_name(module)?;
        let result = commands::link::add(&mut self.registry, &module, input)?;
        self.commit(result)
    }

    pub fn view(&self, kind: ContentKind, module: &str, index: Option<usize>) -> Result<CmdResult> {
        let module = self.module_name(module)?;
        match kind {
            ContentKind::Note => commands::content::view::<Note>(&self.registry, &module, index),
            ContentKind::Question => {
                commands::content::view::<Question>(&self.registry, &module, index)
            }
            ContentKind::Link => commands::content::view::<Link>(&self.registry, &module, index),
        }
    }

    pub fn delete(&mut self, kind: ContentKind, module: &str, index: usize) -> Result<CmdResult> {
        let module = self.module_name(module)?;
        let registry = &mut self.registry;
        let result = match kind {
            ContentKind::Note => commands::content::delete::<Note>(registry, &module, index)?,
            ContentKind::Question => {
                commands::content::delete::<Question>(registry, &module, index)?
            }
            ContentKind::Link => commands::content::delete::<Link>(registry, &module, index)?,
        };
        self.commit(result)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    /// Flushes the full registry if the session changed anything.
    pub fn shutdown(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        debug!("Flushing registry on shutdown");
        self.store.save_file(&self.registry)?;
        self.store.save_all_notes(&self.registry)?;
        self.dirty = false;
        Ok(())
    }

    /// Content commands take a module name or its index in the module list.
    fn module_name(&self, selector: &str) -> Result<String> {
        commands::module::resolve(&self.registry, selector)
    }

    fn commit(&mut self, result: CmdResult) -> Result<CmdResult> {
        if let Some(request) = &result.storage {
            self.dirty = true;
            self.apply(request)?;
        }
        Ok(result)
    }

    fn apply(&mut self, request: &StorageRequest) -> Result<()> {
        debug!("Applying {:?}", request);
        match request {
            StorageRequest::SaveFile => self.store.save_file(&self.registry),
            StorageRequest::SaveNotes(module) => {
                self.store.save_notes_from_module(&self.registry, module)
            }
            StorageRequest::CreateModule(module) => {
                self.store.create_module_directory(module)?;
                self.store.load_notes_from_module(&mut self.registry, module)?;
                self.store.save_file(&self.registry)
            }
            StorageRequest::DeleteModule(module) => {
                self.store.clean_after_delete_module(module)?;
                self.store.save_file(&self.registry)
            }
            StorageRequest::RenameModule { from, to } => {
                self.store.save_notes_from_module(&self.registry, to)?;
                self.store.clean_after_delete_module(from)?;
                self.store.save_file(&self.registry)
            }
        }
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::link::LinkInput;
pub use crate::commands::{CmdMessage, CmdResult, ListedItem, MessageLevel};
