//! # Command Layer
//!
//! Every command is a plain function over a [`ModuleRegistry`]. Commands never
//! touch the disk: when a command changes something that must be persisted it
//! says so through [`CmdResult::storage`], and the API layer hands that
//! request to the store.

use crate::config::TerminusConfig;

pub mod config;
pub mod content;
pub mod link;
pub mod module;
pub mod note;
pub mod question;

/// What a command needs flushed after it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageRequest {
    /// Modules, questions or links changed
    SaveFile,
    /// The notes of one module changed
    SaveNotes(String),
    CreateModule(String),
    DeleteModule(String),
    RenameModule { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One row of a listing: a module, or a content entity within a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    pub index: usize,
    pub name: String,
    pub summary: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<ListedItem>,
    /// Full rendering of a single entity
    pub detail: Option<String>,
    pub config: Option<TerminusConfig>,
    pub storage: Option<StorageRequest>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed(mut self, listed: Vec<ListedItem>) -> Self {
        self.listed = listed;
        self
    }

    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_config(mut self, config: TerminusConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_storage(mut self, request: StorageRequest) -> Self {
        self.storage = Some(request);
        self
    }
}
