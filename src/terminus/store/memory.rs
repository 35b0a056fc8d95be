use super::ModuleStore;
use crate::error::Result;
use crate::model::{Content, ModuleRegistry, Note};
use crate::validate::is_valid_file_name;
use std::collections::BTreeMap;

/// In-memory mirror of the file layout, for testing.
/// `document` plays the JSON file, `directories` the per-module note folders.
#[derive(Default)]
pub struct InMemoryStore {
    document: Option<String>,
    directories: BTreeMap<String, Vec<Note>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, json: impl Into<String>) -> Self {
        self.document = Some(json.into());
        self
    }

    pub fn with_notes(mut self, module: &str, notes: Vec<Note>) -> Self {
        self.directories.insert(module.to_string(), notes);
        self
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn has_directory(&self, module: &str) -> bool {
        self.directories.contains_key(module)
    }

    pub fn stored_notes(&self, module: &str) -> Option<&[Note]> {
        self.directories.get(module).map(|n| n.as_slice())
    }
}

impl ModuleStore for InMemoryStore {
    fn load_file(&mut self) -> Result<ModuleRegistry> {
        let json = self.document.get_or_insert_with(String::new);
        let mut registry = if json.trim().is_empty() {
            ModuleRegistry::new()
        } else {
            serde_json::from_str(json).unwrap_or_default()
        };
        registry.normalize_names();

        for module in registry.module_names() {
            if !is_valid_file_name(&module) {
                registry.remove_module(&module);
            } else if self.directories.contains_key(&module) {
                self.load_notes_from_module(&mut registry, &module)?;
            } else {
                self.directories.insert(module, Vec::new());
            }
        }
        Ok(registry)
    }

    fn save_file(&mut self, registry: &ModuleRegistry) -> Result<()> {
        self.document = Some(serde_json::to_string_pretty(registry)?);
        Ok(())
    }

    fn save_notes_from_module(&mut self, registry: &ModuleRegistry, module: &str) -> Result<()> {
        let notes = registry.module(module)?.manager::<Note>();
        self.directories
            .insert(module.to_string(), notes.contents().to_vec());
        Ok(())
    }

    fn load_notes_from_module(
        &mut self,
        registry: &mut ModuleRegistry,
        module: &str,
    ) -> Result<()> {
        let notes = registry.module_mut(module)?.manager_mut::<Note>();
        notes.purge_data();
        if let Some(stored) = self.directories.get_mut(module) {
            stored.retain(|n| is_valid_file_name(n.name()));
            for note in stored.iter() {
                notes.add(note.clone());
            }
        }
        Ok(())
    }

    fn clean_after_delete_module(&mut self, module: &str) -> Result<()> {
        self.directories.remove(module);
        Ok(())
    }

    fn create_module_directory(&mut self, module: &str) -> Result<()> {
        self.directories.entry(module.to_string()).or_default();
        Ok(())
    }
}
