use super::ModuleStore;
use crate::error::{Result, TerminusError};
use crate::model::{Content, ModuleRegistry, Note};
use crate::validate::{file_stem, is_valid_file_name, normalize_file_ext};
use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct FileStore {
    file_path: PathBuf,
    file_ext: String,
}

impl FileStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            file_ext: ".txt".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Result<Self> {
        self.file_ext = normalize_file_ext(ext).ok_or_else(|| {
            TerminusError::InvalidArgument(format!("Invalid note file extension: {:?}", ext))
        })?;
        Ok(self)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Directory holding the JSON file and every module directory.
    pub fn data_dir(&self) -> &Path {
        match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.data_dir().join(module)
    }

    pub fn note_path(&self, module: &str, note: &str) -> PathBuf {
        self.module_dir(module)
            .join(format!("{}{}", note, self.file_ext))
    }

    fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn initialize_file(&self) -> Result<()> {
        let parent = self.data_dir();
        if !parent.is_dir() {
            warn!("Parent directories not found, attempting to create them...");
            fs::create_dir_all(parent)?;
            info!("Parent directories created.");
        }
        if !self.file_path.exists() {
            warn!("{} not found, attempting to create file...", self.file_name());
            fs::File::create(&self.file_path)?;
            info!("{} created.", self.file_name());
        }
        Ok(())
    }

    fn parse_document(&self, content: &str) -> ModuleRegistry {
        if content.trim().is_empty() {
            return ModuleRegistry::new();
        }
        match serde_json::from_str::<ModuleRegistry>(content) {
            Ok(registry) => registry,
            Err(e) => {
                warn!(
                    "{} is not a valid module file ({}), starting with no modules",
                    self.file_name(),
                    e
                );
                self.backup_document();
                ModuleRegistry::new()
            }
        }
    }

    // The next save overwrites the document, keep a copy of what was there.
    fn backup_document(&self) {
        let backup = self.file_path.with_extension("json.bak");
        match fs::copy(&self.file_path, &backup) {
            Ok(_) => warn!("Previous contents kept in {}", backup.display()),
            Err(e) => warn!("Unable to back up {}: {}", self.file_path.display(), e),
        }
    }

    /// Note name for a directory entry, and whether it carries the configured
    /// extension. Other extensions still count, as the last one stripped.
    fn note_name<'a>(&self, file_name: &'a str) -> (&'a str, bool) {
        match file_name.strip_suffix(self.file_ext.as_str()) {
            Some(name) => (name, true),
            None => (file_stem(file_name), false),
        }
    }

    fn load_all_notes(&mut self, registry: &mut ModuleRegistry) -> Result<()> {
        for module in registry.module_names() {
            if !is_valid_file_name(&module) {
                warn!("Dropping module with invalid name: {:?}", module);
                registry.remove_module(&module);
                continue;
            }
            let dir = self.module_dir(&module);
            if dir.is_dir() {
                self.load_notes_from_module(registry, &module)?;
            } else {
                debug!("Creating missing directory for module {}", module);
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

/// Deletes every file of `dir`, stopping at the first failure.
///
/// Sub-directories are never recursed into: empty ones are removed, others
/// are left in place.
fn delete_all_files_in_directory(dir: &Path) -> Result<()> {
    for entry in sorted_entries(dir)? {
        let path = entry.path();
        if path.is_dir() {
            if let Err(e) = fs::remove_dir(&path) {
                warn!("Keeping non-empty directory {}: {}", path.display(), e);
            }
            continue;
        }
        if let Err(e) = fs::remove_file(&path) {
            error!("Unable to delete {}: {}", path.display(), e);
            return Err(e.into());
        }
    }
    Ok(())
}

/// Best-effort removal of an entry that cannot be loaded as a note.
fn discard_entry(path: &Path) {
    let removed = if path.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    match removed {
        Ok(()) => warn!("Discarded invalid note file {}", path.display()),
        Err(e) => warn!("Unable to discard {}: {}", path.display(), e),
    }
}

impl ModuleStore for FileStore {
    fn load_file(&mut self) -> Result<ModuleRegistry> {
        self.initialize_file()?;
        let content = fs::read_to_string(&self.file_path).inspect_err(|_| {
            error!("{} is not readable!", self.file_path.display());
        })?;

        info!("Decoding {}", self.file_name());
        let mut registry = self.parse_document(&content);
        registry.normalize_names();
        self.load_all_notes(&mut registry)?;
        Ok(registry)
    }

    fn save_file(&mut self, registry: &ModuleRegistry) -> Result<()> {
        self.initialize_file()?;
        debug!("Serializing {} modules", registry.len());
        let json = serde_json::to_string_pretty(registry)?;
        debug_assert!(!json.trim().is_empty(), "serialized registry is blank");
        info!("Writing to file: {}", self.file_path.display());
        fs::write(&self.file_path, json)?;
        Ok(())
    }

    fn save_notes_from_module(&mut self, registry: &ModuleRegistry, module: &str) -> Result<()> {
        let notes = registry.module(module)?.manager::<Note>();
        if !is_valid_file_name(module) {
            return Err(TerminusError::InvalidArgument(format!(
                "Invalid module name: {:?}",
                module
            )));
        }
        if let Some(bad) = notes.contents().iter().find(|n| !is_valid_file_name(n.name())) {
            return Err(TerminusError::InvalidArgument(format!(
                "Invalid note name: {:?}",
                bad.name()
            )));
        }

        let dir = self.module_dir(module);
        ensure_dir(&dir)?;
        delete_all_files_in_directory(&dir)?;
        for note in notes.contents() {
            fs::write(self.note_path(module, note.name()), note.body())?;
        }
        debug!("Saved {} notes for {}", notes.len(), module);
        Ok(())
    }

    fn load_notes_from_module(
        &mut self,
        registry: &mut ModuleRegistry,
        module: &str,
    ) -> Result<()> {
        let dir = self.module_dir(module);
        registry.module_mut(module)?.manager_mut::<Note>().purge_data();
        if !dir.is_dir() {
            return Ok(());
        }

        // One file per note name; the configured extension wins a collision
        let mut chosen: BTreeMap<String, (PathBuf, bool)> = BTreeMap::new();
        for entry in sorted_entries(&dir)? {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let (name, primary) = self.note_name(&file_name);
            if !path.is_file() || !is_valid_file_name(name) {
                discard_entry(&path);
                continue;
            }
            let kept_primary = chosen.get(name).map(|(_, p)| *p);
            if kept_primary == Some(true) || (kept_primary == Some(false) && !primary) {
                discard_entry(&path);
                continue;
            }
            if let Some((replaced, _)) = chosen.insert(name.to_string(), (path, primary)) {
                discard_entry(&replaced);
            }
        }

        let notes = registry.module_mut(module)?.manager_mut::<Note>();
        for (name, (path, _)) in chosen {
            let data = fs::read_to_string(&path)?;
            notes.add(Note::new(name, data));
        }
        debug!("Loaded {} notes for {}", notes.len(), module);
        Ok(())
    }

    fn clean_after_delete_module(&mut self, module: &str) -> Result<()> {
        let dir = self.module_dir(module);
        if !dir.is_dir() {
            // Nothing was ever saved for this module
            return Ok(());
        }
        delete_all_files_in_directory(&dir)?;
        fs::remove_dir(&dir).inspect_err(|e| {
            error!("Unable to delete folder {}: {}", dir.display(), e);
        })?;
        info!("Removed directory of module {}", module);
        Ok(())
    }

    fn create_module_directory(&mut self, module: &str) -> Result<()> {
        ensure_dir(&self.module_dir(module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("data").join("main.json"));
        (temp, store)
    }

    fn registry_with_notes(module: &str, notes: &[(&str, &str)]) -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.add_module(module);
        let manager = registry.module_mut(module).unwrap().manager_mut::<Note>();
        for (name, data) in notes {
            manager.add(Note::new(*name, *data));
        }
        registry
    }

    fn dir_listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn load_missing_file_creates_it_empty() {
        let (_temp, mut store) = setup();
        let registry = store.load_file().unwrap();
        assert!(registry.is_empty());
        assert!(store.file_path().is_file());
        assert_eq!(fs::read_to_string(store.file_path()).unwrap(), "");
    }

    #[test]
    fn malformed_json_soft_fails_with_backup() {
        let (_temp, mut store) = setup();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.file_path(), "{ not json").unwrap();

        let registry = store.load_file().unwrap();
        assert!(registry.is_empty());
        let backup = store.data_dir().join("main.json.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{ not json");
    }

    #[test]
    fn save_notes_then_load_round_trips() {
        let (_temp, mut store) = setup();
        let mut registry =
            registry_with_notes("CS2103", &[("lecture1", "hello"), ("lecture2", "world")]);
        let before = registry.module("CS2103").unwrap().manager::<Note>().clone();

        store.save_notes_from_module(&registry, "CS2103").unwrap();
        let dir = store.module_dir("CS2103");
        assert_eq!(dir_listing(&dir), vec!["lecture1.txt", "lecture2.txt"]);
        assert_eq!(fs::read_to_string(dir.join("lecture1.txt")).unwrap(), "hello");
        assert_eq!(fs::read_to_string(dir.join("lecture2.txt")).unwrap(), "world");

        store.load_notes_from_module(&mut registry, "CS2103").unwrap();
        let after = registry.module("CS2103").unwrap().manager::<Note>();
        assert_eq!(after.len(), 2);
        assert_eq!(after, &before);
    }

    #[test]
    fn save_notes_removes_stale_files() {
        let (_temp, mut store) = setup();
        let mut registry = registry_with_notes("CS2103", &[("a", "1"), ("b", "2")]);
        store.save_notes_from_module(&registry, "CS2103").unwrap();

        registry
            .module_mut("CS2103")
            .unwrap()
            .manager_mut::<Note>()
            .delete(1)
            .unwrap();
        store.save_notes_from_module(&registry, "CS2103").unwrap();

        assert_eq!(dir_listing(&store.module_dir("CS2103")), vec!["b.txt"]);
    }

    #[test]
    fn save_notes_uses_configured_extension() {
        let (_temp, store) = setup();
        let mut store = store.with_file_ext("md").unwrap();
        let registry = registry_with_notes("CS2103", &[("a", "1")]);
        store.save_notes_from_module(&registry, "CS2103").unwrap();
        assert_eq!(dir_listing(&store.module_dir("CS2103")), vec!["a.md"]);
    }

    #[test]
    fn save_notes_rejects_unsafe_note_names_before_touching_disk() {
        let (_temp, mut store) = setup();
        let good = registry_with_notes("CS2103", &[("keep", "1")]);
        store.save_notes_from_module(&good, "CS2103").unwrap();

        let bad = registry_with_notes("CS2103", &[("../escape", "x")]);
        let err = store.save_notes_from_module(&bad, "CS2103").unwrap_err();
        assert!(matches!(err, TerminusError::InvalidArgument(_)));
        assert_eq!(dir_listing(&store.module_dir("CS2103")), vec!["keep.txt"]);
    }

    #[test]
    fn save_notes_for_unknown_module_fails() {
        let (_temp, mut store) = setup();
        let registry = ModuleRegistry::new();
        assert!(matches!(
            store.save_notes_from_module(&registry, "CS2103"),
            Err(TerminusError::ModuleNotFound(_))
        ));
    }

    #[test]
    fn load_discards_invalid_files() {
        let (_temp, mut store) = setup();
        let mut registry = registry_with_notes("CS2103", &[]);
        let dir = store.module_dir("CS2103");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("good.txt"), "kept").unwrap();
        fs::write(dir.join("bad?.txt"), "dropped").unwrap();
        fs::write(dir.join(".hidden"), "dropped").unwrap();

        store.load_notes_from_module(&mut registry, "CS2103").unwrap();

        let notes = registry.module("CS2103").unwrap().manager::<Note>();
        assert_eq!(notes.list_all(), vec![(1, "good".to_string())]);
        assert_eq!(dir_listing(&dir), vec!["good.txt"]);
    }

    #[test]
    fn load_purges_previous_notes() {
        let (_temp, mut store) = setup();
        let mut registry = registry_with_notes("CS2103", &[("only-in-memory", "x")]);
        fs::create_dir_all(store.module_dir("CS2103")).unwrap();

        store.load_notes_from_module(&mut registry, "CS2103").unwrap();
        assert!(registry.module("CS2103").unwrap().manager::<Note>().is_empty());
    }

    #[test]
    fn full_cycle_through_json_and_note_files() {
        let (_temp, mut store) = setup();
        let mut registry = registry_with_notes("CS2103", &[("lecture1", "hello")]);
        registry
            .module_mut("CS2103")
            .unwrap()
            .manager_mut::<Question>()
            .add(Question::new("What is SLAP?", "Single level of abstraction"));
        store.save_file(&registry).unwrap();
        store.save_all_notes(&registry).unwrap();

        let json = fs::read_to_string(store.file_path()).unwrap();
        assert!(json.contains("What is SLAP?"));
        assert!(!json.contains("hello"));

        let loaded = store.load_file().unwrap();
        let module = loaded.module("CS2103").unwrap();
        assert_eq!(module.manager::<Question>().len(), 1);
        assert_eq!(module.manager::<Note>().content_data(1).unwrap(), "hello");
    }

    #[test]
    fn load_creates_directories_and_drops_unsafe_modules() {
        let (_temp, mut store) = setup();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(
            store.file_path(),
            r#"{"modules": {"CS2103": {"name": "CS2103"}, "bad/name": {"name": "bad/name"}}}"#,
        )
        .unwrap();

        let registry = store.load_file().unwrap();
        assert_eq!(registry.module_names(), vec!["CS2103"]);
        assert!(store.module_dir("CS2103").is_dir());
    }

    #[test]
    fn clean_after_delete_without_directory_is_noop() {
        let (_temp, mut store) = setup();
        store.clean_after_delete_module("CS2103").unwrap();
        assert!(!store.data_dir().exists());
    }

    #[test]
    fn clean_after_delete_removes_directory() {
        let (_temp, mut store) = setup();
        let registry = registry_with_notes("CS2103", &[("a", "1"), ("b", "2")]);
        store.save_notes_from_module(&registry, "CS2103").unwrap();

        store.clean_after_delete_module("CS2103").unwrap();
        assert!(!store.module_dir("CS2103").exists());
    }

    #[test]
    fn multi_part_extensions_are_refused() {
        let (_temp, store) = setup();
        assert!(matches!(
            store.with_file_ext("note.txt"),
            Err(TerminusError::InvalidArgument(_))
        ));
    }

    #[test]
    fn load_strips_exactly_the_configured_extension() {
        let (_temp, store) = setup();
        let mut store = store.with_file_ext(".md").unwrap();
        let mut registry = registry_with_notes("CS2103", &[("week 1", "hello")]);
        store.save_notes_from_module(&registry, "CS2103").unwrap();

        store.load_notes_from_module(&mut registry, "CS2103").unwrap();
        let notes = registry.module("CS2103").unwrap().manager::<Note>();
        assert_eq!(notes.list_all(), vec![(1, "week 1".to_string())]);
        assert_eq!(dir_listing(&store.module_dir("CS2103")), vec!["week 1.md"]);
    }

    #[test]
    fn load_orders_notes_by_name() {
        let (_temp, mut store) = setup();
        let mut registry =
            registry_with_notes("CS2103", &[("zeta", "1"), ("alpha", "2"), ("mid", "3")]);
        store.save_notes_from_module(&registry, "CS2103").unwrap();

        store.load_notes_from_module(&mut registry, "CS2103").unwrap();
        let notes = registry.module("CS2103").unwrap().manager::<Note>();
        assert_eq!(
            notes.list_all(),
            vec![
                (1, "alpha".to_string()),
                (2, "mid".to_string()),
                (3, "zeta".to_string())
            ]
        );
        assert_eq!(notes.content_data(3).unwrap(), "1");
    }

    #[test]
    fn configured_extension_wins_over_earlier_stray_file() {
        let (_temp, mut store) = setup();
        let mut registry = registry_with_notes("CS2103", &[]);
        let dir = store.module_dir("CS2103");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("lecture1"), "stray").unwrap();
        fs::write(dir.join("lecture1.md"), "other").unwrap();
        fs::write(dir.join("lecture1.txt"), "real").unwrap();

        store.load_notes_from_module(&mut registry, "CS2103").unwrap();

        let notes = registry.module("CS2103").unwrap().manager::<Note>();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.content_data(1).unwrap(), "real");
        assert_eq!(dir_listing(&dir), vec!["lecture1.txt"]);
    }

    #[test]
    fn configured_extension_wins_over_later_stray_file() {
        let (_temp, store) = setup();
        let mut store = store.with_file_ext("md").unwrap();
        let mut registry = registry_with_notes("CS2103", &[]);
        let dir = store.module_dir("CS2103");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("lecture1.md"), "real").unwrap();
        fs::write(dir.join("lecture1.txt"), "stray").unwrap();

        store.load_notes_from_module(&mut registry, "CS2103").unwrap();

        let notes = registry.module("CS2103").unwrap().manager::<Note>();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.content_data(1).unwrap(), "real");
        assert_eq!(dir_listing(&dir), vec!["lecture1.md"]);
    }

    #[test]
    fn non_empty_subdirectory_survives_load_and_save() {
        let (_temp, mut store) = setup();
        let mut registry = registry_with_notes("CS2103", &[]);
        let dir = store.module_dir("CS2103");
        fs::create_dir_all(dir.join("slides")).unwrap();
        fs::create_dir_all(dir.join("empty")).unwrap();
        fs::write(dir.join("slides").join("week1.pdf"), "pdf").unwrap();
        fs::write(dir.join("lecture1.txt"), "hello").unwrap();

        store.load_notes_from_module(&mut registry, "CS2103").unwrap();
        assert!(dir.join("slides").join("week1.pdf").is_file());
        assert!(!dir.join("empty").exists());

        store.save_notes_from_module(&registry, "CS2103").unwrap();
        store.save_all_notes(&registry).unwrap();
        assert!(dir.join("slides").join("week1.pdf").is_file());
        assert_eq!(dir_listing(&dir), vec!["lecture1.txt", "slides"]);
    }

    #[test]
    fn clean_after_delete_keeps_nested_files() {
        let (_temp, mut store) = setup();
        let registry = registry_with_notes("CS2103", &[("a", "1")]);
        store.save_notes_from_module(&registry, "CS2103").unwrap();
        let slides = store.module_dir("CS2103").join("slides");
        fs::create_dir_all(&slides).unwrap();
        fs::write(slides.join("week1.pdf"), "pdf").unwrap();

        assert!(matches!(
            store.clean_after_delete_module("CS2103"),
            Err(TerminusError::Io(_))
        ));
        assert!(slides.join("week1.pdf").is_file());
        assert!(!store.module_dir("CS2103").join("a.txt").exists());
    }
}
