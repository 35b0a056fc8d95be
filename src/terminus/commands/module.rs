use crate::commands::{CmdMessage, CmdResult, ListedItem, StorageRequest};
use crate::error::{Result, TerminusError};
use crate::model::{ContentKind, ModuleRegistry};
use crate::validate::{is_valid_file_name, MAX_NAME_LEN};

fn check_name(name: &str) -> Result<()> {
    if is_valid_file_name(name) {
        return Ok(());
    }
    Err(TerminusError::InvalidArgument(format!(
        "Module name {:?} must be 1-{} letters, digits, spaces, '-' or '_'",
        name, MAX_NAME_LEN
    )))
}

/// Accepts either a module name or its 1-based position in `list`.
pub fn resolve(registry: &ModuleRegistry, selector: &str) -> Result<String> {
    if registry.contains(selector) {
        return Ok(selector.to_string());
    }
    if let Ok(index) = selector.parse::<usize>() {
        let names = registry.module_names();
        return index
            .checked_sub(1)
            .and_then(|i| names.get(i).cloned())
            .ok_or(TerminusError::IndexOutOfRange {
                index,
                len: names.len(),
            });
    }
    Err(TerminusError::ModuleNotFound(selector.to_string()))
}

pub fn add(registry: &mut ModuleRegistry, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    check_name(name)?;
    if !registry.add_module(name) {
        return Err(TerminusError::InvalidArgument(format!(
            "Module {} already exists",
            name
        )));
    }
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Module {} added", name)))
        .with_storage(StorageRequest::CreateModule(name.to_string())))
}

pub fn delete(registry: &mut ModuleRegistry, selector: &str) -> Result<CmdResult> {
    let name = resolve(registry, selector)?;
    registry.remove_module(&name);
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Module {} deleted", name)))
        .with_storage(StorageRequest::DeleteModule(name)))
}

pub fn rename(registry: &mut ModuleRegistry, selector: &str, new_name: &str) -> Result<CmdResult> {
    let from = resolve(registry, selector)?;
    let to = new_name.trim();
    check_name(to)?;
    registry.rename_module(&from, to)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Module {} renamed to {}",
            from, to
        )))
        .with_storage(StorageRequest::RenameModule {
            from,
            to: to.to_string(),
        }))
}

pub fn list(registry: &ModuleRegistry) -> Result<CmdResult> {
    let listed: Vec<ListedItem> = registry
        .modules()
        .enumerate()
        .map(|(i, m)| ListedItem {
            index: i + 1,
            name: m.name.clone(),
            summary: format!(
                "{} notes, {} questions, {} links",
                m.count(ContentKind::Note),
                m.count(ContentKind::Question),
                m.count(ContentKind::Link)
            ),
        })
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(
            "No modules yet. Add one with `terminus module add <name>`.",
        ));
    }
    Ok(result.with_listed(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Note;

    #[test]
    fn add_requests_directory_creation() {
        let mut registry = ModuleRegistry::new();
        let result = add(&mut registry, "CS2103").unwrap();
        assert_eq!(
            result.storage,
            Some(StorageRequest::CreateModule("CS2103".to_string()))
        );
        assert!(registry.contains("CS2103"));
    }

    #[test]
    fn add_rejects_duplicates_and_unsafe_names() {
        let mut registry = ModuleRegistry::new();
        add(&mut registry, "CS2103").unwrap();
        assert!(add(&mut registry, "CS2103").is_err());
        assert!(add(&mut registry, "CS/2103").is_err());
        assert!(add(&mut registry, "").is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn delete_by_name_or_index() {
        let mut registry = ModuleRegistry::new();
        add(&mut registry, "CS2101").unwrap();
        add(&mut registry, "CS2103").unwrap();

        let result = delete(&mut registry, "2").unwrap();
        assert_eq!(
            result.storage,
            Some(StorageRequest::DeleteModule("CS2103".to_string()))
        );
        delete(&mut registry, "CS2101").unwrap();
        assert!(registry.is_empty());

        assert!(matches!(
            delete(&mut registry, "1"),
            Err(TerminusError::IndexOutOfRange { index: 1, len: 0 })
        ));
        assert!(matches!(
            delete(&mut registry, "MA1101"),
            Err(TerminusError::ModuleNotFound(_))
        ));
    }

    #[test]
    fn rename_keeps_contents() {
        let mut registry = ModuleRegistry::new();
        add(&mut registry, "CS2103").unwrap();
        registry
            .module_mut("CS2103")
            .unwrap()
            .manager_mut::<Note>()
            .add(Note::new("lecture1", "hello"));

        let result = rename(&mut registry, "CS2103", "CS2103T").unwrap();
        assert_eq!(
            result.storage,
            Some(StorageRequest::RenameModule {
                from: "CS2103".to_string(),
                to: "CS2103T".to_string()
            })
        );
        let module = registry.module("CS2103T").unwrap();
        assert_eq!(module.manager::<Note>().len(), 1);
        assert!(rename(&mut registry, "CS2103T", "bad/name").is_err());
    }

    #[test]
    fn list_summarizes_counts() {
        let mut registry = ModuleRegistry::new();
        assert_eq!(list(&registry).unwrap().messages.len(), 1);

        add(&mut registry, "CS2103").unwrap();
        let result = list(&registry).unwrap();
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].summary, "0 notes, 0 questions, 0 links");
    }
}
