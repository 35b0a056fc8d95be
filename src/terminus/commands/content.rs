//! View and delete, shared by every content kind.

use crate::commands::{CmdMessage, CmdResult, ListedItem, StorageRequest};
use crate::error::Result;
use crate::model::{Content, ContentKind, ContentType, ModuleRegistry};

const SUMMARY_CHARS: usize = 60;

fn summary(data: &str) -> String {
    data.chars()
        .take(SUMMARY_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// Storage needed after the contents of `kind` changed in `module`.
pub fn storage_for(kind: ContentKind, module: &str) -> StorageRequest {
    match kind {
        ContentKind::Note => StorageRequest::SaveNotes(module.to_string()),
        ContentKind::Question | ContentKind::Link => StorageRequest::SaveFile,
    }
}

/// Lists every entity of a kind, or shows one in full when `index` is given.
pub fn view<T: ContentType>(
    registry: &ModuleRegistry,
    module: &str,
    index: Option<usize>,
) -> Result<CmdResult> {
    let manager = registry.module(module)?.manager::<T>();

    if let Some(index) = index {
        let data = manager.content_data(index)?;
        return Ok(CmdResult::default().with_detail(data));
    }

    let listed: Vec<ListedItem> = manager
        .contents()
        .iter()
        .enumerate()
        .map(|(i, c)| ListedItem {
            index: i + 1,
            name: c.name().to_string(),
            summary: summary(&c.data()),
        })
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No {}s in {}.",
            T::KIND,
            module
        )));
    }
    Ok(result.with_listed(listed))
}

pub fn delete<T: ContentType>(
    registry: &mut ModuleRegistry,
    module: &str,
    index: usize,
) -> Result<CmdResult> {
    let removed = registry
        .module_mut(module)?
        .manager_mut::<T>()
        .delete(index)?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Deleted {} {}: {}",
            T::KIND,
            index,
            removed.name()
        )))
        .with_storage(storage_for(T::KIND, module)))
}
