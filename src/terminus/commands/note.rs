use crate::commands::{CmdMessage, CmdResult, StorageRequest};
use crate::error::{Result, TerminusError};
use crate::model::{Content, ModuleRegistry, Note};
use crate::validate::{is_valid_file_name, MAX_NAME_LEN};

pub fn add(registry: &mut ModuleRegistry, module: &str, name: &str, data: &str) -> Result<CmdResult> {
    let name = name.trim();
    if !is_valid_file_name(name) {
        return Err(TerminusError::InvalidArgument(format!(
            "Note name {:?} must be 1-{} letters, digits, spaces, '-' or '_'",
            name, MAX_NAME_LEN
        )));
    }

    let notes = registry.module_mut(module)?.manager_mut::<Note>();
    if notes.contains_name(name) {
        return Err(TerminusError::InvalidArgument(format!(
            "A note named {} already exists in {}",
            name, module
        )));
    }
    notes.add(Note::new(name, data));

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Your note on '{}' has been added to {}",
            name, module
        )))
        .with_storage(StorageRequest::SaveNotes(module.to_string())))
}

/// Replaces the body of a note; the name stays as it is.
pub fn edit(
    registry: &mut ModuleRegistry,
    module: &str,
    index: usize,
    data: &str,
) -> Result<CmdResult> {
    let note = registry.module_mut(module)?.manager_mut::<Note>().get_mut(index)?;
    note.set_data(data);
    let name = note.name().to_string();

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Note {} ({}) updated",
            index, name
        )))
        .with_storage(StorageRequest::SaveNotes(module.to_string())))
}
