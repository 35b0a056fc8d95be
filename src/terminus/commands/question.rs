use crate::commands::{CmdMessage, CmdResult, StorageRequest};
use crate::error::{Result, TerminusError};
use crate::model::{ModuleRegistry, Question};

pub fn add(
    registry: &mut ModuleRegistry,
    module: &str,
    question: &str,
    answer: &str,
) -> Result<CmdResult> {
    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(TerminusError::InvalidArgument(
            "Both a question and an answer are required".to_string(),
        ));
    }

    registry
        .module_mut(module)?
        .manager_mut::<Question>()
        .add(Question::new(question, answer));

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Your question '{}' has been added to {}",
            question, module
        )))
        .with_storage(StorageRequest::SaveFile))
}
