use crate::commands::{CmdMessage, CmdResult, StorageRequest};
use crate::error::{Result, TerminusError};
use crate::model::{Link, ModuleRegistry};
use crate::validate::{day_name, is_valid_url, parse_day, parse_time};

/// Raw link fields as typed by the user.
#[derive(Debug, Clone)]
pub struct LinkInput {
    pub description: String,
    pub day: String,
    pub start_time: String,
    pub url: String,
}

impl LinkInput {
    fn parse(&self) -> Result<Link> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(TerminusError::InvalidArgument(
                "Link description cannot be empty".to_string(),
            ));
        }
        let day = parse_day(&self.day).ok_or_else(|| {
            TerminusError::InvalidArgument(format!("Invalid day: {}", self.day))
        })?;
        let start_time = parse_time(&self.start_time).ok_or_else(|| {
            TerminusError::InvalidArgument(format!(
                "Invalid time: {} (expected HH:MM)",
                self.start_time
            ))
        })?;
        let url = self.url.trim();
        if !is_valid_url(url) {
            return Err(TerminusError::InvalidArgument(format!(
                "Invalid URL: {}",
                self.url
            )));
        }
        Ok(Link::new(description, day, start_time, url))
    }
}

pub fn add(registry: &mut ModuleRegistry, module: &str, input: &LinkInput) -> Result<CmdResult> {
    let link = input.parse()?;
    let message = format!(
        "Your link '{}' ({}) has been added to {}",
        link.description,
        day_name(link.day),
        module
    );
    registry.module_mut(module)?.manager_mut::<Link>().add(link);

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(message))
        .with_storage(StorageRequest::SaveFile))
}
