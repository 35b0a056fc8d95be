use crate::commands::{CmdMessage, CmdResult};
use crate::config::TerminusConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    // A broken file must stay fixable through `config <key> <value>`
    let mut result = CmdResult::default();
    let mut config = TerminusConfig::load(config_dir).unwrap_or_else(|e| {
        result.add_message(CmdMessage::warning(format!(
            "Ignoring config file, using defaults: {}",
            e
        )));
        TerminusConfig::default()
    });

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            let message = match config.get(&key) {
                Some(val) => CmdMessage::info(val),
                None => CmdMessage::error(format!("Unknown config key: {}", key)),
            };
            Ok(result.with_message(message))
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                return Ok(result.with_message(CmdMessage::error(e.to_string())));
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            Ok(result
                .with_message(CmdMessage::success(format!(
                    "{} set to {}",
                    key, display_val
                )))
                .with_config(config))
        }
    }
}
