use crate::error::{Result, TerminusError};
use crate::validate::normalize_file_ext;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".txt";
const DEFAULT_DATA_FILE: &str = "main.json";

/// Configuration for terminus, stored next to the data file in config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminusConfig {
    /// Extension of note files (e.g., ".txt", ".md")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Name of the JSON file holding modules, questions and links
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

impl Default for TerminusConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            data_file: default_data_file(),
        }
    }
}

impl TerminusConfig {
    pub const KEYS: [&'static str; 2] = ["file-ext", "data-file"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: TerminusConfig = serde_json::from_str(&content)?;
        let file_ext = config.file_ext.clone();
        config.set_file_ext(&file_ext)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "file-ext" => Some(self.file_ext.clone()),
            "data-file" => Some(self.data_file.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "file-ext" => self.set_file_ext(value),
            "data-file" => {
                if !value.ends_with(".json") || value.contains(['/', '\\']) {
                    return Err(TerminusError::Config(format!(
                        "data-file must be a plain .json file name, got {}",
                        value
                    )));
                }
                self.data_file = value.to_string();
                Ok(())
            }
            other => Err(TerminusError::Config(format!(
                "Unknown config key: {}",
                other
            ))),
        }
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }

    /// Normalizes to start with a dot. Multi-part extensions are refused since
    /// note names are recovered by stripping exactly this suffix.
    pub fn set_file_ext(&mut self, ext: &str) -> Result<()> {
        self.file_ext = normalize_file_ext(ext).ok_or_else(|| {
            TerminusError::Config(format!(
                "file-ext must be a single alphanumeric extension such as md, got {}",
                ext
            ))
        })?;
        Ok(())
    }
}
