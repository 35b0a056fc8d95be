use crate::api::TerminusApi;
use crate::config::TerminusConfig;
use crate::error::{Result, TerminusError};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use log::{debug, warn};
use std::path::{Path, PathBuf};

pub struct TerminusContext {
    pub api: TerminusApi<FileStore>,
    pub data_dir: PathBuf,
}

/// Platform data directory, e.g. `~/.local/share/terminus` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "terminus", "terminus")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TerminusError::Config("Could not determine data directory".to_string()))
}

/// Builds the session: config, store and loaded registry.
///
/// A broken config file is reported and replaced by defaults rather than
/// blocking access to the data.
pub fn initialize(data_dir: Option<&Path>) -> Result<TerminusContext> {
    let data_dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_data_dir()?,
    };
    debug!("Using data directory {}", data_dir.display());

    let config = TerminusConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!("Ignoring unreadable config: {}", e);
        TerminusConfig::default()
    });

    let store = FileStore::new(data_dir.join(&config.data_file)).with_file_ext(&config.file_ext)?;
    let api = TerminusApi::open(store, data_dir.clone())?;

    Ok(TerminusContext { api, data_dir })
}
