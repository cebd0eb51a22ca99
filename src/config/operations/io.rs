use crate::config::types::SyncConfig;
use crate::error::ConfigError;
use crate::paths::PATH_APP;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub fn settings_path() -> PathBuf {
    PATH_APP.join("settings.json")
}

pub fn load_cfg() -> SyncConfig {
    load_cfg_from(&settings_path())
}

/// Settings at `path`, or defaults when the file is missing or unreadable
pub fn load_cfg_from(path: &Path) -> SyncConfig {
    let Ok(file) = File::open(path) else {
        return SyncConfig::default();
    };

    match serde_json::from_reader::<_, SyncConfig>(BufReader::new(file)) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid settings file");
            SyncConfig::default()
        }
    }
}

pub fn save_cfg(config: &SyncConfig) -> Result<(), ConfigError> {
    save_cfg_to(&settings_path(), config)
}

pub fn save_cfg_to(path: &Path, config: &SyncConfig) -> Result<(), ConfigError> {
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let file = File::create(path).map_err(io_error)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
