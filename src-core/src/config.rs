//! Application Configuration
//!
//! `memo-shelf.json` in the data directory, defaults otherwise.
//! Environment overrides: `MEMO_SHELF_DATA_DIR`, `MEMO_SHELF_HISTORY_LIMIT`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{DefaultBucket, DomainError, DomainResult, DEFAULT_HISTORY_LIMIT};

pub const CONFIG_FILE: &str = "memo-shelf.json";
pub const DATA_DIR_ENV: &str = "MEMO_SHELF_DATA_DIR";
pub const HISTORY_LIMIT_ENV: &str = "MEMO_SHELF_HISTORY_LIMIT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Directory holding the config file, database and logs
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub db_file: String,
    /// Defaults to `<data_dir>/logs`
    pub log_dir: Option<PathBuf>,
    pub default_bucket: DefaultBucket,
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_file: "memo_shelf.db".to_string(),
            log_dir: None,
            default_bucket: DefaultBucket::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Platform data directory, falling back to the working directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("memo-shelf")
}

impl AppConfig {
    /// Resolve the data directory (`data_dir` argument, then the environment,
    /// then the platform default) and load the config found there.
    pub fn load(data_dir: Option<PathBuf>) -> DomainResult<Self> {
        let dir = data_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        let history_limit = std::env::var(HISTORY_LIMIT_ENV).ok();
        Self::from_dir(&dir, history_limit.as_deref())
    }

    /// Load `memo-shelf.json` from `dir`, applying a history-limit override
    pub fn from_dir(dir: &Path, history_limit: Option<&str>) -> DomainResult<Self> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| DomainError::Internal(format!("Failed to read {}: {}", path.display(), e)))?;
            serde_json::from_str::<AppConfig>(&text)
                .map_err(|e| DomainError::InvalidInput(format!("Invalid {}: {}", path.display(), e)))?
        } else {
            AppConfig::default()
        };
        config.data_dir = dir.to_path_buf();

        if let Some(raw) = history_limit {
            config.history_limit = raw
                .trim()
                .parse()
                .map_err(|_| DomainError::InvalidInput(format!("{} must be a number, got {:?}", HISTORY_LIMIT_ENV, raw)))?;
        }
        if config.history_limit == 0 {
            return Err(DomainError::InvalidInput("history limit must be at least 1".to_string()));
        }
        if config.default_bucket.id.trim().is_empty() {
            return Err(DomainError::InvalidInput("default bucket id is empty".to_string()));
        }
        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| self.data_dir.join("logs"))
    }

    /// Write the config file into the data directory
    pub fn save(&self) -> DomainResult<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| DomainError::Internal(e.to_string()))?;
        let text = serde_json::to_string_pretty(self).map_err(|e| DomainError::Internal(e.to_string()))?;
        std::fs::write(self.data_dir.join(CONFIG_FILE), text).map_err(|e| DomainError::Internal(e.to_string()))
    }
}
