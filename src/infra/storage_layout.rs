use std::{fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "revterm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub log_dir: PathBuf,
}

impl StorageLayout {
    /// Resolves the log directory: explicit override, then the platform state
    /// dir, then the cache dir.
    pub fn resolve(log_dir_override: Option<PathBuf>) -> Result<Self, AppError> {
        let log_dir = match log_dir_override {
            Some(dir) => dir,
            None => dirs::state_dir()
                .or_else(dirs::cache_dir)
                .map(|base| base.join(APP_DIR_NAME))
                .ok_or_else(|| AppError::StoragePathResolution {
                    details: "unable to resolve state or cache directory".into(),
                })?,
        };

        Ok(Self { log_dir })
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.log_dir).map_err(|source| AppError::StorageDirCreate {
            path: self.log_dir.clone(),
            source,
        })
    }
}
