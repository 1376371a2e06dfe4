use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "linksy";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let data_base = dirs::data_dir().ok_or_else(|| AppError::StoragePathResolution {
            details: "unable to resolve data base directory (XDG_DATA_HOME/HOME)".into(),
        })?;

        Ok(Self::under(&data_base))
    }

    pub fn under(base: &Path) -> Self {
        let data_dir = base.join(APP_DIR_NAME);
        let logs_dir = data_dir.join("logs");

        Self { data_dir, logs_dir }
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.data_dir, &self.logs_dir] {
            fs::create_dir_all(dir).map_err(|source| AppError::StorageDirCreate {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(())
    }

    pub fn log_file_name(&self) -> &'static str {
        "linksy.log"
    }
}
