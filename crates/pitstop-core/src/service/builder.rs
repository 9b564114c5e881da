//! Assembles a [`ChecklistService`] bound to one SQLite file.

use std::path::{Path, PathBuf};

use tokio::task;

use super::ChecklistService;
use crate::{
    error::{ChecklistError, Result},
    store::SqliteStore,
};

/// Chooses the checklist database and whether the atomic finalize/reopen
/// transactions are installed, then opens the store once so schema problems
/// surface before the first command runs.
#[derive(Debug, Clone)]
pub struct ServiceBuilder {
    database_path: Option<PathBuf>,
    privileged_ops: bool,
}

impl ServiceBuilder {
    /// Defaults: the per-user data file and privileged ops installed.
    pub fn new() -> Self {
        Self {
            database_path: None,
            privileged_ops: true,
        }
    }

    /// Points the service at a specific checklist database. `None` keeps the
    /// per-user default under `$XDG_DATA_HOME/pitstop/pitstop.db`.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// With `false`, finalize takes the two-step fallback and reopen is
    /// refused.
    pub fn with_privileged_ops(mut self, enabled: bool) -> Self {
        self.privileged_ops = enabled;
        self
    }

    /// Creates the database directory if needed, runs schema setup and
    /// returns the service.
    ///
    /// # Errors
    ///
    /// `ChecklistError::FileSystem` when the directory cannot be created,
    /// `ChecklistError::Store` when the schema cannot be applied.
    pub async fn build(self) -> Result<ChecklistService> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ChecklistError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let schema_path = db_path.clone();
        let privileged_ops = self.privileged_ops;
        task::spawn_blocking(move || {
            SqliteStore::open(&schema_path, privileged_ops).map(drop)
        })
        .await
        .map_err(|e| ChecklistError::Configuration {
            message: format!("Schema setup task failed: {e}"),
        })??;

        Ok(ChecklistService::new(db_path, privileged_ops))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("pitstop")
            .place_data_file("pitstop.db")
            .map_err(|e| ChecklistError::XdgDirectory(e.to_string()))
    }
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
