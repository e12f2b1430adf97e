use std::path::{Path, PathBuf};

use tracing::info;

use super::planner::Schedule;
use super::ScheduleError;
use crate::storage::write_atomic;

/// The schedule file: a JSON array of `[date, headline]` pairs.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    path: PathBuf,
}

impl ScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Schedule, ScheduleError> {
        let bytes = std::fs::read(&self.path).map_err(|source| ScheduleError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ScheduleError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, schedule: &Schedule) -> Result<(), ScheduleError> {
        let json = serde_json::to_vec(schedule).map_err(|source| ScheduleError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, &json).map_err(|source| ScheduleError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), entries = schedule.len(), "schedule saved");
        Ok(())
    }
}
