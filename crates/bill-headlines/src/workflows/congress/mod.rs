//! Bill acquisition: the listing client and the on-disk archive it fills.

mod client;
mod records;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::storage::write_atomic;

pub use client::{CongressClient, FetchError, FetchSettings};
pub use records::{BillId, BillRecord, BillUrls};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to access bill archive {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bill archive {} is not a JSON array of bills: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw bill records persisted as one JSON array.
#[derive(Debug, Clone)]
pub struct BillArchive {
    path: PathBuf,
}

impl BillArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Vec<BillRecord>, ArchiveError> {
        let bytes = std::fs::read(&self.path).map_err(|source| self.io_error(source))?;
        serde_json::from_slice(&bytes).map_err(|source| ArchiveError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, bills: &[BillRecord]) -> Result<(), ArchiveError> {
        let json = serde_json::to_vec(bills).map_err(|source| ArchiveError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, &json).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> ArchiveError {
        ArchiveError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_saves_and_loads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let archive = BillArchive::new(dir.path().join("bills.json"));
        assert!(!archive.exists());

        let bills = vec![BillRecord {
            bill_type: "hr".into(),
            number: 42,
            official_title: "Recognize the bravest firefighters.".into(),
            urls: BillUrls {
                congress: "https://example.gov/hr42".into(),
            },
        }];
        archive.save(&bills).expect("save");

        assert!(archive.exists());
        assert_eq!(archive.load().expect("load"), bills);
    }

    #[test]
    fn missing_archive_reports_path() {
        let archive = BillArchive::new("./no-such-bills.json");
        match archive.load() {
            Err(ArchiveError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("./no-such-bills.json"))
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
