//! Discovery of migration-unit files on disk.
//!
//! Unit files are named `{date}_{epoch}_{LogicalName}.rs`, so a plain
//! lexicographic sort of filenames is also chronological order. The logical
//! name after the final underscore is the key a unit is resolved by in the
//! migration registry.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A discovered unit file: the on-disk filename (the ledger's identifier)
/// and the logical name embedded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFile {
    pub filename: String,
    pub logical_name: String,
}

pub struct MigrationCatalog {
    dir: PathBuf,
}

impl MigrationCatalog {
    pub fn new(dir: impl AsRef<Path>) -> MigrationCatalog {
        MigrationCatalog {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// All unit files in the migrations location, sorted by filename in the
    /// requested direction. A missing location is a deployment error, not a
    /// recoverable runtime condition.
    pub fn list_units(&self, order: SortOrder) -> Result<Vec<UnitFile>> {
        if !self.dir.is_dir() {
            return Err(Error::MigrationsDirMissing {
                path: self.dir.clone(),
            });
        }

        let mut units = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }
            units.push(parse_unit_filename(&path)?);
        }

        units.sort_by(|a, b| a.filename.cmp(&b.filename));
        if order == SortOrder::Descending {
            units.reverse();
        }
        Ok(units)
    }
}

fn parse_unit_filename(path: &Path) -> Result<UnitFile> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::BadUnitFilename {
            filename: path.display().to_string(),
        })?
        .to_string();

    let stem = filename.trim_end_matches(".rs");
    let logical_name = stem.rsplit('_').next().unwrap_or_default().to_string();
    if logical_name.is_empty() {
        return Err(Error::BadUnitFilename { filename });
    }

    Ok(UnitFile {
        filename,
        logical_name,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::seq::SliceRandom;
    use std::fs;

    fn catalog_with(filenames: &[&str]) -> (tempfile::TempDir, MigrationCatalog) {
        let dir = tempfile::tempdir().unwrap();

        // Creation order should not matter; listings are keyed by filename.
        let mut filenames = filenames.to_vec();
        filenames.shuffle(&mut rand::thread_rng());
        for filename in filenames {
            fs::write(dir.path().join(filename), "").unwrap();
        }

        let catalog = MigrationCatalog::new(dir.path());
        (dir, catalog)
    }

    #[test]
    fn test_listing_is_lexicographic() {
        let (_dir, catalog) = catalog_with(&[
            "2024-01-03_300_CreateC.rs",
            "2024-01-01_100_CreateA.rs",
            "2024-01-02_200_CreateB.rs",
        ]);

        let units = catalog.list_units(SortOrder::Ascending).unwrap();
        assert_eq!(
            units.iter().map(|u| u.filename.as_str()).collect::<Vec<_>>(),
            vec![
                "2024-01-01_100_CreateA.rs",
                "2024-01-02_200_CreateB.rs",
                "2024-01-03_300_CreateC.rs",
            ]
        );
    }

    #[test]
    fn test_descending_listing_is_reversed() {
        let (_dir, catalog) = catalog_with(&[
            "2024-01-01_100_CreateA.rs",
            "2024-01-02_200_CreateB.rs",
        ]);

        let units = catalog.list_units(SortOrder::Descending).unwrap();
        assert_eq!(
            units.iter().map(|u| u.filename.as_str()).collect::<Vec<_>>(),
            vec!["2024-01-02_200_CreateB.rs", "2024-01-01_100_CreateA.rs"]
        );
    }

    #[test]
    fn test_logical_name_extraction() {
        let (_dir, catalog) = catalog_with(&["2024-12-21_1734753349_CreatePastesTable1.rs"]);

        let units = catalog.list_units(SortOrder::Ascending).unwrap();
        assert_eq!(units[0].logical_name, "CreatePastesTable1");
    }

    #[test]
    fn test_non_unit_files_are_skipped() {
        let (dir, catalog) = catalog_with(&["2024-01-01_100_CreateA.rs"]);
        fs::write(dir.path().join("README.md"), "notes").unwrap();

        let units = catalog.list_units(SortOrder::Ascending).unwrap();
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let catalog = MigrationCatalog::new("/nonexistent/migrations");
        let err = catalog.list_units(SortOrder::Ascending).unwrap_err();
        assert!(matches!(err, Error::MigrationsDirMissing { .. }));
    }

    #[test]
    fn test_unextractable_name_is_fatal() {
        let (_dir, catalog) = catalog_with(&["2024-01-01_100_.rs"]);
        let err = catalog.list_units(SortOrder::Ascending).unwrap_err();
        assert!(matches!(err, Error::BadUnitFilename { filename } if filename == "2024-01-01_100_.rs"));
    }
}
