//! Directory listing.
//!
//! Reads the top level of the target directory once and returns the entries
//! that are regular files with a configured extension. Subdirectories are
//! never descended into, and entries with other extensions are dropped
//! without any report.
//!
//! The whole listing is collected before the caller writes anything, so
//! files produced during a run are never picked up by the same run.

use crate::config::RescaleConfig;
use crate::naming::ImageFile;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Make sure `dir` exists, creating missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), ScanError> {
    fs::create_dir_all(dir).map_err(|source| ScanError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// List candidate images in `config.target_dir`, sorted by file name.
pub fn scan(config: &RescaleConfig) -> Result<Vec<ImageFile>, ScanError> {
    let dir = &config.target_dir;
    let read_err = |source: std::io::Error| ScanError::ReadDir {
        path: dir.clone(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        // Follows symlinks so a linked image counts as a file
        let is_file = entry.path().is_file();
        if !is_file {
            continue;
        }
        let Some(file) = ImageFile::from_path(&entry.path()) else {
            continue;
        };
        if config.is_supported_extension(&file.extension) {
            files.push(file);
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!("found {} candidate images in {}", files.len(), dir.display());
    Ok(files)
}
