//! Filename handling for source images and their rescaled outputs.
//!
//! A source file is split on its last dot into a stem and an extension:
//!
//! - `holiday.JPG` → stem `holiday`, extension `JPG`
//! - `archive.tar.png` → stem `archive.tar`, extension `png`
//! - `README` → no extension, not an image candidate
//!
//! The output name keeps the extension exactly as written and inserts the
//! suffix before it: `holiday.JPG` + `_scaled` → `holiday_scaled.JPG`.
//!
//! Names are handled as [`OsStr`]/[`OsString`] so stems that are not valid
//! UTF-8 survive untouched. Only the extension has to be UTF-8 to be matched.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A directory entry that looks like an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    /// File name without the final `.ext`.
    pub stem: OsString,
    /// Extension as written on disk, without the dot.
    pub extension: String,
}

impl ImageFile {
    /// Split a path into stem and extension.
    ///
    /// Returns `None` when the file name has no extension or the extension
    /// is not valid UTF-8.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let stem = path.file_stem()?;
        Some(Self {
            path: path.to_path_buf(),
            stem: stem.to_os_string(),
            extension: extension.to_string(),
        })
    }

    /// Lower-cased extension, used for matching and format detection.
    pub fn extension_lower(&self) -> String {
        self.extension.to_ascii_lowercase()
    }

    /// `<stem><suffix>.<extension>`
    pub fn output_file_name(&self, suffix: &str) -> OsString {
        output_file_name(&self.stem, suffix, &self.extension)
    }

    /// Full output path inside `dir`.
    pub fn output_path(&self, dir: &Path, suffix: &str) -> PathBuf {
        dir.join(self.output_file_name(suffix))
    }
}

/// Build an output file name from its parts.
pub fn output_file_name(stem: &OsStr, suffix: &str, extension: &str) -> OsString {
    let mut name = stem.to_os_string();
    name.push(suffix);
    name.push(".");
    name.push(extension);
    name
}
