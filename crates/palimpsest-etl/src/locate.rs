//! The Locator: enumerates the source units of a corpus.

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use palimpsest_core::{Error, Result};

/// One file to extract, tagged with the sub-collection it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub collection: String,
}

impl SourceUnit {
    #[must_use]
    pub fn new(path: PathBuf, collection: impl Into<String>) -> Self {
        Self {
            path,
            collection: collection.into(),
        }
    }

    /// File name for log lines.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[derive(Debug, Clone)]
struct Collection {
    name: String,
    dir: PathBuf,
}

/// Enumerates the files of one or more collection directories.
///
/// Collections are visited in the order they were added; inside a
/// collection, files are visited sorted by file name, so two runs over an
/// unchanged tree see the same sequence. Only direct children are listed.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    collections: Vec<Collection>,
    extension: Option<&'static str>,
}

impl Locator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn collection(mut self, name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.collections.push(Collection {
            name: name.into(),
            dir: dir.into(),
        });
        self
    }

    /// Only list files with this extension (case-insensitive).
    #[must_use]
    pub fn extension(mut self, extension: &'static str) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Check that a single-file corpus input exists.
    pub fn single_file(entity: &'static str, path: &Path) -> Result<SourceUnit> {
        if !path.is_file() {
            return Err(Error::not_found(entity, path));
        }
        Ok(SourceUnit::new(path.to_path_buf(), entity))
    }

    fn matches_extension(path: &Path, extension: Option<&str>) -> bool {
        match extension {
            None => true,
            Some(wanted) => path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted)),
        }
    }

    /// Lazily list every unit. All collection directories are checked
    /// before the first unit is produced.
    pub fn units(&self) -> Result<impl Iterator<Item = SourceUnit>> {
        for collection in &self.collections {
            if !collection.dir.is_dir() {
                return Err(Error::not_found("corpus directory", &collection.dir));
            }
        }

        let extension = self.extension;
        let collections = self.collections.clone();

        Ok(collections.into_iter().flat_map(move |Collection { name, dir }| {
            log::debug!("Listing {}", dir.display());
            WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("Skipping unreadable entry: {}", e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file())
                .filter(move |entry| Self::matches_extension(entry.path(), extension))
                .map(move |entry| SourceUnit::new(entry.into_path(), name.as_str()))
        }))
    }
}
