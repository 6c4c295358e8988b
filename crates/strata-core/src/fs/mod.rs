//! Tree abstraction over component sources.
//!
//! Resolution only ever needs three operations on a source tree, so they
//! live behind a small trait with a real-filesystem implementation and an
//! in-memory one for tests.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ResolveError, Result};

/// Minimal read-only view of a source tree.
pub trait TreeContainer {
    /// Check whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Immediate children of a directory, sorted by path so resolution is
    /// deterministic. Empty for paths that are not directories.
    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Read a file's contents.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Tree backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTree;

impl TreeContainer for LocalTree {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }
        let entries =
            std::fs::read_dir(path).map_err(|source| ResolveError::io(path, source))?;
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ResolveError::io(path, source))?;
            children.push(entry.path());
        }
        children.sort();
        Ok(children)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|source| ResolveError::io(path, source))
    }
}

/// In-memory tree for tests. Directories exist implicitly as prefixes of
/// the files added to the tree.
#[derive(Debug, Clone, Default)]
pub struct VirtualTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl VirtualTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with contents.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder-style variant of [`add_file`](Self::add_file) with empty
    /// contents, for trees where only layout matters.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_file(path, Vec::new());
        self
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

impl TreeContainer for VirtualTree {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut children = BTreeSet::new();
        for file in self.files.keys() {
            if let Ok(rest) = file.strip_prefix(path) {
                if let Some(first) = rest.components().next() {
                    children.insert(path.join(first));
                }
            }
        }
        Ok(children.into_iter().collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            ResolveError::io(path, io::Error::from(io::ErrorKind::NotFound))
        })
    }
}
