//! Path classification.
//!
//! Stateless predicates deciding what role a file path plays for a given
//! type: its root definition file, a folder-container definition file, or
//! a content-only definition. The checks run over explicit path segments
//! so the precedence rules stay auditable. A miss is `None`, never an
//! error; the caller either tries another role or looks elsewhere in the
//! tree.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::registry::TypeDefinition;

/// Filename suffix marking definition files.
pub const DEFINITION_FILE_SUFFIX: &str = "-definition.xml";

/// A classified definition file: the parsed base name, the file suffix
/// that matched (absent for folder-container files), and the path itself.
/// Ephemeral; input to name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionXml {
    pub full_name: String,
    pub suffix: Option<String>,
    pub path: PathBuf,
}

/// Normal (named) directory segments of a path, excluding the filename.
pub(crate) fn dir_segments(path: &Path) -> Vec<String> {
    let mut segments: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    segments.pop();
    segments
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Classify a path as a root or folder-container definition file for a
/// type, in that order of precedence.
pub fn classify(path: &Path, mdtype: &TypeDefinition) -> Option<DefinitionXml> {
    classify_as_root(path, mdtype).or_else(|| classify_as_folder(path, mdtype))
}

/// Root/self definition file: `<name>.<suffix>-definition.xml` for the
/// type's suffix. Strict-directory-name types additionally require the
/// instance's immediate parent directory to be named after the instance,
/// or the directory that holds the type's instances (one level higher for
/// in-folder types) to be the type's `directory_name`.
pub fn classify_as_root(path: &Path, mdtype: &TypeDefinition) -> Option<DefinitionXml> {
    let file = file_name(path)?;
    let stem = file.strip_suffix(DEFINITION_FILE_SUFFIX)?;
    let (name, suffix) = stem.rsplit_once('.')?;
    if name.is_empty() || suffix.is_empty() {
        return None;
    }
    if Some(suffix) != mdtype.suffix.as_deref() {
        return None;
    }
    if mdtype.strict_directory_name && !strict_directory_ok(path, name, mdtype) {
        debug!(
            path = %path.display(),
            type_id = %mdtype.id,
            "strict directory check failed, not a root definition"
        );
        return None;
    }
    Some(DefinitionXml {
        full_name: name.to_string(),
        suffix: Some(suffix.to_string()),
        path: path.to_path_buf(),
    })
}

fn strict_directory_ok(path: &Path, name: &str, mdtype: &TypeDefinition) -> bool {
    let dirs = dir_segments(path);
    let Some(parent) = dirs.last() else {
        return false;
    };
    // Self-named folder convention.
    if parent == name {
        return true;
    }
    // Otherwise the segment holding the type's instances must be the
    // conventional directory name; one level higher for in-folder types.
    let container_index = if mdtype.in_folder {
        dirs.len().checked_sub(2)
    } else {
        dirs.len().checked_sub(1)
    };
    container_index
        .and_then(|i| dirs.get(i))
        .is_some_and(|segment| *segment == mdtype.directory_name)
}

/// Folder-container definition file: `<folderName>-definition.xml` where
/// the folder name contains no dot and the path has at least one
/// directory segment.
pub fn classify_as_folder(path: &Path, _mdtype: &TypeDefinition) -> Option<DefinitionXml> {
    let file = file_name(path)?;
    let folder = file.strip_suffix(DEFINITION_FILE_SUFFIX)?;
    if folder.is_empty() || folder.contains('.') {
        return None;
    }
    if dir_segments(path).is_empty() {
        return None;
    }
    Some(DefinitionXml {
        full_name: folder.to_string(),
        suffix: None,
        path: path.to_path_buf(),
    })
}

/// Content-only classification, for types that never separate metadata
/// from content.
///
/// In-folder types walk the path upward to the type's `directory_name` and
/// take everything between that segment and the filename as the folder
/// qualifier; the type must define a suffix. Other types require the
/// `directory_name` segment at the exact expected depth: the immediate
/// parent, or the grandparent for self-foldered nested containers (which
/// insert one per-instance sub-folder), and the filename extension must
/// equal the type's suffix.
pub fn classify_as_content(path: &Path, mdtype: &TypeDefinition) -> Option<DefinitionXml> {
    let file = file_name(path)?;
    let dirs = dir_segments(path);
    let suffix = mdtype.suffix.as_deref()?;

    if mdtype.in_folder {
        let index = dirs.iter().rposition(|s| *s == mdtype.directory_name)?;
        let between = &dirs[index + 1..];
        if between.is_empty() {
            return None;
        }
        let base = file.rsplit_once('.').map(|(b, _)| b).unwrap_or(file.as_str());
        if base.is_empty() {
            return None;
        }
        return Some(DefinitionXml {
            full_name: format!("{}/{}", between.join("/"), base),
            suffix: Some(suffix.to_string()),
            path: path.to_path_buf(),
        });
    }

    let index = dirs.iter().rposition(|s| *s == mdtype.directory_name)?;
    let expected = if mdtype.is_self_foldered() {
        dirs.len().checked_sub(2)?
    } else {
        dirs.len().checked_sub(1)?
    };
    if index != expected {
        debug!(
            path = %path.display(),
            type_id = %mdtype.id,
            index,
            expected,
            "directory segment at wrong depth, not content for this type"
        );
        return None;
    }
    let (base, extension) = file.rsplit_once('.')?;
    if base.is_empty() || extension != suffix {
        return None;
    }
    Some(DefinitionXml {
        full_name: base.to_string(),
        suffix: Some(suffix.to_string()),
        path: path.to_path_buf(),
    })
}
