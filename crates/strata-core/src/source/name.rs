//! Qualified name resolution.
//!
//! Turns a classified definition file into the component's canonical
//! qualified name using the type's nesting rules. Nested naming is
//! implemented for one and two levels of nesting; deeper folder-type
//! chains are not extrapolated.

use tracing::debug;

use crate::error::{CatalogError, ResolveError, Result};
use crate::registry::{TypeDefinition, TypeRegistry};

use super::classifier::{DefinitionXml, dir_segments};

/// Compute the canonical qualified name for a classified definition file.
pub fn resolve_name(
    definition: &DefinitionXml,
    mdtype: &TypeDefinition,
    registry: &TypeRegistry<'_>,
) -> Result<String> {
    let base = definition.full_name.as_str();

    if mdtype.in_folder || mdtype.folder_content_type.is_some() {
        // Content-only classification already folder-qualifies the name.
        if base.contains('/') {
            return Ok(base.to_string());
        }
        return folder_qualified(definition, mdtype, base);
    }

    let Some(folder_type) = mdtype.folder_type.as_deref() else {
        return Ok(base.to_string());
    };

    let grandparent = registry.get_type_by_name(folder_type)?;
    match grandparent.folder_type.as_deref() {
        // Top of a nested hierarchy: the instance folder carries the name.
        Some(ft) if ft == mdtype.id => Ok(base.to_string()),
        // Two-level nesting: qualify with the instance segment right after
        // the grandparent's directory.
        Some(_) => {
            let dirs = dir_segments(&definition.path);
            let owner = dirs
                .iter()
                .rposition(|s| *s == grandparent.directory_name)
                .and_then(|i| dirs.get(i + 1))
                .ok_or_else(|| ResolveError::CantDeriveFullName {
                    path: definition.path.clone(),
                    type_id: mdtype.id.clone(),
                })?;
            Ok(format!("{owner}.{base}"))
        }
        // The catalog names a folder type that is neither this type's
        // container nor a nested container. Authoring defect, fatal.
        None => {
            debug!(
                type_id = %mdtype.id,
                grandparent = %grandparent.id,
                "folder type chain is inconsistent"
            );
            Err(ResolveError::Catalog(CatalogError::InconsistentFolderChain {
                type_id: mdtype.id.clone(),
                path: definition.path.clone(),
            }))
        }
    }
}

fn folder_qualified(
    definition: &DefinitionXml,
    mdtype: &TypeDefinition,
    base: &str,
) -> Result<String> {
    let dirs = dir_segments(&definition.path);
    let index = dirs
        .iter()
        .rposition(|s| *s == mdtype.directory_name)
        .ok_or_else(|| ResolveError::CantDeriveFullName {
            path: definition.path.clone(),
            type_id: mdtype.id.clone(),
        })?;
    let between = &dirs[index + 1..];
    if between.is_empty() {
        // In-folder instances always live inside a folder. Folder-content
        // types themselves may sit at the top level with no qualifier.
        if mdtype.in_folder {
            return Err(ResolveError::CantDeriveFullName {
                path: definition.path.clone(),
                type_id: mdtype.id.clone(),
            });
        }
        return Ok(base.to_string());
    }
    Ok(format!("{}/{}", between.join("/"), base))
}
