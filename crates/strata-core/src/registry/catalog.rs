//! Type catalog construction and validation.
//!
//! A `TypeCatalog` is loaded once (JSON, TOML, or the embedded default),
//! validated eagerly, and never mutated afterwards. All lookup tables are
//! derived at build time so queries stay allocation-free.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use tracing::warn;

use crate::error::CatalogError;

use super::schema::{CatalogDocument, TypeDefinition};

/// Builtin default catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Immutable table of type definitions plus derived lookup indexes.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    /// Top-level types in declaration order.
    types: Vec<TypeDefinition>,
    /// Type id -> position in `types`.
    by_id: HashMap<String, usize>,
    /// Normalized name/alias -> canonical type id. Alias entries are
    /// inserted after canonical entries, so an alias always wins over a
    /// same-named canonical id.
    name_lookup: HashMap<String, String>,
    /// Child type id -> owning parent type id.
    parent_of: HashMap<String, String>,
    /// Ids of types with `strict_directory_name`, in catalog order.
    strict: Vec<String>,
}

impl TypeCatalog {
    /// Build and validate a catalog from a list of type definitions.
    pub fn from_parts(types: Vec<TypeDefinition>) -> Result<Self, CatalogError> {
        let mut defects = Vec::new();

        let mut by_id = HashMap::new();
        for (index, def) in types.iter().enumerate() {
            if by_id.insert(def.id.clone(), index).is_some() {
                defects.push(CatalogError::DuplicateTypeId { id: def.id.clone() });
            }
        }

        // Child ids share the id namespace with top-level types and may
        // appear under at most one parent.
        let mut parent_of: HashMap<String, String> = HashMap::new();
        for def in &types {
            for child in def.children.values() {
                if by_id.contains_key(&child.id) {
                    defects.push(CatalogError::DuplicateTypeId {
                        id: child.id.clone(),
                    });
                }
                if let Some(first) = parent_of.get(&child.id) {
                    defects.push(CatalogError::DuplicateChild {
                        child: child.id.clone(),
                        first: first.clone(),
                        second: def.id.clone(),
                    });
                } else {
                    parent_of.insert(child.id.clone(), def.id.clone());
                }
            }
        }

        for def in &types {
            if let Some(folder_type) = &def.folder_type {
                if !by_id.contains_key(folder_type) {
                    defects.push(CatalogError::UnknownFolderType {
                        id: def.id.clone(),
                        folder_type: folder_type.clone(),
                    });
                }
            }
            if let Some(target) = &def.alias_for {
                match by_id.get(target).map(|&i| &types[i]) {
                    None => defects.push(CatalogError::DanglingAlias {
                        alias: def.id.clone(),
                    }),
                    Some(canonical) if canonical.is_alias_record() => {
                        defects.push(CatalogError::ChainedAlias {
                            alias: def.id.clone(),
                            target: target.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
            for alias in &def.aliases {
                if alias.trim().is_empty() {
                    defects.push(CatalogError::DanglingAlias {
                        alias: format!("{} (on {})", alias, def.id),
                    });
                }
            }
        }

        match defects.len() {
            0 => {}
            1 => return Err(defects.swap_remove(0)),
            _ => return Err(CatalogError::Invalid(defects)),
        }

        // Advisory only: a duplicated suffix degrades suffix inference but
        // does not make the catalog unusable.
        let mut seen_suffixes: HashMap<&str, &str> = HashMap::new();
        for def in types.iter().filter(|d| !d.is_alias_record()) {
            if let Some(suffix) = def.suffix.as_deref() {
                if let Some(other) = seen_suffixes.insert(suffix, &def.id) {
                    warn!(suffix, first = other, second = %def.id, "duplicate suffix in catalog");
                }
            }
        }

        let mut name_lookup = HashMap::new();
        // Canonical entries first.
        for def in types.iter().filter(|d| !d.is_alias_record()) {
            name_lookup.insert(def.id.to_lowercase(), def.id.clone());
            name_lookup.insert(def.name.trim().to_lowercase(), def.id.clone());
        }
        // Alias entries second so they win over same-named canonical ids.
        for def in &types {
            if let Some(target) = &def.alias_for {
                name_lookup.insert(def.id.to_lowercase(), target.clone());
                name_lookup.insert(def.name.trim().to_lowercase(), target.clone());
            }
            for alias in &def.aliases {
                let target = def.alias_for.clone().unwrap_or_else(|| def.id.clone());
                name_lookup.insert(alias.trim().to_lowercase(), target);
            }
        }

        let strict = types
            .iter()
            .filter(|d| d.strict_directory_name)
            .map(|d| d.id.clone())
            .collect();

        Ok(Self {
            types,
            by_id,
            name_lookup,
            parent_of,
            strict,
        })
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(input: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_json::from_str(input).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_parts(doc.types)
    }

    /// Parse and validate a catalog from TOML.
    pub fn from_toml(input: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            toml::from_str(input).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_parts(doc.types)
    }

    /// The catalog embedded in the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).expect("builtin catalog must be valid")
    }

    /// Top-level types in declaration order.
    pub fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// Direct id lookup over top-level types.
    pub fn type_by_id(&self, id: &str) -> Option<&TypeDefinition> {
        self.by_id.get(id).map(|&i| &self.types[i])
    }

    /// Resolve a normalized name through the alias-aware lookup table.
    pub fn canonical_id(&self, normalized: &str) -> Option<&str> {
        self.name_lookup.get(normalized).map(String::as_str)
    }

    /// Owning parent id for a child type id, if any.
    pub fn parent_id(&self, child_id: &str) -> Option<&str> {
        self.parent_of.get(child_id).map(String::as_str)
    }

    /// Ids of strict-directory-name types, in catalog order.
    pub fn strict_ids(&self) -> &[String] {
        &self.strict
    }
}

/// Load a catalog from a file, choosing the parser by extension.
///
/// `.toml` files go through the TOML front end; everything else is treated
/// as JSON.
pub fn load_catalog_file(path: &Path) -> anyhow::Result<TypeCatalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    let catalog = if path.extension().is_some_and(|ext| ext == "toml") {
        TypeCatalog::from_toml(&raw)
    } else {
        TypeCatalog::from_json(&raw)
    };
    catalog.with_context(|| format!("Invalid catalog file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = TypeCatalog::builtin();
        assert!(catalog.type_by_id("report").is_some());
        assert!(catalog.type_by_id("customobject").is_some());
    }

    #[test]
    fn duplicate_top_level_id_rejected() {
        let types = vec![
            TypeDefinition::new("script", "Script", "scripts"),
            TypeDefinition::new("script", "Script", "scripts"),
        ];
        let err = TypeCatalog::from_parts(types).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTypeId { id } if id == "script"));
    }

    #[test]
    fn child_id_colliding_with_top_level_rejected() {
        let mut parent = TypeDefinition::new("customobject", "CustomObject", "objects");
        parent.children.insert(
            "script".to_string(),
            TypeDefinition::new("script", "Script", "scripts"),
        );
        let types = vec![TypeDefinition::new("script", "Script", "scripts"), parent];
        assert!(TypeCatalog::from_parts(types).is_err());
    }

    #[test]
    fn unknown_folder_type_rejected() {
        let types = vec![TypeDefinition {
            folder_type: Some("nosuchfolder".to_string()),
            ..TypeDefinition::new("report", "Report", "reports")
        }];
        let err = TypeCatalog::from_parts(types).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownFolderType { .. }));
    }

    #[test]
    fn chained_alias_rejected() {
        let types = vec![
            TypeDefinition::new("document", "Document", "documents"),
            TypeDefinition {
                alias_for: Some("document".to_string()),
                ..TypeDefinition::new("file", "File", "files")
            },
            TypeDefinition {
                alias_for: Some("file".to_string()),
                ..TypeDefinition::new("attachment", "Attachment", "attachments")
            },
        ];
        let err = TypeCatalog::from_parts(types).unwrap_err();
        assert!(matches!(err, CatalogError::ChainedAlias { .. }));
    }

    #[test]
    fn multiple_defects_reported_together() {
        let types = vec![
            TypeDefinition::new("script", "Script", "scripts"),
            TypeDefinition::new("script", "Script", "scripts"),
            TypeDefinition {
                folder_type: Some("missing".to_string()),
                ..TypeDefinition::new("report", "Report", "reports")
            },
        ];
        let err = TypeCatalog::from_parts(types).unwrap_err();
        match err {
            CatalogError::Invalid(defects) => assert_eq!(defects.len(), 2),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn toml_front_end_parses_same_schema() {
        let toml_doc = r#"
            [[types]]
            id = "script"
            name = "Script"
            suffix = "cls"
            directoryName = "scripts"
        "#;
        let catalog = TypeCatalog::from_toml(toml_doc).unwrap();
        assert_eq!(
            catalog.type_by_id("script").unwrap().suffix.as_deref(),
            Some("cls")
        );
    }

    #[test]
    fn alias_entry_wins_over_canonical_name() {
        // "Report" is the display name of the first type but also an alias
        // of the second; the alias must win.
        let types = vec![
            TypeDefinition::new("report", "Report", "reports"),
            TypeDefinition {
                aliases: vec!["Report".to_string()],
                ..TypeDefinition::new("analytics", "Analytics", "analytics")
            },
        ];
        let catalog = TypeCatalog::from_parts(types).unwrap();
        assert_eq!(catalog.canonical_id("report"), Some("analytics"));
    }
}
