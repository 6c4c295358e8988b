//! Type catalog schema
//!
//! One `TypeDefinition` per logical metadata kind, deserialized from the
//! catalog file (JSON or TOML) with camelCase field names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single metadata type definition from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Stable lowercase identifier, unique across the catalog.
    pub id: String,

    /// Display name; usable as a case-insensitive lookup alias.
    pub name: String,

    /// File-extension string identifying content-bearing files of this kind.
    #[serde(default)]
    pub suffix: Option<String>,

    /// Conventional folder name under which instances live.
    pub directory_name: String,

    /// Instances are grouped under named sub-folders (e.g., report folders).
    #[serde(default)]
    pub in_folder: bool,

    /// Id of another type acting as this type's folder/container type.
    #[serde(default)]
    pub folder_type: Option<String>,

    /// Id of the type this one contains as folder content. Marks this type
    /// as a folder kind, distinct from `in_folder`.
    #[serde(default)]
    pub folder_content_type: Option<String>,

    /// An instance's immediate (or grandparent, if `in_folder`) directory
    /// must be named after the instance or after `directory_name`.
    #[serde(default)]
    pub strict_directory_name: bool,

    /// Child types nested inside this one, keyed by child id.
    #[serde(default)]
    pub children: BTreeMap<String, TypeDefinition>,

    /// Alternate names resolving to this type.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// When set, this entry is itself an alias record layered over the
    /// referenced canonical type rather than a distinct kind.
    #[serde(default)]
    pub alias_for: Option<String>,
}

impl TypeDefinition {
    /// Create a minimal definition; optional fields via struct update syntax.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        directory_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            directory_name: directory_name.into(),
            ..Self::default()
        }
    }

    /// Check if this entry is an alias record over another type.
    pub fn is_alias_record(&self) -> bool {
        self.alias_for.is_some()
    }

    /// Check if this type declares nested child types.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this type is its own folder container (the top of a nested
    /// hierarchy, where instances each get a per-instance sub-folder).
    pub fn is_self_foldered(&self) -> bool {
        self.folder_type.as_deref() == Some(self.id.as_str())
    }

    /// Look up a child type by id or case-insensitive name.
    pub fn child_by_name(&self, normalized: &str) -> Option<&TypeDefinition> {
        if let Some(child) = self.children.get(normalized) {
            return Some(child);
        }
        self.children
            .values()
            .find(|child| child.name.to_lowercase() == normalized)
    }
}

/// On-disk catalog document: the type table in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub types: Vec<TypeDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"
        {
          "id": "report",
          "name": "Report",
          "suffix": "report",
          "directoryName": "reports",
          "inFolder": true,
          "folderType": "reportfolder"
        }
        "#;
        let def: TypeDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, "report");
        assert!(def.in_folder);
        assert_eq!(def.folder_type.as_deref(), Some("reportfolder"));
        assert!(!def.strict_directory_name);
        assert!(def.children.is_empty());
    }

    #[test]
    fn self_foldered_detection() {
        let def = TypeDefinition {
            folder_type: Some("territorymodel".to_string()),
            ..TypeDefinition::new("territorymodel", "TerritoryModel", "territories")
        };
        assert!(def.is_self_foldered());

        let other = TypeDefinition {
            folder_type: Some("reportfolder".to_string()),
            ..TypeDefinition::new("report", "Report", "reports")
        };
        assert!(!other.is_self_foldered());
    }

    #[test]
    fn child_lookup_by_id_and_name() {
        let mut parent = TypeDefinition::new("customobject", "CustomObject", "objects");
        parent.children.insert(
            "customfield".to_string(),
            TypeDefinition {
                suffix: Some("field".to_string()),
                ..TypeDefinition::new("customfield", "CustomField", "fields")
            },
        );

        assert!(parent.child_by_name("customfield").is_some());
        assert!(parent.child_by_name("customfield").unwrap().suffix.is_some());
        assert!(parent.child_by_name("nosuchchild").is_none());
    }
}
