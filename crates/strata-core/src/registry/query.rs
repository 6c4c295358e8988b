//! Query layer over the type catalog.
//!
//! A `TypeRegistry` holds a shared reference to an immutable `TypeCatalog`
//! and answers name, alias, suffix, and parent lookups. It carries no state
//! of its own, so one instance per resolution session is the norm and
//! concurrent sessions can share the same catalog freely.

use tracing::trace;

use crate::error::{ResolveError, Result};

use super::catalog::TypeCatalog;
use super::schema::TypeDefinition;

/// Read-only query interface over a loaded catalog.
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistry<'c> {
    catalog: &'c TypeCatalog,
}

impl<'c> TypeRegistry<'c> {
    pub fn new(catalog: &'c TypeCatalog) -> Self {
        Self { catalog }
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &'c TypeCatalog {
        self.catalog
    }

    /// Resolve a type by name, alias, or id.
    ///
    /// Input is trimmed and case-folded. The alias map is consulted first
    /// (an alias always wins over a same-named canonical id), then direct id
    /// lookup, then child types across all parents. Fails with
    /// `MissingTypeDefinition` carrying the normalized name when nothing
    /// matches.
    pub fn get_type_by_name(&self, input: &str) -> Result<&'c TypeDefinition> {
        let normalized = input.trim().to_lowercase();
        trace!(input, normalized = %normalized, "type lookup by name");

        if let Some(id) = self.catalog.canonical_id(&normalized) {
            if let Some(def) = self.catalog.type_by_id(id) {
                return Ok(def);
            }
        }
        if let Some(def) = self.catalog.type_by_id(&normalized) {
            return Ok(def);
        }
        for parent in self.catalog.types() {
            if let Some(child) = parent.child_by_name(&normalized) {
                return Ok(child);
            }
        }

        Err(ResolveError::missing_type(normalized))
    }

    /// Advisory suffix lookup over top-level types. `None` means the suffix
    /// is simply not in the catalog; that is not an error.
    pub fn get_type_by_suffix(&self, suffix: &str) -> Option<&'c TypeDefinition> {
        self.catalog
            .types()
            .iter()
            .find(|def| def.suffix.as_deref() == Some(suffix))
    }

    /// First type satisfying `predicate`, scanning top-level types in
    /// catalog order and then every nested child type.
    ///
    /// Alias records are evaluated against their resolved canonical type,
    /// so a predicate matched through an alias returns the canonical type.
    pub fn find_type<P>(&self, mut predicate: P) -> Option<&'c TypeDefinition>
    where
        P: FnMut(&TypeDefinition) -> bool,
    {
        for def in self.catalog.types() {
            let target = self.resolve_alias(def);
            if predicate(target) {
                return Some(target);
            }
        }
        for parent in self.catalog.types() {
            for child in parent.children.values() {
                if predicate(child) {
                    return Some(child);
                }
            }
        }
        None
    }

    /// Every type marked `strict_directory_name`, in catalog order.
    pub fn get_strict_folder_types(&self) -> Vec<&'c TypeDefinition> {
        self.catalog
            .strict_ids()
            .iter()
            .filter_map(|id| self.catalog.type_by_id(id))
            .collect()
    }

    /// Every alias record in the catalog (entries layered over a canonical
    /// type rather than plain types themselves).
    pub fn get_alias_types(&self) -> Vec<&'c TypeDefinition> {
        self.catalog
            .types()
            .iter()
            .filter(|def| def.is_alias_record())
            .collect()
    }

    /// Every distinct folder-content type. An alias record layered over a
    /// folder-content type does not count as a second one.
    pub fn get_folder_content_types(&self) -> Vec<&'c TypeDefinition> {
        self.catalog
            .types()
            .iter()
            .filter(|def| def.folder_content_type.is_some() && !def.is_alias_record())
            .collect()
    }

    /// Owning parent of a child type id. `None` for top-level ids; that is
    /// a normal result, not an error.
    pub fn get_parent_type(&self, child_id: &str) -> Option<&'c TypeDefinition> {
        let parent_id = self.catalog.parent_id(child_id)?;
        self.catalog.type_by_id(parent_id)
    }

    fn resolve_alias(&self, def: &'c TypeDefinition) -> &'c TypeDefinition {
        match def.alias_for.as_deref() {
            // Validation guarantees the target exists and is not itself an
            // alias record.
            Some(target) => self.catalog.type_by_id(target).unwrap_or(def),
            None => def,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::catalog::TypeCatalog;

    fn builtin() -> TypeCatalog {
        TypeCatalog::builtin()
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let report = registry.get_type_by_name("  RePoRt  ").unwrap();
        assert_eq!(report.id, "report");
        assert_eq!(
            registry.get_type_by_name("CustomObject").unwrap().id,
            "customobject"
        );
    }

    #[test]
    fn alias_list_resolves_to_canonical_type() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let via_alias = registry.get_type_by_name("customentity").unwrap();
        assert_eq!(via_alias.id, "customobject");
    }

    #[test]
    fn alias_record_resolves_to_canonical_type() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let resolved = registry.get_type_by_name("EmailFolder").unwrap();
        assert_eq!(resolved.id, "documentfolder");
    }

    #[test]
    fn child_types_reachable_by_name() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let field = registry.get_type_by_name("customfield").unwrap();
        assert_eq!(field.suffix.as_deref(), Some("field"));
        let parent = registry.get_parent_type("customfield").unwrap();
        assert_eq!(parent.id, "customobject");
    }

    #[test]
    fn missing_type_carries_normalized_name() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let err = registry.get_type_by_name("  TypeWithoutDef ").unwrap_err();
        match err {
            ResolveError::MissingTypeDefinition { name } => {
                assert_eq!(name, "typewithoutdef");
            }
            other => panic!("expected MissingTypeDefinition, got {other:?}"),
        }
    }

    #[test]
    fn suffix_lookup_is_advisory() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        assert_eq!(registry.get_type_by_suffix("cls").unwrap().id, "script");
        assert!(registry.get_type_by_suffix("asdf").is_none());
    }

    #[test]
    fn find_type_returns_canonical_for_alias_records() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        // The alias record "emailfolder" resolves to documentfolder before
        // the predicate runs, so the match target is the canonical type.
        let found = registry
            .find_type(|def| def.folder_content_type.as_deref() == Some("document"))
            .unwrap();
        assert_eq!(found.id, "documentfolder");
    }

    #[test]
    fn find_type_reaches_children() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let found = registry
            .find_type(|def| def.suffix.as_deref() == Some("validationRule"))
            .unwrap();
        assert_eq!(found.id, "validationrule");
    }

    #[test]
    fn strict_folder_types_in_catalog_order() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let strict: Vec<&str> = registry
            .get_strict_folder_types()
            .iter()
            .map(|def| def.id.as_str())
            .collect();
        assert_eq!(strict, vec!["component", "document"]);
    }

    #[test]
    fn folder_content_types_exclude_alias_records() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let ids: Vec<&str> = registry
            .get_folder_content_types()
            .iter()
            .map(|def| def.id.as_str())
            .collect();
        assert_eq!(ids, vec!["reportfolder", "documentfolder"]);
        assert!(!ids.contains(&"emailfolder"));
    }

    #[test]
    fn alias_types_lists_alias_records_only() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        let ids: Vec<&str> = registry
            .get_alias_types()
            .iter()
            .map(|def| def.id.as_str())
            .collect();
        assert_eq!(ids, vec!["emailfolder"]);
    }

    #[test]
    fn top_level_types_have_no_parent() {
        let catalog = builtin();
        let registry = TypeRegistry::new(&catalog);

        for def in catalog.types() {
            assert!(registry.get_parent_type(&def.id).is_none());
        }
    }
}
