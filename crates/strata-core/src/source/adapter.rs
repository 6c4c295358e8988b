//! Source adapter: orchestrates classification, ignore filtering, name
//! resolution, and the type-specific population step.
//!
//! One population strategy exists per layout family. Selection is a plain
//! mapping from type metadata; there is no adapter hierarchy.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::fs::TreeContainer;
use crate::ignore::IgnoreFilter;
use crate::registry::{TypeDefinition, TypeRegistry};

use super::classifier::{
    DEFINITION_FILE_SUFFIX, DefinitionXml, classify_as_content, classify_as_folder,
    classify_as_root,
};
use super::component::SourceComponent;
use super::name::resolve_name;

/// Type-specific population step for one layout family.
///
/// `locate_root_definition` finds the definition file belonging to a
/// trigger path that is not itself a definition file. `populate` attaches
/// content files and/or child components onto a resolved skeleton.
pub trait PopulationStrategy {
    /// Whether this family separates metadata from content into two files.
    /// When `false`, classification routes through the content-only rules.
    fn allow_metadata_with_content(&self) -> bool {
        true
    }

    fn locate_root_definition(
        &self,
        tree: &dyn TreeContainer,
        mdtype: &TypeDefinition,
        trigger: &Path,
    ) -> Option<PathBuf>;

    fn populate(
        &self,
        tree: &dyn TreeContainer,
        registry: &TypeRegistry<'_>,
        ignore: &dyn IgnoreFilter,
        component: SourceComponent,
        trigger: &Path,
    ) -> Result<Option<SourceComponent>>;
}

/// Classify a trigger as a definition file belonging to this type: a root
/// definition, or a folder-container file when the type is itself a folder
/// kind. Folder-container files under a non-folder type are someone else's
/// metadata, not a match.
fn classify_own_definition(path: &Path, mdtype: &TypeDefinition) -> Option<DefinitionXml> {
    classify_as_root(path, mdtype).or_else(|| {
        if mdtype.folder_content_type.is_some() {
            classify_as_folder(path, mdtype)
        } else {
            None
        }
    })
}

/// Pick the population strategy for a type from its metadata.
pub fn strategy_for(mdtype: &TypeDefinition) -> Box<dyn PopulationStrategy> {
    if mdtype.in_folder {
        Box::new(FolderedStrategy)
    } else if mdtype.has_children() {
        Box::new(NestedStrategy)
    } else if mdtype.is_self_foldered() {
        Box::new(ContentOnlyStrategy)
    } else {
        Box::new(DefaultStrategy)
    }
}

/// Resolves candidate paths into components for a single type.
pub struct SourceAdapter<'a> {
    registry: TypeRegistry<'a>,
    mdtype: &'a TypeDefinition,
    tree: &'a dyn TreeContainer,
    ignore: &'a dyn IgnoreFilter,
    strategy: Box<dyn PopulationStrategy>,
}

impl<'a> SourceAdapter<'a> {
    /// Create an adapter with the strategy mapped from the type metadata.
    pub fn new(
        registry: TypeRegistry<'a>,
        mdtype: &'a TypeDefinition,
        tree: &'a dyn TreeContainer,
        ignore: &'a dyn IgnoreFilter,
    ) -> Self {
        Self::with_strategy(registry, mdtype, tree, ignore, strategy_for(mdtype))
    }

    /// Create an adapter with an explicit strategy, e.g. to opt a type out
    /// of metadata/content splitting.
    pub fn with_strategy(
        registry: TypeRegistry<'a>,
        mdtype: &'a TypeDefinition,
        tree: &'a dyn TreeContainer,
        ignore: &'a dyn IgnoreFilter,
        strategy: Box<dyn PopulationStrategy>,
    ) -> Self {
        Self {
            registry,
            mdtype,
            tree,
            ignore,
            strategy,
        }
    }

    /// Resolve a candidate path into a component.
    ///
    /// `Ok(None)` means the path does not belong to this type; that is a
    /// normal negative result.
    pub fn resolve(&self, trigger: &Path) -> Result<Option<SourceComponent>> {
        let definition = if self.strategy.allow_metadata_with_content() {
            match classify_own_definition(trigger, self.mdtype) {
                Some(def) => Some(def),
                None => self
                    .strategy
                    .locate_root_definition(self.tree, self.mdtype, trigger)
                    .and_then(|path| classify_own_definition(&path, self.mdtype)),
            }
        } else {
            classify_as_content(trigger, self.mdtype)
        };

        let Some(definition) = definition else {
            debug!(
                trigger = %trigger.display(),
                type_id = %self.mdtype.id,
                "no definition file found for trigger"
            );
            return Ok(None);
        };

        if self.ignore.denies(&definition.path) {
            return Err(ResolveError::IgnoredRequiredDefinition {
                definition: definition.path,
                trigger: trigger.to_path_buf(),
            });
        }

        let name = resolve_name(&definition, self.mdtype, &self.registry)?;
        let parent_type = match self.mdtype.folder_type.as_deref() {
            Some(folder_type) => Some(self.registry.get_type_by_name(folder_type)?.clone()),
            None => None,
        };

        debug!(
            name = %name,
            type_id = %self.mdtype.id,
            definition = %definition.path.display(),
            "resolved component skeleton"
        );

        let mut skeleton =
            SourceComponent::new(name, self.mdtype.clone(), definition.path.clone());
        skeleton.parent_type = parent_type;

        self.strategy
            .populate(self.tree, &self.registry, self.ignore, skeleton, trigger)
    }
}

/// Sibling definition file for a content trigger: the trigger's filename
/// with the definition suffix appended.
fn sibling_definition(tree: &dyn TreeContainer, trigger: &Path) -> Option<PathBuf> {
    let file = trigger.file_name()?.to_string_lossy();
    if file.ends_with(DEFINITION_FILE_SUFFIX) {
        return Some(trigger.to_path_buf());
    }
    let candidate = trigger.with_file_name(format!("{file}{DEFINITION_FILE_SUFFIX}"));
    tree.exists(&candidate).then_some(candidate)
}

/// Plain types: one definition file, optional sibling content file with
/// the definition suffix stripped.
pub struct DefaultStrategy;

impl PopulationStrategy for DefaultStrategy {
    fn locate_root_definition(
        &self,
        tree: &dyn TreeContainer,
        _mdtype: &TypeDefinition,
        trigger: &Path,
    ) -> Option<PathBuf> {
        sibling_definition(tree, trigger)
    }

    fn populate(
        &self,
        tree: &dyn TreeContainer,
        _registry: &TypeRegistry<'_>,
        _ignore: &dyn IgnoreFilter,
        mut component: SourceComponent,
        _trigger: &Path,
    ) -> Result<Option<SourceComponent>> {
        let file = component.definition_path.file_name().map(|n| n.to_string_lossy().into_owned());
        if let Some(file) = file {
            if let Some(stripped) = file.strip_suffix(DEFINITION_FILE_SUFFIX) {
                // Only content-bearing names carry the type suffix.
                if stripped.contains('.') {
                    let candidate = component.definition_path.with_file_name(stripped);
                    if tree.exists(&candidate) {
                        component.content_path = Some(candidate);
                    }
                }
            }
        }
        Ok(Some(component))
    }
}

/// In-folder types: the content file may have an arbitrary extension, so
/// populate scans the definition's directory for a sibling sharing the
/// component's base name.
pub struct FolderedStrategy;

impl PopulationStrategy for FolderedStrategy {
    /// In-folder content files carry arbitrary extensions; the sibling
    /// definition is `<stem>.<suffix>-definition.xml`.
    fn locate_root_definition(
        &self,
        tree: &dyn TreeContainer,
        mdtype: &TypeDefinition,
        trigger: &Path,
    ) -> Option<PathBuf> {
        let file = trigger.file_name()?.to_string_lossy();
        if file.ends_with(DEFINITION_FILE_SUFFIX) {
            return Some(trigger.to_path_buf());
        }
        let suffix = mdtype.suffix.as_deref()?;
        let stem = file.rsplit_once('.').map(|(s, _)| s).unwrap_or(file.as_ref());
        let candidate = trigger.with_file_name(format!("{stem}.{suffix}{DEFINITION_FILE_SUFFIX}"));
        tree.exists(&candidate).then_some(candidate)
    }

    fn populate(
        &self,
        tree: &dyn TreeContainer,
        _registry: &TypeRegistry<'_>,
        _ignore: &dyn IgnoreFilter,
        mut component: SourceComponent,
        _trigger: &Path,
    ) -> Result<Option<SourceComponent>> {
        let Some(parent) = component.definition_path.parent() else {
            return Ok(Some(component));
        };
        let base = component
            .name
            .rsplit('/')
            .next()
            .unwrap_or(component.name.as_str())
            .to_string();
        for entry in tree.list_children(parent)? {
            if entry == component.definition_path {
                continue;
            }
            let Some(file) = entry.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if file.ends_with(DEFINITION_FILE_SUFFIX) {
                continue;
            }
            let stem = file.rsplit_once('.').map(|(s, _)| s).unwrap_or(file.as_str());
            if stem == base {
                component.content_path = Some(entry);
                break;
            }
        }
        Ok(Some(component))
    }
}

/// Types with nested children: populate scans the instance's child
/// directories and attaches one child component per child definition file.
pub struct NestedStrategy;

impl PopulationStrategy for NestedStrategy {
    fn locate_root_definition(
        &self,
        tree: &dyn TreeContainer,
        _mdtype: &TypeDefinition,
        trigger: &Path,
    ) -> Option<PathBuf> {
        sibling_definition(tree, trigger)
    }

    fn populate(
        &self,
        tree: &dyn TreeContainer,
        registry: &TypeRegistry<'_>,
        ignore: &dyn IgnoreFilter,
        mut component: SourceComponent,
        _trigger: &Path,
    ) -> Result<Option<SourceComponent>> {
        let Some(instance_dir) = component.definition_path.parent().map(Path::to_path_buf) else {
            return Ok(Some(component));
        };
        let child_types: Vec<TypeDefinition> =
            component.mdtype.children.values().cloned().collect();
        for child_type in &child_types {
            let child_dir = instance_dir.join(&child_type.directory_name);
            if !tree.exists(&child_dir) {
                continue;
            }
            for entry in tree.list_children(&child_dir)? {
                let Some(def) = classify_as_root(&entry, child_type) else {
                    continue;
                };
                // The ignore filter applies to every definition file,
                // child definitions included.
                if ignore.denies(&def.path) {
                    debug!(
                        definition = %def.path.display(),
                        type_id = %child_type.id,
                        "child definition excluded by ignore rules"
                    );
                    continue;
                }
                let name = resolve_name(&def, child_type, registry)?;
                let mut child = SourceComponent::new(name, child_type.clone(), def.path);
                child.parent_type = Some(component.mdtype.clone());
                component.children.push(child);
            }
        }
        Ok(Some(component))
    }
}

/// Types that never split metadata from content: the definition file is
/// the content file.
pub struct ContentOnlyStrategy;

impl PopulationStrategy for ContentOnlyStrategy {
    fn allow_metadata_with_content(&self) -> bool {
        false
    }

    fn locate_root_definition(
        &self,
        _tree: &dyn TreeContainer,
        _mdtype: &TypeDefinition,
        _trigger: &Path,
    ) -> Option<PathBuf> {
        // Content-only types have no separate definition file to locate;
        // classification handles the trigger directly.
        None
    }

    fn populate(
        &self,
        _tree: &dyn TreeContainer,
        _registry: &TypeRegistry<'_>,
        _ignore: &dyn IgnoreFilter,
        mut component: SourceComponent,
        _trigger: &Path,
    ) -> Result<Option<SourceComponent>> {
        component.content_path = Some(component.definition_path.clone());
        Ok(Some(component))
    }
}
