//! Resolved component records.

use std::path::PathBuf;

use crate::registry::TypeDefinition;

/// A fully resolved source component.
///
/// `name`, `mdtype`, and `definition_path` are guaranteed non-empty and
/// consistent: the file at `definition_path` classifies as a root or
/// folder definition for the type. Instances are owned by the caller and
/// share no state with each other or with the resolution engine.
#[derive(Debug, Clone)]
pub struct SourceComponent {
    /// Canonical qualified name.
    pub name: String,
    /// The component's metadata type.
    pub mdtype: TypeDefinition,
    /// Path of the definition file that classified this component.
    pub definition_path: PathBuf,
    /// The type's folder/container type, when it has one.
    pub parent_type: Option<TypeDefinition>,
    /// Content file attached by the population strategy, if any.
    pub content_path: Option<PathBuf>,
    /// Child components attached by the population strategy.
    pub children: Vec<SourceComponent>,
}

impl SourceComponent {
    /// Create a skeleton component with no content or children yet.
    pub fn new(
        name: impl Into<String>,
        mdtype: TypeDefinition,
        definition_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            mdtype,
            definition_path: definition_path.into(),
            parent_type: None,
            content_path: None,
            children: Vec::new(),
        }
    }

    /// The component's type id.
    pub fn type_id(&self) -> &str {
        &self.mdtype.id
    }

    /// Check whether this component has an attached content file.
    pub fn has_content(&self) -> bool {
        self.content_path.is_some()
    }
}
