//! Error types for catalog loading and source resolution.
//!
//! "Not found" is never an error here: classification misses and advisory
//! lookups return `Option`. The enums below cover the conditions a caller
//! must actually handle or surface.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while resolving a path into a component.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A type name or alias has no catalog entry.
    /// Carries the normalized (trimmed, lowercased) name that was looked up.
    #[error("missing metadata type definition: {name}")]
    MissingTypeDefinition { name: String },

    /// A required definition file is hidden by the ignore filter.
    #[error(
        "definition file {} for {} is excluded by ignore rules",
        definition.display(),
        trigger.display()
    )]
    IgnoredRequiredDefinition {
        definition: PathBuf,
        trigger: PathBuf,
    },

    /// A folder-qualified name could not be parsed from a classified path.
    #[error("cannot derive a qualified name for {} as {type_id}", path.display())]
    CantDeriveFullName { path: PathBuf, type_id: String },

    /// The static type catalog itself is invalid. Fatal, not per-path.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// I/O failure from the tree abstraction.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    /// Creates a `MissingTypeDefinition` from an already-normalized name.
    pub fn missing_type(name: impl Into<String>) -> Self {
        ResolveError::MissingTypeDefinition { name: name.into() }
    }

    /// Creates an `Io` error tagged with the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResolveError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Defects found while building or validating a type catalog.
///
/// These indicate a catalog authoring problem, not a runtime condition;
/// construction fails outright when any are present.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate type id in catalog: {id}")]
    DuplicateTypeId { id: String },

    #[error("type {id} references unknown folder type {folder_type}")]
    UnknownFolderType { id: String, folder_type: String },

    #[error("child type {child} is declared under both {first} and {second}")]
    DuplicateChild {
        child: String,
        first: String,
        second: String,
    },

    #[error("alias {alias} does not resolve to a catalog type")]
    DanglingAlias { alias: String },

    #[error("alias {alias} points at another alias record {target}")]
    ChainedAlias { alias: String, target: String },

    /// Inconsistent folder-type chain discovered during name resolution.
    #[error("type {type_id} has an inconsistent folder type chain (at {})", path.display())]
    InconsistentFolderChain { type_id: String, path: PathBuf },

    #[error("failed to parse catalog: {0}")]
    Parse(String),

    /// Several defects reported together so catalog authors see all of them.
    #[error("invalid catalog:\n{}", join_defects(.0))]
    Invalid(Vec<CatalogError>),
}

fn join_defects(defects: &[CatalogError]) -> String {
    defects
        .iter()
        .map(|defect| format!("  - {defect}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convenience alias for resolution results.
pub type Result<T> = std::result::Result<T, ResolveError>;
