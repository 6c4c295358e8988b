//! Strata Core Library
//!
//! Maps an on-disk directory tree, laid out by a packaging convention,
//! into strongly-typed, validated component records. The two halves are
//! the metadata type registry (catalog + query layer) and the source
//! resolution engine (path classification, name resolution, and the
//! adapter that produces resolved components).

pub mod error;
pub mod fs;
pub mod ignore;
pub mod registry;
pub mod source;

/// Re-exports of commonly used types
pub mod prelude {
    // Errors
    pub use crate::error::{CatalogError, ResolveError, Result};

    // Registry
    pub use crate::registry::{TypeCatalog, TypeDefinition, TypeRegistry, load_catalog_file};

    // Source resolution
    pub use crate::source::{
        DefinitionXml, PopulationStrategy, SourceAdapter, SourceComponent, classify, resolve_name,
        strategy_for,
    };

    // Filesystem
    pub use crate::fs::{LocalTree, TreeContainer, VirtualTree};

    // Ignore filtering
    pub use crate::ignore::{IgnoreFilter, NoIgnore, PatternIgnore};
}
