//! Source resolution for metadata components.
//!
//! Maps candidate file paths into resolved components. The pipeline is:
//! - classification: which role does the path play for a type
//!   (root definition, folder container, content-only definition)
//! - name resolution: canonical qualified name from the classified path
//! - adaptation: ignore filtering, skeleton construction, and the
//!   type-specific population step

pub mod adapter;
pub mod classifier;
pub mod component;
pub mod name;

pub use adapter::{
    ContentOnlyStrategy, DefaultStrategy, FolderedStrategy, NestedStrategy, PopulationStrategy,
    SourceAdapter, strategy_for,
};
pub use classifier::{
    DEFINITION_FILE_SUFFIX, DefinitionXml, classify, classify_as_content, classify_as_folder,
    classify_as_root,
};
pub use component::SourceComponent;
pub use name::resolve_name;
