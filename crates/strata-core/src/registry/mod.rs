//! Metadata type registry
//!
//! Declarative catalog of type definitions with alias, suffix, and
//! parent/child relationships, plus the query layer resolution runs against.

pub mod catalog;
pub mod query;
pub mod schema;

pub use catalog::{TypeCatalog, load_catalog_file};
pub use query::TypeRegistry;
pub use schema::{CatalogDocument, TypeDefinition};
