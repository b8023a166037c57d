//! Loading of DMMF documents into a [`SchemaGraph`].
//!
//! The graph is built once per process (or generation run) and is read-only
//! afterwards, so it can be shared across threads without locking.

pub mod classify;

mod error;
mod schema_graph;
mod serialization_ast;

#[cfg(test)]
mod tests;

pub use classify::{OperationKind, OutputFieldKind, OutputTypeKind, TypeClass};
pub use error::SchemaLoadError;
pub use schema_graph::*;
pub use serialization_ast::{DataModelMetaFormat, FieldKind, TypeLocation};
