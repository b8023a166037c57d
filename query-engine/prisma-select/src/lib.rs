//! Pruning of GraphQL selections into data-layer select arguments.
//!
//! A request is only ever narrowed: fields the schema does not declare are
//! dropped, excluded fields never make it through, and default fields are
//! added where the request did not ask for them.

mod aggregate;
mod error;
mod options;
mod prisma_select;
mod pruner;
mod resolve_tree;
mod selection;

pub use error::SelectError;
pub use options::{DefaultFields, EmptySelection, ExcludeFields, FieldMap, PrismaSelectOptions};
pub use prisma_select::{PrismaSelect, merge_deep};
pub use pruner::{prune, prune_root};
pub use resolve_tree::ResolveTree;
pub use selection::{RELATION_ARGUMENTS, Selected, SelectionNode};
