use crate::{
    PrismaSelectOptions, ResolveTree, SelectError,
    aggregate::{aggregated_model, prune_aggregate},
    pruner::{prune, prune_root, unfiltered},
    selection::SelectionNode,
};
use dmmf::SchemaGraph;
use serde_json::{Map, Value};

/// Turns the resolve tree of one GraphQL field into the select argument of
/// the data layer call answering it.
///
/// ```ignore
/// let select = PrismaSelect::new(&graph, &tree, "[User!]!", options).value()?;
/// ```
pub struct PrismaSelect<'a> {
    graph: &'a SchemaGraph,
    tree: &'a ResolveTree,
    return_type: String,
    options: PrismaSelectOptions,
}

impl<'a> PrismaSelect<'a> {
    pub fn new(graph: &'a SchemaGraph, tree: &'a ResolveTree, return_type: &str, options: PrismaSelectOptions) -> Self {
        Self {
            graph,
            tree,
            return_type: normalize_return_type(return_type),
            options,
        }
    }

    /// The model name the root is pruned against, wrappers removed.
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn is_aggregate(&self) -> bool {
        aggregated_model(self.graph, &self.return_type).is_some()
    }

    /// The pruned selection of the whole request. Root arguments are carried
    /// on the root node.
    pub fn selection(&self) -> Result<SelectionNode, SelectError> {
        match aggregated_model(self.graph, &self.return_type) {
            Some(model) => Ok(prune_aggregate(self.tree, model, &self.options)),
            None => prune_root(self.graph, self.tree, &self.return_type, &self.options),
        }
    }

    /// `{ select: {...}, ...arguments }`, or the bare group map for aggregate
    /// and group-by roots.
    pub fn value(&self) -> Result<Value, SelectError> {
        let selection = self.selection()?;

        if self.is_aggregate() {
            Ok(selection.select_value())
        } else {
            Ok(selection.to_value())
        }
    }

    /// Prunes the whole request against `model` instead of the return type.
    pub fn value_with_filter(&self, model: &str) -> Result<Value, SelectError> {
        prune_root(self.graph, self.tree, model, &self.options).map(|node| node.to_value())
    }

    /// The select argument of a nested part of the request, e.g. `posts` or
    /// `edges.node`. Without `model` the request is taken as is. `merge` is
    /// deep-merged into the result. A path the request does not contain
    /// yields `{}`.
    pub fn value_of(&self, path: &str, model: Option<&str>, merge: Option<&Value>) -> Result<Value, SelectError> {
        let Some(tree) = self.tree.descend(path) else {
            tracing::trace!(path, "path is not part of the request");
            return Ok(Value::Object(Map::new()));
        };

        let mut value = match model {
            Some(model) => prune(self.graph, tree, model, &self.options)?.to_value(),
            None => unfiltered(tree).to_value(),
        };

        if let Some(merge) = merge {
            merge_deep(&mut value, merge);
        }

        Ok(value)
    }
}

/// `[User!]!` → `User`
fn normalize_return_type(return_type: &str) -> String {
    return_type.chars().filter(|c| !matches!(c, '[' | ']' | '!')).collect()
}

/// Objects merge key by key; anything else in `source` replaces `target`.
pub fn merge_deep(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => merge_deep(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}
