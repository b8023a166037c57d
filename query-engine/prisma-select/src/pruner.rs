//! Conversion of a resolve tree into a select argument restricted to what the
//! schema declares.

use crate::{
    EmptySelection, PrismaSelectOptions, ResolveTree, SelectError,
    selection::{SelectionNode, Selected, relation_arguments},
};
use dmmf::{OutputFieldKind, SchemaField, SchemaGraph, SchemaModel};

pub const UNDERSCORE_COUNT: &str = "_count";

/// GraphQL meta fields (`__typename`) are answered by the server, never by the
/// data layer.
const META_FIELD_PREFIX: &str = "__";

pub(crate) fn is_meta_field(name: &str) -> bool {
    name.starts_with(META_FIELD_PREFIX)
}

/// Prunes `tree` against the model named `model`.
///
/// An unknown model selects nothing: meta fields and introspection queries
/// legitimately have no backing model. Unknown fields are dropped unless the
/// options ask for strict checking.
#[tracing::instrument(skip_all, fields(model = %model))]
pub fn prune(
    graph: &SchemaGraph,
    tree: &ResolveTree,
    model: &str,
    options: &PrismaSelectOptions,
) -> Result<SelectionNode, SelectError> {
    match graph.resolve_model(model) {
        Some(model) => Pruner::new(graph, options).prune(tree, model),
        None => {
            tracing::debug!("no model backs this type, selecting nothing");
            Ok(SelectionNode::new())
        }
    }
}

/// Like [`prune`], for entry points that need a concrete root model. Falls
/// back to the configured fallback model, and fails without one.
pub fn prune_root(
    graph: &SchemaGraph,
    tree: &ResolveTree,
    model: &str,
    options: &PrismaSelectOptions,
) -> Result<SelectionNode, SelectError> {
    let root = graph.resolve_model(model).or_else(|| {
        options
            .fallback_model
            .as_deref()
            .and_then(|fallback| graph.resolve_model(fallback))
    });

    match root {
        Some(root) => prune(graph, tree, &root.id, options),
        None => Err(SelectError::invalid_root(model)),
    }
}

/// How a requested field relates to the model it is requested on.
enum Requested<'a> {
    /// A relation count, answered through `_count.select`.
    Count,
    Declared(&'a SchemaField),
    Unknown,
}

impl<'a> Requested<'a> {
    fn classify(name: &str, model: &'a SchemaModel) -> Self {
        match model.field(name) {
            Some(field) => Requested::Declared(field),
            None if name == UNDERSCORE_COUNT || OutputFieldKind::of_name(name) == OutputFieldKind::FindMany => {
                Requested::Count
            }
            None => Requested::Unknown,
        }
    }
}

pub(crate) struct Pruner<'a> {
    graph: &'a SchemaGraph,
    options: &'a PrismaSelectOptions,
}

impl<'a> Pruner<'a> {
    pub(crate) fn new(graph: &'a SchemaGraph, options: &'a PrismaSelectOptions) -> Self {
        Self { graph, options }
    }

    pub(crate) fn prune(&self, tree: &ResolveTree, model: &SchemaModel) -> Result<SelectionNode, SelectError> {
        let excluded = self.options.exclusions_for(&model.id, tree);
        let is_excluded = |name: &str| excluded.iter().any(|e| e == name);

        let mut node = SelectionNode::with_arguments(relation_arguments(&tree.args));

        for field in tree.fields() {
            let name = field.name.as_str();

            if is_meta_field(name) {
                continue;
            }

            if is_excluded(name) {
                tracing::trace!(model = %model.id, field = name, "field is excluded");
                continue;
            }

            match Requested::classify(name, model) {
                Requested::Count => {
                    if let Some(count) = self.count(field, model, &is_excluded)? {
                        node.insert(UNDERSCORE_COUNT, Selected::Nested(count));
                    }
                }
                Requested::Declared(declared) if declared.is_relation() && !field.is_leaf() => {
                    if let Some(nested) = self.relation(field, declared)? {
                        node.insert(name, Selected::Nested(nested));
                    }
                }
                Requested::Declared(_) => node.insert(name, Selected::Field),
                Requested::Unknown if self.options.strict => {
                    return Err(SelectError::unknown_field(&model.id, name));
                }
                Requested::Unknown => {
                    tracing::trace!(model = %model.id, field = name, "dropping field the model does not declare");
                }
            }
        }

        for (name, include) in self.options.defaults_for(&model.id, tree) {
            if !include || node.contains(&name) {
                continue;
            }

            if is_excluded(&name) {
                tracing::trace!(model = %model.id, field = %name, "default field is excluded");
                continue;
            }

            if model.field(&name).is_none() {
                tracing::trace!(model = %model.id, field = %name, "default field is not declared on the model");
                continue;
            }

            node.insert(name, Selected::Field);
        }

        if node.is_empty() && self.options.empty_selection == EmptySelection::PrimaryKey {
            if let Some(id) = model.id_field.as_deref().filter(|id| !is_excluded(id)) {
                node.insert(id, Selected::Field);
            }
        }

        Ok(node)
    }

    fn relation(&self, tree: &ResolveTree, field: &SchemaField) -> Result<Option<SelectionNode>, SelectError> {
        let Some(target) = self.graph.find_model(&field.field_type) else {
            tracing::trace!(field = %field.name, target = %field.field_type, "relation target is not a model");
            return Ok(None);
        };

        let nested = self.prune(tree, target)?;

        // A relation with nothing left to select is dropped altogether.
        Ok(Some(nested).filter(|nested| !nested.is_empty()))
    }

    /// Builds the `_count` selection: only list relations of the model are
    /// counted, never their records.
    fn count(
        &self,
        tree: &ResolveTree,
        model: &SchemaModel,
        is_excluded: &dyn Fn(&str) -> bool,
    ) -> Result<Option<SelectionNode>, SelectError> {
        let mut count = SelectionNode::new();

        for field in tree.fields().filter(|f| !is_meta_field(&f.name)) {
            let name = field.name.as_str();

            match model.field(name) {
                Some(declared) if declared.is_list_relation() && !is_excluded(name) => {
                    let arguments = relation_arguments(&field.args);

                    if arguments.is_empty() {
                        count.insert(name, Selected::Field);
                    } else {
                        count.insert(name, Selected::Arguments(arguments));
                    }
                }
                None if self.options.strict => return Err(SelectError::unknown_field(&model.id, name)),
                _ => {
                    tracing::trace!(model = %model.id, field = name, "only list relations can be counted");
                }
            }
        }

        Ok(Some(count).filter(|count| !count.is_empty()))
    }
}

/// The request as is, without consulting the schema.
pub(crate) fn unfiltered(tree: &ResolveTree) -> SelectionNode {
    let mut node = SelectionNode::with_arguments(relation_arguments(&tree.args));

    for field in tree.fields().filter(|f| !is_meta_field(&f.name)) {
        if field.is_leaf() {
            node.insert(field.name.as_str(), Selected::Field);
        } else {
            node.insert(field.name.as_str(), Selected::Nested(unfiltered(field)));
        }
    }

    node
}
