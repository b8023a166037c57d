//! Selections for `aggregate<Model>` and `groupBy<Model>` results. These take
//! their groups (`_count`, `_avg`, ...) at the top level rather than under
//! `select`.

use crate::{
    PrismaSelectOptions, ResolveTree,
    pruner::is_meta_field,
    selection::{SelectionNode, Selected},
};
use dmmf::{SchemaGraph, SchemaModel};

const ALL: &str = "_all";
const COUNT: &str = "_count";

/// The model summarised by `return_type`, if it is an aggregate or group-by
/// output type.
pub(crate) fn aggregated_model<'a>(graph: &'a SchemaGraph, return_type: &str) -> Option<&'a SchemaModel> {
    graph
        .find_output_type(return_type)
        .and_then(|output| output.kind.aggregated_model())
        .and_then(|model| graph.find_model(model))
}

#[tracing::instrument(skip_all, fields(model = %model.id))]
pub(crate) fn prune_aggregate(tree: &ResolveTree, model: &SchemaModel, options: &PrismaSelectOptions) -> SelectionNode {
    let excluded = options.exclusions_for(&model.id, tree);
    let selectable = |name: &str| model.field(name).is_some() && !excluded.iter().any(|e| e == name);

    let mut node = SelectionNode::new();

    for field in tree.fields() {
        let name = field.name.as_str();

        if is_meta_field(name) {
            continue;
        }

        if name.starts_with('_') {
            let mut group: Vec<String> = field
                .fields()
                .map(|f| f.name.as_str())
                .filter(|f| selectable(*f) || (name == COUNT && *f == ALL))
                .map(ToOwned::to_owned)
                .collect();

            group.dedup();

            if !group.is_empty() {
                node.insert(name, Selected::Group(group));
            }
        } else if selectable(name) {
            // Group-by keys come back as plain scalars.
            node.insert(name, Selected::Field);
        } else {
            tracing::trace!(field = name, "dropping field the model does not declare");
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_setup::BLOG_DMMF;

    #[test]
    fn aggregate_and_group_by_types_name_their_model() {
        let graph = SchemaGraph::load(BLOG_DMMF).unwrap();

        assert_eq!(aggregated_model(&graph, "AggregateUser").map(|m| m.id.as_str()), Some("User"));
        assert_eq!(
            aggregated_model(&graph, "UserGroupByOutputType").map(|m| m.id.as_str()),
            Some("User")
        );
        assert!(aggregated_model(&graph, "User").is_none());
        assert!(aggregated_model(&graph, "AggregateNothing").is_none());
    }

    #[test]
    fn groups_keep_declared_fields_and_count_all() {
        let graph = SchemaGraph::load(BLOG_DMMF).unwrap();
        let user = graph.find_model("User").unwrap();

        let tree = ResolveTree::new("aggregateUser").with_fields(
            "AggregateUser",
            [
                ResolveTree::new("_count").with_fields(
                    "UserCountAggregateOutputType",
                    [ResolveTree::new("id"), ResolveTree::new("_all"), ResolveTree::new("bogus")],
                ),
                ResolveTree::new("_avg").with_field("UserAvgAggregateOutputType", ResolveTree::new("_all")),
                ResolveTree::new("__typename"),
            ],
        );

        let node = prune_aggregate(&tree, user, &PrismaSelectOptions::default());

        assert_eq!(node.select_value(), json!({ "_count": { "id": true, "_all": true } }));
    }
}
