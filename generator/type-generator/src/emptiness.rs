use crate::{GeneratorConfig, input_type::select_input_type};
use dmmf::SchemaGraph;
use std::collections::HashSet;

/// Finds input types that cannot carry any value.
///
/// An input type is vacuous when none of its fields is usable. A field is
/// usable when its declared type is a scalar, an enum, a field reference or a
/// non-vacuous input object. Input objects already on the current traversal
/// path count as unusable, so `A { and: A }` is vacuous and the walk always
/// terminates. Input types the graph does not know are taken as usable.
pub struct EmptinessCheck<'a> {
    graph: &'a SchemaGraph,
    config: &'a GeneratorConfig,
    /// Types known to have a usable field. Only positive answers are cached:
    /// a negative one may depend on the path it was reached through.
    usable: HashSet<&'a str>,
}

impl<'a> EmptinessCheck<'a> {
    pub fn new(graph: &'a SchemaGraph, config: &'a GeneratorConfig) -> Self {
        Self {
            graph,
            config,
            usable: HashSet::new(),
        }
    }

    pub fn is_vacuous(&mut self, type_name: &'a str) -> bool {
        let mut path = Vec::new();
        !self.has_usable_field(type_name, &mut path)
    }

    fn has_usable_field(&mut self, type_name: &'a str, path: &mut Vec<&'a str>) -> bool {
        if self.usable.contains(type_name) {
            return true;
        }

        if path.contains(&type_name) {
            return false;
        }

        let graph = self.graph;
        let Some(input) = graph.find_input_type(type_name) else {
            return true;
        };

        path.push(type_name);

        let mut usable = false;

        for field in &input.fields {
            usable = match select_input_type(field, self.config) {
                Some(t) if t.is_input_object() => self.has_usable_field(&t.name, path),
                Some(_) => true,
                None => false,
            };

            if usable {
                break;
            }
        }

        path.pop();

        if usable {
            self.usable.insert(type_name);
        }

        usable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn input(name: &str, fields: Value) -> Value {
        json!({ "name": name, "fields": fields })
    }

    fn object_field(name: &str, typ: &str) -> Value {
        json!({
            "name": name,
            "isRequired": false,
            "isNullable": false,
            "inputTypes": [{ "type": typ, "namespace": "prisma", "location": "inputObjectTypes", "isList": false }]
        })
    }

    fn scalar_field(name: &str) -> Value {
        json!({
            "name": name,
            "isRequired": false,
            "isNullable": false,
            "inputTypes": [{ "type": "Int", "location": "scalar", "isList": false }]
        })
    }

    fn graph(inputs: Vec<Value>) -> SchemaGraph {
        let document = json!({
            "datamodel": { "enums": [], "models": [] },
            "schema": {
                "inputObjectTypes": { "prisma": inputs },
                "outputObjectTypes": { "prisma": [] },
                "enumTypes": { "prisma": [] }
            }
        });

        SchemaGraph::load(&document.to_string()).unwrap()
    }

    #[test]
    fn self_reference_alone_is_vacuous() {
        let graph = graph(vec![input("A", json!([object_field("and", "A")]))]);
        let config = GeneratorConfig::default();

        assert!(EmptinessCheck::new(&graph, &config).is_vacuous("A"));
    }

    #[test]
    fn mutual_references_terminate() {
        let graph = graph(vec![
            input("A", json!([object_field("b", "B")])),
            input("B", json!([object_field("a", "A")])),
        ]);
        let config = GeneratorConfig::default();
        let mut check = EmptinessCheck::new(&graph, &config);

        assert!(check.is_vacuous("A"));
        assert!(check.is_vacuous("B"));
    }

    #[test]
    fn a_scalar_anywhere_on_the_cycle_makes_it_usable() {
        let graph = graph(vec![
            input("A", json!([object_field("b", "B")])),
            input("B", json!([object_field("a", "A"), scalar_field("id")])),
        ]);
        let config = GeneratorConfig::default();
        let mut check = EmptinessCheck::new(&graph, &config);

        assert!(!check.is_vacuous("A"));
        assert!(!check.is_vacuous("B"));
    }

    #[test]
    fn fieldless_types_and_wrappers_of_them_are_vacuous() {
        let graph = graph(vec![
            input("Empty", json!([])),
            input("Wrapper", json!([object_field("inner", "Empty")])),
            input("Mixed", json!([object_field("inner", "Empty"), scalar_field("id")])),
        ]);
        let config = GeneratorConfig::default();
        let mut check = EmptinessCheck::new(&graph, &config);

        assert!(check.is_vacuous("Empty"));
        assert!(check.is_vacuous("Wrapper"));
        assert!(!check.is_vacuous("Mixed"));
        assert!(!check.is_vacuous("DeclaredElsewhere"));
    }
}
