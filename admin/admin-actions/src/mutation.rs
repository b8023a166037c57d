//! `data` payloads and variables of the create, update and delete mutations
//! issued by record forms and tables.

use crate::{
    AdminError, AdminSettings,
    value::{ValueContext, value_by_type},
};
use dmmf::{SchemaField, SchemaGraph, SchemaModel};
use serde_json::{Map, Value, json};

/// A record as held by a form or a table row.
pub type Record = Map<String, Value>;

pub(crate) fn find_model<'a>(graph: &'a SchemaGraph, model: &str) -> Result<&'a SchemaModel, AdminError> {
    graph.find_model(model).ok_or_else(|| AdminError::unknown_model(model))
}

fn id_field(model: &SchemaModel) -> Result<&SchemaField, AdminError> {
    model.id_field().ok_or_else(|| AdminError::missing_id_field(&model.id))
}

/// The `data` of a create mutation. Relations connect to the selected record
/// by its id field, unset relations are left out.
#[tracing::instrument(skip(graph, form))]
pub fn create_data(graph: &SchemaGraph, model: &str, form: &Record) -> Result<Record, AdminError> {
    let model = find_model(graph, model)?;
    let mut data = Record::new();

    for (key, value) in form {
        let field = model.field(key);

        match field {
            Some(field) if field.is_relation() => {
                if !value.is_null() {
                    data.insert(key.clone(), connect(graph, field, value, ValueContext::Create)?);
                }
            }
            _ => {
                data.insert(key.clone(), value_by_type(value, field, ValueContext::Create)?);
            }
        }
    }

    Ok(data)
}

/// The `data` of an update mutation: the fields that changed between `old`
/// and `new` and may be updated. A relation pointing to another record is
/// connected, a cleared relation is disconnected. Scalars are wrapped in
/// `set` when the settings ask for it. `None` when nothing changed.
#[tracing::instrument(skip(graph, old, new, settings), fields(use_set = settings.use_set))]
pub fn update_data(
    graph: &SchemaGraph,
    model: &str,
    old: &Record,
    new: &Record,
    settings: &AdminSettings,
) -> Result<Option<Record>, AdminError> {
    let model = find_model(graph, model)?;
    let ctx = ValueContext::Update {
        use_set: settings.use_set,
    };
    let mut data = Record::new();

    for (key, value) in new {
        let Some(field) = model.field(key).filter(|f| f.update) else {
            tracing::trace!(field = %key, "field cannot be updated");
            continue;
        };

        let previous = old.get(key).unwrap_or(&Value::Null);

        if field.is_relation() {
            match (value.is_null(), previous.is_null()) {
                (false, true) => {
                    data.insert(key.clone(), connect(graph, field, value, ctx)?);
                }
                (false, false) => {
                    let target_id = id_field(find_model(graph, &field.field_type)?)?;

                    if value.get(&target_id.name) != previous.get(&target_id.name) {
                        data.insert(key.clone(), connect(graph, field, value, ctx)?);
                    }
                }
                (true, false) => {
                    data.insert(key.clone(), json!({ "disconnect": true }));
                }
                (true, true) => (),
            }
        } else if value != previous {
            data.insert(key.clone(), value_by_type(value, Some(field), ctx)?);
        }
    }

    Ok(Some(data).filter(|data| !data.is_empty()))
}

/// `{ connect: { <id field>: <id> } }` for the related record in `value`.
fn connect(graph: &SchemaGraph, field: &SchemaField, value: &Value, ctx: ValueContext) -> Result<Value, AdminError> {
    let target = find_model(graph, &field.field_type)?;
    let id = id_field(target)?;

    let raw = value.get(&id.name).unwrap_or(&Value::Null);

    // Ids are never wrapped in `set`.
    let ctx = match ctx {
        ValueContext::Update { .. } => ValueContext::Update { use_set: false },
        create => create,
    };

    let mut connect = Map::new();
    connect.insert(id.name.clone(), value_by_type(raw, Some(id), ctx)?);

    Ok(json!({ "connect": connect }))
}

/// `{ where: { <id field>: id } }`, as taken by delete and single record
/// queries.
pub fn delete_variables(graph: &SchemaGraph, model: &str, id: Value) -> Result<Value, AdminError> {
    let model = find_model(graph, model)?;
    let id_field = id_field(model)?;

    let mut filter = Map::new();
    filter.insert(id_field.name.clone(), id);

    Ok(json!({ "where": filter }))
}

/// The variables of an update mutation on `record`.
pub fn record_variables(graph: &SchemaGraph, model: &str, record: &Record, data: Record) -> Result<Value, AdminError> {
    let id = find_model(graph, model)
        .and_then(id_field)
        .map(|id_field| record.get(&id_field.name).cloned().unwrap_or(Value::Null))?;

    let mut variables = delete_variables(graph, model, id)?;

    if let Some(variables) = variables.as_object_mut() {
        variables.insert("data".to_owned(), Value::Object(data));
    }

    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_setup::BLOG_DMMF;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn create_connects_relations_by_id() {
        let graph = SchemaGraph::load(BLOG_DMMF).unwrap();
        let form = record(json!({
            "title": "Hello",
            "published": true,
            "tags": "a,b",
            "author": { "id": 3, "email": "a@b.c" },
            "comments": null
        }));

        let data = create_data(&graph, "Post", &form).unwrap();

        assert_eq!(
            Value::Object(data),
            json!({
                "title": "Hello",
                "published": true,
                "tags": ["a", "b"],
                "author": { "connect": { "id": 3 } }
            })
        );
    }

    #[test]
    fn unknown_models_are_reported() {
        let graph = SchemaGraph::load(BLOG_DMMF).unwrap();
        let err = create_data(&graph, "Invoice", &Record::new()).unwrap_err();

        assert_eq!(err.to_string(), "Model `Invoice` does not exist in the schema");
    }
}
