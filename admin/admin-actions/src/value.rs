//! Coercion of raw form values into the values a mutation expects.

use crate::AdminError;
use dmmf::SchemaField;
use serde_json::{Map, Number, Value, json};

/// What the coerced value is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueContext {
    Create,
    /// Scalars are wrapped in `{ set: value }` when `use_set` is on.
    Update { use_set: bool },
}

/// Coerces a form value by the type of `field`.
///
/// Text is parsed according to the field: `Json` fields take JSON text
/// (empty text is an empty object, or an empty list for lists), list fields
/// take comma separated items, `Int` and `Float` fields take numbers.
/// Values already carrying a type, and values of unknown fields, pass through.
pub fn value_by_type(value: &Value, field: Option<&SchemaField>, ctx: ValueContext) -> Result<Value, AdminError> {
    let Some(field) = field else {
        return Ok(value.clone());
    };

    let text = match value {
        Value::String(text) => text.as_str(),
        Value::Null => "",
        typed => return Ok(wrap(typed.clone(), field, ctx)),
    };

    if field.field_type == "Json" {
        let parsed = match text {
            "" if field.list => json!([]),
            "" => json!({}),
            text => serde_json::from_str(text).map_err(|err| AdminError::invalid_json(&field.name, err))?,
        };

        return Ok(wrap(parsed, field, ctx));
    }

    if field.list {
        if text.is_empty() {
            return Ok(json!([]));
        }

        let items = text
            .split(',')
            .map(|item| scalar(item, field))
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(Value::Array(items));
    }

    Ok(wrap(scalar(text, field)?, field, ctx))
}

fn scalar(text: &str, field: &SchemaField) -> Result<Value, AdminError> {
    match field.field_type.as_str() {
        "Int" => parse_int(text.trim())
            .map(Value::from)
            .ok_or_else(|| AdminError::invalid_number(&field.name, text)),
        "Float" => parse_float(text.trim()).ok_or_else(|| AdminError::invalid_number(&field.name, text)),
        "Boolean" if field.list => Ok(Value::Bool(text == "true")),
        _ => Ok(Value::String(text.to_owned())),
    }
}

fn wrap(value: Value, field: &SchemaField, ctx: ValueContext) -> Value {
    match ctx {
        ValueContext::Update { use_set: true } if !field.list => {
            let mut set = Map::new();
            set.insert("set".to_owned(), value);
            Value::Object(set)
        }
        _ => value,
    }
}

pub(crate) fn parse_int(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Integers stay integers, everything else becomes a finite float.
pub(crate) fn parse_float(text: &str) -> Option<Value> {
    if let Some(int) = parse_int(text) {
        return Some(Value::from(int));
    }

    text.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmmf::SchemaGraph;
    use test_setup::BLOG_DMMF;

    fn coerce(model: &str, field: &str, value: Value, ctx: ValueContext) -> Result<Value, AdminError> {
        let graph = SchemaGraph::load(BLOG_DMMF).unwrap();
        value_by_type(&value, graph.find_field(model, field), ctx)
    }

    #[test]
    fn scalars_are_parsed_and_wrapped_for_updates() {
        let update = ValueContext::Update { use_set: true };

        assert_eq!(coerce("Post", "id", json!("42"), ValueContext::Create).unwrap(), json!(42));
        assert_eq!(coerce("Post", "title", json!("Hello"), update).unwrap(), json!({ "set": "Hello" }));
        assert_eq!(
            coerce("Post", "title", json!("Hello"), ValueContext::Update { use_set: false }).unwrap(),
            json!("Hello")
        );
        assert_eq!(coerce("Post", "published", json!(true), update).unwrap(), json!({ "set": true }));
    }

    #[test]
    fn lists_split_on_commas() {
        assert_eq!(
            coerce("Post", "tags", json!("rust,graphql"), ValueContext::Create).unwrap(),
            json!(["rust", "graphql"])
        );
        assert_eq!(coerce("Post", "tags", json!(""), ValueContext::Create).unwrap(), json!([]));
    }

    #[test]
    fn json_fields_parse_their_text() {
        assert_eq!(
            coerce("Post", "meta", json!(r#"{"draft":true}"#), ValueContext::Create).unwrap(),
            json!({ "draft": true })
        );
        assert_eq!(coerce("Post", "meta", Value::Null, ValueContext::Create).unwrap(), json!({}));

        let err = coerce("Post", "meta", json!("{draft"), ValueContext::Create).unwrap_err();
        assert!(matches!(err, AdminError::InvalidJson { ref field, .. } if field == "meta"));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = coerce("Post", "id", json!("forty-two"), ValueContext::Create).unwrap_err();

        assert_eq!(err.to_string(), "Field `id` expects a number, got `forty-two`");
    }

    #[test]
    fn unknown_fields_pass_through() {
        assert_eq!(
            coerce("Post", "nope", json!("7"), ValueContext::Update { use_set: true }).unwrap(),
            json!("7")
        );
    }

    #[test]
    fn floats_keep_integers_exact() {
        assert_eq!(parse_float("3"), Some(json!(3)));
        assert_eq!(parse_float("2.5"), Some(json!(2.5)));
        assert_eq!(parse_float("NaN"), None);
    }
}
