use crate::{AdminError, value::parse_float};
use serde_json::{Map, Value};

const LIST_OPERATORS: [&str; 2] = ["in", "notIn"];

/// Normalises the state of a column filter (`{ equals: "3", in: "1,2" }`)
/// into a `where` condition. `in`/`notIn` take comma separated values, and
/// numeric columns have their values parsed. Returns `None` when no operator
/// is set.
pub fn filter_value(input: &Map<String, Value>, numeric: bool) -> Result<Option<Value>, AdminError> {
    let mut filter = Map::new();

    for (operator, value) in input {
        if value.is_null() {
            continue;
        }

        let normalized = match value {
            Value::String(text) if LIST_OPERATORS.contains(&operator.as_str()) => {
                let items = text
                    .split(',')
                    .map(|item| item_value(operator, item, numeric))
                    .collect::<Result<Vec<_>, _>>()?;

                Value::Array(items)
            }
            Value::String(text) => item_value(operator, text, numeric)?,
            typed => typed.clone(),
        };

        filter.insert(operator.clone(), normalized);
    }

    Ok(Some(filter).filter(|filter| !filter.is_empty()).map(Value::Object))
}

fn item_value(operator: &str, text: &str, numeric: bool) -> Result<Value, AdminError> {
    if !numeric {
        return Ok(Value::String(text.to_owned()));
    }

    parse_float(text.trim()).ok_or_else(|| AdminError::invalid_number(operator, text))
}
