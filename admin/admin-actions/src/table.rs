//! Paging and row handling of model tables.

use crate::{AdminSettings, Record};
use dmmf::{SchemaField, SchemaModel, classify::FIND_MANY_PREFIX};
use serde::Serialize;
use serde_json::Value;

/// The `take`/`skip` window of a table query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub take: u32,
    pub skip: u32,
}

impl Page {
    pub fn first(settings: &AdminSettings) -> Self {
        Self {
            take: settings.page_size,
            skip: 0,
        }
    }

    /// Moves to page `index` of `size` rows. Returns whether the window
    /// changed, i.e. whether the table has to be fetched again.
    pub fn fetch_more(&mut self, size: u32, index: u32) -> bool {
        let next = Page {
            take: size,
            skip: size.saturating_mul(index),
        };

        if next == *self {
            return false;
        }

        *self = next;
        true
    }
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: u64, take: u32) -> u64 {
    match take {
        0 => 0,
        take => total.div_ceil(u64::from(take)),
    }
}

/// `findMany<Model>` and `findMany<Model>Count`, the queries backing a table.
pub fn table_queries(model: &SchemaModel) -> (String, String) {
    let find_many = format!("{FIND_MANY_PREFIX}{}", model.id);
    let count = format!("{find_many}Count");

    (find_many, count)
}

/// The rows of a table picking a related record: the currently connected
/// record comes first and is not repeated further down.
pub fn connected_rows(model: &SchemaModel, connected: Option<&Record>, rows: Vec<Record>) -> Vec<Record> {
    let connected = connected.filter(|record| !record.is_empty());

    let (Some(connected), Some(id_field)) = (connected, model.id_field.as_deref()) else {
        return rows;
    };

    let connected_id = connected.get(id_field).unwrap_or(&Value::Null);

    std::iter::once(connected.clone())
        .chain(rows.into_iter().filter(|row| row.get(id_field) != Some(connected_id)))
        .collect()
}

/// List relations shown as tabs below a record form.
pub fn relation_tabs(model: &SchemaModel) -> impl Iterator<Item = &SchemaField> {
    model.fields.iter().filter(|f| f.is_list_relation() && f.update)
}

/// The field of `model` pointing back to `parent_model`, prefilled when a
/// record is created from the parent's tab.
pub fn parent_field<'a>(model: &'a SchemaModel, parent_model: &str) -> Option<&'a SchemaField> {
    model.fields.iter().find(|f| f.field_type == parent_model)
}
