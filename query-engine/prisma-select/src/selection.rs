use indexmap::{IndexMap, map::Entry};
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

/// Arguments a relation selection may carry next to its `select`.
pub const RELATION_ARGUMENTS: [&str; 6] = ["where", "orderBy", "cursor", "take", "skip", "distinct"];

pub const SELECT: &str = "select";

/// The select argument for one model: which fields to fetch, and the
/// relation arguments that apply to them.
///
/// Serializes to `{ "select": { ... }, "where": ..., ... }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionNode {
    select: IndexMap<String, Selected>,
    arguments: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selected {
    /// `true`: a scalar, or a relation with all of its scalars.
    Field,
    /// A relation (or `_count`) with its own selection and arguments.
    Nested(SelectionNode),
    /// Relation arguments without a nested selection, as used for filtered
    /// relation counts.
    Arguments(IndexMap<String, Value>),
    /// An aggregate group such as `_avg: { id: true }`.
    Group(Vec<String>),
}

impl SelectionNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_arguments(arguments: IndexMap<String, Value>) -> Self {
        Self {
            select: IndexMap::new(),
            arguments,
        }
    }

    pub fn select(&self) -> &IndexMap<String, Selected> {
        &self.select
    }

    pub fn arguments(&self) -> &IndexMap<String, Value> {
        &self.arguments
    }

    pub fn get(&self, field: &str) -> Option<&Selected> {
        self.select.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.select.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.select.is_empty()
    }

    /// Adds a field to the selection. Selecting a field twice (e.g. through
    /// two aliases) merges both selections.
    pub fn insert(&mut self, field: impl Into<String>, selected: Selected) {
        match self.select.entry(field.into()) {
            Entry::Occupied(mut entry) => {
                let existing = std::mem::replace(entry.get_mut(), Selected::Field);
                *entry.get_mut() = existing.merge(selected);
            }
            Entry::Vacant(entry) => {
                entry.insert(selected);
            }
        }
    }

    /// The whole select argument, `{ select, ...arguments }`.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Only the field map, without the `select` wrapper and arguments.
    pub fn select_value(&self) -> Value {
        serde_json::to_value(&self.select).unwrap_or(Value::Null)
    }

    fn merge(mut self, other: SelectionNode) -> SelectionNode {
        self.arguments.extend(other.arguments);

        for (field, selected) in other.select {
            self.insert(field, selected);
        }

        self
    }
}

impl Selected {
    fn merge(self, other: Selected) -> Selected {
        match (self, other) {
            (Selected::Nested(left), Selected::Nested(right)) => Selected::Nested(left.merge(right)),
            (Selected::Nested(node), Selected::Field) | (Selected::Field, Selected::Nested(node)) => {
                Selected::Nested(node)
            }
            (Selected::Group(mut left), Selected::Group(right)) => {
                for name in right {
                    if !left.contains(&name) {
                        left.push(name);
                    }
                }

                Selected::Group(left)
            }
            (_, other) => other,
        }
    }
}

/// Picks the relation arguments out of a field's GraphQL arguments. Null
/// arguments are left out.
pub(crate) fn relation_arguments(args: &IndexMap<String, Value>) -> IndexMap<String, Value> {
    RELATION_ARGUMENTS
        .iter()
        .filter_map(|key| match args.get(*key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(((*key).to_owned(), value.clone())),
        })
        .collect()
}

impl Serialize for SelectionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.arguments.len() + 1))?;

        map.serialize_entry(SELECT, &self.select)?;

        for (key, value) in &self.arguments {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

impl Serialize for Selected {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selected::Field => serializer.serialize_bool(true),
            Selected::Nested(node) => node.serialize(serializer),
            Selected::Arguments(arguments) => arguments.serialize(serializer),
            Selected::Group(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;

                for field in fields {
                    map.serialize_entry(field, &true)?;
                }

                map.end()
            }
        }
    }
}
