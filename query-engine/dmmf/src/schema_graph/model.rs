use crate::{
    SchemaLoadError,
    serialization_ast::{self as dm, FieldKind},
};
use heck::ToTitleCase;
use once_cell::sync::Lazy;
use regex::Regex;

static MODEL_MAP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@PrismaSelect\.map\(\[(.*?)\]\)").unwrap());

/// A model of the datamodel, with the admin metadata derived from it.
#[derive(Debug, Clone)]
pub struct SchemaModel {
    /// The model name. Unique within a graph.
    pub id: String,
    /// Name of the field identifying a record, if the model has one.
    pub id_field: Option<String>,
    pub fields: Vec<SchemaField>,
    /// Composite types (embedded documents) are loaded as models too.
    pub composite: bool,
    pub documentation: Option<String>,
    /// Alternative names given through `@PrismaSelect.map([...])`.
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: String,
    /// Scalar name, or the name of the referenced model or enum.
    pub field_type: String,
    pub kind: FieldKind,
    pub list: bool,
    pub required: bool,
    /// Whether the field participates in update mutations.
    pub update: bool,
    pub title: String,
    pub is_id: bool,
    pub is_unique: bool,
    pub relation_name: Option<String>,
}

impl SchemaModel {
    pub(crate) fn from_dmmf(model: dm::Model, composite: bool) -> Result<Self, SchemaLoadError> {
        if model.name.is_empty() {
            return Err(SchemaLoadError::empty_name("model"));
        }

        let id_field = model
            .fields
            .iter()
            .find(|f| f.is_id)
            .map(|f| f.name.clone())
            .or_else(|| {
                model
                    .primary_key
                    .as_ref()
                    .and_then(|pk| pk.fields.first().cloned())
            })
            .or_else(|| model.fields.iter().find(|f| f.is_unique).map(|f| f.name.clone()));

        let aliases = model.documentation.as_deref().map(parse_model_map).unwrap_or_default();

        let fields = model
            .fields
            .into_iter()
            .map(SchemaField::from_dmmf)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SchemaModel {
            id: model.name,
            id_field,
            fields,
            composite,
            documentation: model.documentation,
            aliases,
        })
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn id_field(&self) -> Option<&SchemaField> {
        self.id_field.as_deref().and_then(|name| self.field(name))
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.is_relation())
    }
}

impl SchemaField {
    fn from_dmmf(field: dm::Field) -> Result<Self, SchemaLoadError> {
        if field.name.is_empty() {
            return Err(SchemaLoadError::empty_name("field"));
        }

        let update = !field.is_id
            && !field.is_read_only
            && !field.is_updated_at.unwrap_or(false)
            && !field.is_generated.unwrap_or(false);

        Ok(SchemaField {
            title: field.name.to_title_case(),
            name: field.name,
            field_type: field.field_type,
            kind: field.kind,
            list: field.is_list,
            required: field.is_required,
            update,
            is_id: field.is_id,
            is_unique: field.is_unique,
            relation_name: field.relation_name,
        })
    }

    pub fn is_relation(&self) -> bool {
        self.kind == FieldKind::Object
    }

    pub fn is_list_relation(&self) -> bool {
        self.is_relation() && self.list
    }
}

/// Extracts the names listed in `@PrismaSelect.map([A, B])`.
fn parse_model_map(documentation: &str) -> Vec<String> {
    MODEL_MAP_RE
        .captures(documentation)
        .map(|captures| {
            captures[1]
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
