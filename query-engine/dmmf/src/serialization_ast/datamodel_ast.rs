// Datamodel deserialization AST for the DMMF.
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datamodel {
    #[serde(default)]
    pub enums: Vec<Enum>,
    pub models: Vec<Model>,
    #[serde(default)]
    pub types: Vec<Model>, // composite types
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Scalar,
    Object,
    Enum,
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    pub kind: FieldKind,
    pub is_list: bool,
    pub is_required: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_id: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub has_default_value: bool,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub relation_name: Option<String>,

    #[serde(default)]
    pub relation_from_fields: Option<Vec<String>>,

    #[serde(default)]
    pub relation_to_fields: Option<Vec<String>>,

    #[serde(default)]
    pub is_generated: Option<bool>,

    #[serde(default)]
    pub is_updated_at: Option<bool>,

    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    #[serde(default)]
    pub unique_fields: Vec<Vec<String>>,

    #[serde(default)]
    pub is_generated: Option<bool>,

    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    #[serde(default)]
    pub name: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    #[serde(default)]
    pub db_name: Option<String>,

    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
}
