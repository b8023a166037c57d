// Query schema deserialization AST for the DMMF.
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmmfSchema {
    pub input_object_types: Namespaced<DmmfInputType>,
    pub output_object_types: Namespaced<DmmfOutputType>,
    pub enum_types: Namespaced<DmmfEnum>,
}

/// A type collection split by namespace. The `prisma` namespace holds the
/// library-provided types and is always present, `model` holds the types
/// derived from the datamodel and may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct Namespaced<T> {
    pub prisma: Vec<T>,
    #[serde(default = "Vec::new")]
    pub model: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmmfOutputField {
    pub name: String,
    #[serde(default)]
    pub args: Vec<DmmfInputField>,
    pub is_nullable: bool,
    pub output_type: DmmfTypeReference,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmmfOutputType {
    pub name: String,
    pub fields: Vec<DmmfOutputField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmmfInputField {
    pub name: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_nullable: bool,
    pub input_types: Vec<DmmfTypeReference>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmmfInputType {
    pub name: String,
    pub fields: Vec<DmmfInputField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmmfTypeReference {
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default)]
    pub namespace: Option<String>,
    pub location: TypeLocation,
    #[serde(default)]
    pub is_list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeLocation {
    Scalar,
    InputObjectTypes,
    OutputObjectTypes,
    EnumTypes,
    FieldRefTypes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmmfEnum {
    pub name: String,
    pub values: Vec<String>,
}
