use crate::{
    classify::{OutputFieldKind, OutputTypeKind, TypeClass},
    serialization_ast::TypeLocation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Types provided by the client library.
    Prisma,
    /// Types derived from the datamodel.
    Model,
}

/// A reference to a type by name. Self-referential and mutually recursive
/// input shapes are expressed through these names, never through pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub location: TypeLocation,
    pub is_list: bool,
    pub class: TypeClass,
}

impl TypeRef {
    pub fn is_input_object(&self) -> bool {
        self.location == TypeLocation::InputObjectTypes
    }
}

#[derive(Debug, Clone)]
pub struct InputField {
    pub name: String,
    pub is_required: bool,
    pub is_nullable: bool,
    /// The alternative types accepted for this field, in DMMF order.
    pub input_types: Vec<TypeRef>,
}

#[derive(Debug, Clone)]
pub struct InputObjectType {
    pub name: String,
    pub namespace: Namespace,
    pub fields: Vec<InputField>,
}

#[derive(Debug, Clone)]
pub struct OutputField {
    pub name: String,
    pub args: Vec<InputField>,
    pub is_nullable: bool,
    pub output_type: TypeRef,
    pub kind: OutputFieldKind,
}

#[derive(Debug, Clone)]
pub struct OutputObjectType {
    pub name: String,
    pub namespace: Namespace,
    pub kind: OutputTypeKind,
    pub fields: Vec<OutputField>,
}

impl OutputObjectType {
    pub fn field(&self, name: &str) -> Option<&OutputField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: String,
    pub namespace: Namespace,
    pub values: Vec<String>,
}
