use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("Invalid DMMF document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("The DMMF document contains a {} without a name", kind)]
    EmptyName { kind: &'static str },

    #[error(
        "Relation field `{}.{}` points to `{}`, which is neither a model nor a composite type",
        model,
        field,
        target
    )]
    DanglingRelation { model: String, field: String, target: String },
}

impl SchemaLoadError {
    pub(crate) fn empty_name(kind: &'static str) -> Self {
        Self::EmptyName { kind }
    }

    pub(crate) fn dangling_relation(model: &str, field: &str, target: &str) -> Self {
        Self::DanglingRelation {
            model: model.to_owned(),
            field: field.to_owned(),
            target: target.to_owned(),
        }
    }
}
