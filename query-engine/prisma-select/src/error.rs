use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// The root type of an entry point that needs a concrete model resolves
    /// to no model, and no fallback model is configured.
    #[error("`{}` is not a model of the schema and no fallback model is configured", type_name)]
    InvalidRoot { type_name: String },

    /// Only raised in strict mode. Unknown fields are dropped otherwise.
    #[error("Field `{}` is not declared on model `{}`", field, model)]
    UnknownField { model: String, field: String },
}

impl SelectError {
    pub(crate) fn invalid_root(type_name: &str) -> Self {
        Self::InvalidRoot {
            type_name: type_name.to_owned(),
        }
    }

    pub(crate) fn unknown_field(model: &str, field: &str) -> Self {
        Self::UnknownField {
            model: model.to_owned(),
            field: field.to_owned(),
        }
    }
}
