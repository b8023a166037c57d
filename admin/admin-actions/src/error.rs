use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Field `{}` expects JSON: {}", field, source)]
    InvalidJson {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Field `{}` expects a number, got `{}`", field, value)]
    InvalidNumber { field: String, value: String },

    #[error("Model `{}` does not exist in the schema", model)]
    UnknownModel { model: String },

    #[error("Model `{}` has no field identifying its records", model)]
    MissingIdField { model: String },
}

impl AdminError {
    pub(crate) fn invalid_json(field: &str, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            field: field.to_owned(),
            source,
        }
    }

    pub(crate) fn invalid_number(field: &str, value: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }

    pub(crate) fn unknown_model(model: &str) -> Self {
        Self::UnknownModel {
            model: model.to_owned(),
        }
    }

    pub(crate) fn missing_id_field(model: &str) -> Self {
        Self::MissingIdField {
            model: model.to_owned(),
        }
    }
}
