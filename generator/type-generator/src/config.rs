use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CLIENT_IMPORT: &str = "@prisma/client";
const DEFAULT_CONTEXT_IMPORT: &str = "./context";

/// Rendering of DMMF scalars in generated declarations.
const SCALARS: [(&str, &str); 9] = [
    ("Int", "number"),
    ("Float", "number"),
    ("String", "string"),
    ("Boolean", "boolean"),
    ("DateTime", "Date"),
    ("Json", "any"),
    ("BigInt", "bigint"),
    ("Decimal", "Client.Prisma.Decimal"),
    ("Bytes", "Buffer"),
];

const UNKNOWN_SCALAR: &str = "any";

#[derive(Debug, Error)]
#[error("Invalid generator configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Module the generated code imports the client namespace from.
    pub client_import: String,
    /// Module exporting the resolver `Context` type.
    pub context_import: String,
    /// Overrides of the scalar rendering, keyed by DMMF scalar name.
    pub scalars: IndexMap<String, String>,
    /// Pick plain values over `*FieldUpdateOperationsInput` wrappers in update
    /// inputs.
    pub do_not_use_field_update_operations_input: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            client_import: DEFAULT_CLIENT_IMPORT.to_owned(),
            context_import: DEFAULT_CONTEXT_IMPORT.to_owned(),
            scalars: IndexMap::new(),
            do_not_use_field_update_operations_input: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The declared type a DMMF scalar renders as.
    pub fn scalar(&self, name: &str) -> &str {
        if let Some(rendered) = self.scalars.get(name) {
            return rendered;
        }

        match SCALARS.iter().find(|(scalar, _)| *scalar == name) {
            Some((_, rendered)) => *rendered,
            None => {
                tracing::warn!(scalar = name, "unknown scalar, rendering it as `{}`", UNKNOWN_SCALAR);
                UNKNOWN_SCALAR
            }
        }
    }
}
