mod datamodel_ast;
mod schema_ast;

pub use datamodel_ast::*;
pub use schema_ast::*;

use serde::Deserialize;

/// The DMMF document as emitted by the schema introspection tooling.
#[derive(Debug, Clone, Deserialize)]
pub struct DataModelMetaFormat {
    #[serde(rename = "datamodel")]
    pub data_model: Datamodel,
    pub schema: DmmfSchema,
    #[serde(default)]
    pub mappings: Option<serde_json::Value>,
}
