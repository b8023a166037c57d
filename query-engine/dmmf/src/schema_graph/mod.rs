mod model;
mod types;

pub use model::{SchemaField, SchemaModel};
pub use types::*;

use crate::{
    SchemaLoadError,
    classify::{OutputFieldKind, OutputTypeKind, TypeClass},
    serialization_ast::{
        DataModelMetaFormat, DmmfEnum, DmmfInputField, DmmfInputType, DmmfOutputType, DmmfTypeReference, FieldKind,
        TypeLocation,
    },
};
use std::collections::{HashMap, HashSet};

/// The read-only, in-memory view of one or more DMMF documents.
///
/// Relations between models, and references between schema types, are kept
/// as names and resolved through the lookup tables owned by the graph.
#[derive(Debug, Default)]
pub struct SchemaGraph {
    models: Vec<SchemaModel>,
    model_index: HashMap<String, usize>,
    model_aliases: HashMap<String, usize>,
    /// Enums of the `model` namespace. These count as models for type naming.
    model_enums: HashSet<String>,

    input_types: Vec<InputObjectType>,
    input_index: HashMap<String, usize>,
    output_types: Vec<OutputObjectType>,
    output_index: HashMap<String, usize>,
    enum_types: Vec<EnumType>,
    enum_index: HashMap<String, usize>,
}

impl SchemaGraph {
    /// Loads a graph from a DMMF JSON document.
    pub fn load(document: &str) -> Result<Self, SchemaLoadError> {
        Self::load_many([document])
    }

    /// Loads several DMMF JSON documents into a single graph. The first
    /// declaration of any name wins.
    pub fn load_many<'a>(documents: impl IntoIterator<Item = &'a str>) -> Result<Self, SchemaLoadError> {
        let documents = documents
            .into_iter()
            .map(serde_json::from_str::<DataModelMetaFormat>)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_documents(documents)
    }

    pub fn from_dmmf(document: DataModelMetaFormat) -> Result<Self, SchemaLoadError> {
        Self::from_documents(vec![document])
    }

    #[tracing::instrument(skip_all, fields(documents = documents.len()))]
    pub fn from_documents(documents: Vec<DataModelMetaFormat>) -> Result<Self, SchemaLoadError> {
        let mut graph = SchemaGraph::default();

        // Models first: classifying schema types depends on knowing them.
        for document in &documents {
            for model in &document.data_model.models {
                graph.push_model(SchemaModel::from_dmmf(model.clone(), false)?);
            }

            for composite in &document.data_model.types {
                graph.push_model(SchemaModel::from_dmmf(composite.clone(), true)?);
            }

            graph
                .model_enums
                .extend(document.schema.enum_types.model.iter().map(|e| e.name.clone()));
        }

        graph.validate_relations()?;

        for document in documents {
            let schema = document.schema;

            for (namespace, enums) in [
                (Namespace::Prisma, schema.enum_types.prisma),
                (Namespace::Model, schema.enum_types.model),
            ] {
                for dmmf_enum in enums {
                    graph.push_enum(namespace, dmmf_enum);
                }
            }

            for (namespace, inputs) in [
                (Namespace::Prisma, schema.input_object_types.prisma),
                (Namespace::Model, schema.input_object_types.model),
            ] {
                for input in inputs {
                    graph.push_input_type(namespace, input);
                }
            }

            for (namespace, outputs) in [
                (Namespace::Model, schema.output_object_types.model),
                (Namespace::Prisma, schema.output_object_types.prisma),
            ] {
                for output in outputs {
                    graph.push_output_type(namespace, output);
                }
            }
        }

        tracing::debug!(
            models = graph.models.len(),
            input_types = graph.input_types.len(),
            output_types = graph.output_types.len(),
            enums = graph.enum_types.len(),
            "schema graph loaded"
        );

        Ok(graph)
    }

    pub fn models(&self) -> &[SchemaModel] {
        &self.models
    }

    pub fn find_model(&self, name: &str) -> Option<&SchemaModel> {
        self.model_index.get(name).map(|idx| &self.models[*idx])
    }

    /// Like [`find_model`](Self::find_model), but also follows the names
    /// declared with `@PrismaSelect.map([...])` in model documentation.
    pub fn resolve_model(&self, name: &str) -> Option<&SchemaModel> {
        self.find_model(name)
            .or_else(|| self.model_aliases.get(name).map(|idx| &self.models[*idx]))
    }

    /// True for declared models and for enums generated from the datamodel.
    pub fn is_model(&self, name: &str) -> bool {
        self.model_index.contains_key(name) || self.model_enums.contains(name)
    }

    pub fn find_field(&self, model: &str, name: &str) -> Option<&SchemaField> {
        self.find_model(model).and_then(|m| m.field(name))
    }

    pub fn find_input_type(&self, name: &str) -> Option<&InputObjectType> {
        self.input_index.get(name).map(|idx| &self.input_types[*idx])
    }

    pub fn find_output_type(&self, name: &str) -> Option<&OutputObjectType> {
        self.output_index.get(name).map(|idx| &self.output_types[*idx])
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumType> {
        self.enum_index.get(name).map(|idx| &self.enum_types[*idx])
    }

    /// Input object types, library types first.
    pub fn input_types(&self) -> impl Iterator<Item = &InputObjectType> {
        in_namespaces(&self.input_types, [Namespace::Prisma, Namespace::Model], |t| t.namespace)
    }

    /// Output object types, model types first.
    pub fn output_types(&self) -> impl Iterator<Item = &OutputObjectType> {
        in_namespaces(&self.output_types, [Namespace::Model, Namespace::Prisma], |t| t.namespace)
    }

    /// Enum types, library enums first.
    pub fn enum_types(&self) -> impl Iterator<Item = &EnumType> {
        in_namespaces(&self.enum_types, [Namespace::Prisma, Namespace::Model], |t| t.namespace)
    }

    pub fn classify(&self, name: &str, location: TypeLocation) -> TypeClass {
        TypeClass::classify(name, location, self.is_model(name))
    }

    fn push_model(&mut self, model: SchemaModel) {
        if self.model_index.contains_key(&model.id) {
            tracing::warn!(model = %model.id, "model declared more than once, keeping the first declaration");
            return;
        }

        let idx = self.models.len();

        for alias in &model.aliases {
            self.model_aliases.entry(alias.clone()).or_insert(idx);
        }

        self.model_index.insert(model.id.clone(), idx);
        self.models.push(model);
    }

    fn validate_relations(&self) -> Result<(), SchemaLoadError> {
        for model in &self.models {
            for field in model.fields.iter().filter(|f| f.kind == FieldKind::Object) {
                if !self.model_index.contains_key(&field.field_type) {
                    return Err(SchemaLoadError::dangling_relation(
                        &model.id,
                        &field.name,
                        &field.field_type,
                    ));
                }
            }
        }

        Ok(())
    }

    fn type_ref(&self, reference: DmmfTypeReference) -> TypeRef {
        let class = self.classify(&reference.typ, reference.location);

        TypeRef {
            name: reference.typ,
            location: reference.location,
            is_list: reference.is_list,
            class,
        }
    }

    fn input_field(&self, field: DmmfInputField) -> InputField {
        InputField {
            name: field.name,
            is_required: field.is_required,
            is_nullable: field.is_nullable,
            input_types: field.input_types.into_iter().map(|t| self.type_ref(t)).collect(),
        }
    }

    fn push_enum(&mut self, namespace: Namespace, dmmf_enum: DmmfEnum) {
        if self.enum_index.contains_key(&dmmf_enum.name) {
            tracing::warn!(name = %dmmf_enum.name, "enum declared more than once, keeping the first declaration");
            return;
        }

        self.enum_index.insert(dmmf_enum.name.clone(), self.enum_types.len());
        self.enum_types.push(EnumType {
            name: dmmf_enum.name,
            namespace,
            values: dmmf_enum.values,
        });
    }

    fn push_input_type(&mut self, namespace: Namespace, input: DmmfInputType) {
        if self.input_index.contains_key(&input.name) {
            tracing::warn!(name = %input.name, "input type declared more than once, keeping the first declaration");
            return;
        }

        let fields = input.fields.into_iter().map(|f| self.input_field(f)).collect();

        self.input_index.insert(input.name.clone(), self.input_types.len());
        self.input_types.push(InputObjectType {
            name: input.name,
            namespace,
            fields,
        });
    }

    fn push_output_type(&mut self, namespace: Namespace, output: DmmfOutputType) {
        if self.output_index.contains_key(&output.name) {
            tracing::warn!(name = %output.name, "output type declared more than once, keeping the first declaration");
            return;
        }

        let kind = OutputTypeKind::classify(&output.name, self.is_model(&output.name));

        let fields = output
            .fields
            .into_iter()
            .map(|field| {
                let output_type = self.type_ref(field.output_type);
                let field_kind = OutputFieldKind::classify(&field.name, &output_type.class, &kind);

                OutputField {
                    name: field.name,
                    args: field.args.into_iter().map(|a| self.input_field(a)).collect(),
                    is_nullable: field.is_nullable,
                    output_type,
                    kind: field_kind,
                }
            })
            .collect();

        self.output_index.insert(output.name.clone(), self.output_types.len());
        self.output_types.push(OutputObjectType {
            name: output.name,
            namespace,
            kind,
            fields,
        });
    }
}

fn in_namespaces<'a, T>(
    items: &'a [T],
    order: [Namespace; 2],
    namespace: impl Fn(&T) -> Namespace + Copy + 'a,
) -> impl Iterator<Item = &'a T> + 'a {
    order
        .into_iter()
        .flat_map(move |ns| items.iter().filter(move |item| namespace(*item) == ns))
}
