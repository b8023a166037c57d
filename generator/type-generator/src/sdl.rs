//! GraphQL SDL of the library types a server has to register next to its own
//! model types: custom scalars, `BatchPayload`, enums, input types and the
//! library output types (aggregates, group-by and count outputs).

use crate::{GeneratorConfig, emptiness::EmptinessCheck, input_type::select_input_type, renderer::RenderContext};
use dmmf::{InputField, OutputField, OutputTypeKind, SchemaGraph, TypeClass, TypeLocation, TypeRef};
use indexmap::IndexSet;
use itertools::Itertools;

const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];
const BATCH_PAYLOAD: &str = "BatchPayload";
const INDENT: &str = "  ";

pub struct SdlInputs<'a> {
    graph: &'a SchemaGraph,
    config: &'a GeneratorConfig,
}

impl<'a> SdlInputs<'a> {
    pub fn new(graph: &'a SchemaGraph, config: &'a GeneratorConfig) -> Self {
        Self { graph, config }
    }

    #[tracing::instrument(skip_all)]
    pub fn run(&self) -> String {
        let mut emptiness = EmptinessCheck::new(self.graph, self.config);
        let mut scalars = IndexSet::new();

        let mut inputs = Vec::new();

        for input in self.graph.input_types() {
            if emptiness.is_vacuous(&input.name) {
                continue;
            }

            let fields = input
                .fields
                .iter()
                .filter_map(|field| self.input_field(field, &mut emptiness, &mut scalars))
                .collect_vec();

            inputs.push(block("input", &input.name, fields.as_slice()));
        }

        let mut outputs = Vec::new();

        for output in self.graph.output_types() {
            if !matches!(
                output.kind,
                OutputTypeKind::Aggregate { .. } | OutputTypeKind::GroupBy { .. } | OutputTypeKind::Library
            ) {
                continue;
            }

            let fields = output
                .fields
                .iter()
                .map(|field| self.output_field(field, &mut emptiness, &mut scalars))
                .collect_vec();

            outputs.push(block("type", &output.name, fields.as_slice()));
        }

        let enums = self
            .graph
            .enum_types()
            .map(|e| block("enum", &e.name, e.values.as_slice()))
            .collect_vec();

        let mut ctx = RenderContext::new();

        ctx.add_output(scalars.iter().map(|s| format!("scalar {s}")).join("\n"));
        ctx.add_output(block("type", BATCH_PAYLOAD, &["count: Int!"][..]));
        ctx.add_output(enums.join("\n\n"));
        ctx.add_output(inputs.join("\n\n"));
        ctx.add_output(outputs.join("\n\n"));

        ctx.format()
    }

    fn input_field(
        &self,
        field: &'a InputField,
        emptiness: &mut EmptinessCheck<'a>,
        scalars: &mut IndexSet<&'a str>,
    ) -> Option<String> {
        let input_type = select_input_type(field, self.config)?;

        if input_type.is_input_object() && emptiness.is_vacuous(&input_type.name) {
            return None;
        }

        let required = if field.is_required { "!" } else { "" };

        Some(format!("{}: {}{required}", field.name, render_type(input_type, scalars)))
    }

    fn output_field(
        &self,
        field: &'a OutputField,
        emptiness: &mut EmptinessCheck<'a>,
        scalars: &mut IndexSet<&'a str>,
    ) -> String {
        let args = field
            .args
            .iter()
            .filter_map(|arg| self.input_field(arg, emptiness, scalars))
            .collect_vec();

        let args = if args.is_empty() {
            String::new()
        } else {
            format!("({})", args.join(", "))
        };

        let bang = if field.is_nullable { "" } else { "!" };

        format!(
            "{}{args}: {}{bang}",
            field.name,
            render_type(&field.output_type, scalars)
        )
    }
}

/// Lists render as `[T!]`. Custom scalars are collected for declaration.
fn render_type<'a>(type_ref: &'a TypeRef, scalars: &mut IndexSet<&'a str>) -> String {
    let name = match type_ref.class {
        TypeClass::AffectedRows => BATCH_PAYLOAD,
        _ => type_ref.name.as_str(),
    };

    if type_ref.location == TypeLocation::Scalar && !BUILTIN_SCALARS.contains(&name) {
        scalars.insert(name);
    }

    if type_ref.is_list {
        format!("[{name}!]")
    } else {
        name.to_owned()
    }
}

fn block(keyword: &str, name: &str, lines: &[impl AsRef<str>]) -> String {
    let body = lines.iter().map(|line| format!("{INDENT}{}", line.as_ref())).join("\n");

    format!("{keyword} {name} {{\n{body}\n}}")
}
