use crate::{
    GeneratorConfig,
    emptiness::EmptinessCheck,
    input_type::{Position, resolve, select_input_type},
    renderer::*,
};
use dmmf::{InputField, OutputField, OutputFieldKind, OutputObjectType, OutputTypeKind, SchemaGraph};

const NO_ARGS: &str = "{}";

/// Generates the resolver type declarations of a schema: the `Resolvers`
/// index, one resolver map per output type, one args interface per field
/// taking arguments, the input interfaces and the enums.
pub struct GenerateTypes<'a> {
    graph: &'a SchemaGraph,
    config: &'a GeneratorConfig,
}

impl<'a> GenerateTypes<'a> {
    pub fn new(graph: &'a SchemaGraph, config: &'a GeneratorConfig) -> Self {
        Self { graph, config }
    }

    #[tracing::instrument(skip_all, fields(output_types = self.graph.output_types().count()))]
    pub fn run(&self) -> String {
        let mut ctx = RenderContext::new();
        let mut emptiness = EmptinessCheck::new(self.graph, self.config);

        let mut index = ResolversIndex::default();
        let mut resolver_maps = Vec::new();
        let mut args = Vec::new();

        for output in self.graph.output_types() {
            index.push(&output.name);

            let parent = parent_type(output);
            let mut map = ResolverMap::new(&output.name);

            for field in &output.fields {
                let args_name = args_type_name(output, field);
                let args_ref = args_name.as_deref().unwrap_or(NO_ARGS);
                let returns = resolve(&field.output_type, Position::Output, self.config);
                let null = if field.is_nullable { " | null" } else { "" };

                map.push_member(
                    Member::new(&field.name, format!("Resolver<{parent}, {args_ref}, {returns}{null}>")).optional(true),
                );

                if field.kind == OutputFieldKind::FindMany {
                    map.push_member(
                        Member::new(
                            format!("{}Count", field.name),
                            format!("Resolver<{parent}, {args_ref}, number>"),
                        )
                        .optional(true),
                    );
                }

                if let Some(args_name) = args_name {
                    args.push(self.args_interface(args_name, field, &mut emptiness));
                }
            }

            resolver_maps.push(map);
        }

        let mut inputs = Vec::new();

        for input in self.graph.input_types() {
            if emptiness.is_vacuous(&input.name) {
                tracing::debug!(input = %input.name, "input type cannot carry a value, not declaring it");
                continue;
            }

            let mut interface = Interface::new(&input.name);

            for field in &input.fields {
                if let Some(member) = self.input_member(field, &mut emptiness) {
                    interface.push_member(member);
                }
            }

            inputs.push(interface);
        }

        let enums = self
            .graph
            .enum_types()
            .map(|e| Enum::new(&e.name, &e.values))
            .collect();

        ctx.add_output(Header::new(self.config));
        ctx.add_output(index);
        ctx.add_output(Section(resolver_maps));
        ctx.add_output(Section(args));
        ctx.add_output(Section(inputs));
        ctx.add_output(Section(enums));

        ctx.format()
    }

    fn args_interface(&self, name: String, field: &'a OutputField, emptiness: &mut EmptinessCheck<'a>) -> Interface {
        let mut interface = Interface::new(name);

        for arg in &field.args {
            if let Some(member) = self.input_member(arg, emptiness) {
                interface.push_member(member);
            }
        }

        // Aggregations take one argument per group of the aggregate type.
        if let OutputFieldKind::Aggregate { model } = &field.kind {
            let groups = self
                .graph
                .find_output_type(&field.output_type.name)
                .map(|output| output.fields.as_slice())
                .unwrap_or_default();

            for group in groups {
                let group_name = capitalize(&group.name.replacen('_', "", 1));
                let r#type = format!("Client.Prisma.{model}{group_name}AggregateInputType");

                interface.push_member(Member::new(&group.name, r#type).optional(true));
            }
        }

        interface
    }

    fn input_member(&self, field: &'a InputField, emptiness: &mut EmptinessCheck<'a>) -> Option<Member> {
        let Some(input_type) = select_input_type(field, self.config) else {
            tracing::warn!(field = %field.name, "input field declares no type");
            return None;
        };

        if input_type.is_input_object() && emptiness.is_vacuous(&input_type.name) {
            tracing::debug!(
                field = %field.name,
                input = %input_type.name,
                "skipping input field, its type cannot carry a value"
            );
            return None;
        }

        let member = Member::new(&field.name, resolve(input_type, Position::Input, self.config))
            .optional(!field.is_required)
            .nullable(field.is_nullable);

        Some(member)
    }
}

/// The parent value resolvers of `output` receive.
fn parent_type(output: &OutputObjectType) -> String {
    match output.kind {
        OutputTypeKind::Operation(_) => NO_ARGS.to_owned(),
        OutputTypeKind::AffectedRows => "Client.Prisma.BatchPayload".to_owned(),
        OutputTypeKind::Model => format!("Client.{}", output.name),
        _ => format!("Client.Prisma.{}", output.name),
    }
}

/// `UserPostsArgs` for `User.posts`, `FindManyUserArgs` for
/// `Query.findManyUser`. `None` when the field takes no arguments.
fn args_type_name(output: &OutputObjectType, field: &OutputField) -> Option<String> {
    if field.args.is_empty() {
        return None;
    }

    let prefix = if output.kind.is_operation() { "" } else { output.name.as_str() };

    Some(format!("{prefix}{}Args", capitalize(&field.name)))
}
