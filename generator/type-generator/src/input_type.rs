//! Naming of referenced types in generated declarations.

use crate::GeneratorConfig;
use dmmf::{InputField, TypeClass, TypeRef};
use std::fmt;

const FIELD_UPDATE_OPERATIONS_SUFFIX: &str = "FieldUpdateOperationsInput";
const JSON: &str = "Json";

/// Where a reference appears. Inputs are declared locally, outputs come from
/// the client's own declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeReference<'a> {
    /// A scalar, already mapped to its declared type.
    Scalar(&'a str),
    /// `Get<Model>AggregateType<Aggregate<Model>Args>`
    Aggregate {
        model: &'a str,
        type_name: &'a str,
        position: Position,
    },
    BatchPayload(Position),
    /// A type of the client library's `Prisma` namespace.
    Library(&'a str),
    /// A model type exported by the client.
    Client(&'a str),
    /// A type declared in the generated file itself.
    Local(&'a str),
}

/// A [`TypeReference`], possibly in list form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType<'a> {
    pub reference: TypeReference<'a>,
    pub is_list: bool,
}

/// Picks the alternative a field is declared with. The second alternative
/// wins when it is an input object, a list or `Json`, unless plain values are
/// preferred over update operation wrappers.
pub fn select_input_type<'a>(field: &'a InputField, config: &GeneratorConfig) -> Option<&'a TypeRef> {
    let second = field.input_types.get(1);

    if config.do_not_use_field_update_operations_input
        && second.is_some_and(|t| t.name.ends_with(FIELD_UPDATE_OPERATIONS_SUFFIX))
    {
        return field.input_types.first();
    }

    match second {
        Some(t) if t.is_input_object() || t.is_list || t.name == JSON => Some(t),
        _ => field.input_types.first(),
    }
}

/// Resolves a type reference. The order matters: aggregate and batch results
/// are recognised before the model/library split.
pub fn resolve<'a>(type_ref: &'a TypeRef, position: Position, config: &'a GeneratorConfig) -> ResolvedType<'a> {
    let name = type_ref.name.as_str();

    let reference = match (&type_ref.class, position) {
        (TypeClass::Scalar, _) => TypeReference::Scalar(config.scalar(name)),
        (TypeClass::Aggregate { model }, _) => TypeReference::Aggregate {
            model,
            type_name: name,
            position,
        },
        (TypeClass::AffectedRows, _) => TypeReference::BatchPayload(position),
        (TypeClass::Library, Position::Output) => TypeReference::Library(name),
        (TypeClass::Model, Position::Output) => TypeReference::Client(name),
        (_, Position::Input) => TypeReference::Local(name),
    };

    ResolvedType {
        reference,
        is_list: type_ref.is_list,
    }
}

impl Position {
    fn client_prefix(self) -> &'static str {
        match self {
            Position::Input => "",
            Position::Output => "Client.",
        }
    }
}

impl fmt::Display for TypeReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeReference::Scalar(rendered) => f.write_str(rendered),
            TypeReference::Aggregate {
                model,
                type_name,
                position,
            } => write!(
                f,
                "{}Prisma.Get{model}AggregateType<{type_name}Args>",
                position.client_prefix()
            ),
            TypeReference::BatchPayload(position) => write!(f, "{}Prisma.BatchPayload", position.client_prefix()),
            TypeReference::Library(name) => write!(f, "Client.Prisma.{name}"),
            TypeReference::Client(name) => write!(f, "Client.{name}"),
            TypeReference::Local(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for ResolvedType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reference.fmt(f)?;

        if self.is_list {
            f.write_str("[]")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmmf::TypeLocation;

    fn type_ref(name: &str, location: TypeLocation, is_list: bool, class: TypeClass) -> TypeRef {
        TypeRef {
            name: name.to_owned(),
            location,
            is_list,
            class,
        }
    }

    fn field(input_types: Vec<TypeRef>) -> InputField {
        InputField {
            name: "title".to_owned(),
            is_required: false,
            is_nullable: false,
            input_types,
        }
    }

    #[test]
    fn references_render_by_class_and_position() {
        let config = GeneratorConfig::default();
        let render = |t: &TypeRef, position| resolve(t, position, &config).to_string();

        let ints = type_ref("Int", TypeLocation::Scalar, true, TypeClass::Scalar);
        assert_eq!(render(&ints, Position::Output), "number[]");

        let aggregate = type_ref(
            "AggregateUser",
            TypeLocation::OutputObjectTypes,
            false,
            TypeClass::Aggregate {
                model: "User".to_owned(),
            },
        );
        assert_eq!(
            render(&aggregate, Position::Output),
            "Client.Prisma.GetUserAggregateType<AggregateUserArgs>"
        );
        assert_eq!(
            render(&aggregate, Position::Input),
            "Prisma.GetUserAggregateType<AggregateUserArgs>"
        );

        let batch = type_ref(
            "AffectedRowsOutput",
            TypeLocation::OutputObjectTypes,
            false,
            TypeClass::AffectedRows,
        );
        assert_eq!(render(&batch, Position::Output), "Client.Prisma.BatchPayload");

        let sort = type_ref("SortOrder", TypeLocation::EnumTypes, false, TypeClass::Library);
        assert_eq!(render(&sort, Position::Output), "Client.Prisma.SortOrder");
        assert_eq!(render(&sort, Position::Input), "SortOrder");

        let posts = type_ref("Post", TypeLocation::OutputObjectTypes, true, TypeClass::Model);
        assert_eq!(render(&posts, Position::Output), "Client.Post[]");
        assert_eq!(render(&posts, Position::Input), "Post[]");
    }

    #[test]
    fn second_alternative_wins_for_objects_lists_and_json() {
        let config = GeneratorConfig::default();

        let filter = field(vec![
            type_ref("StringFilter", TypeLocation::InputObjectTypes, false, TypeClass::Library),
            type_ref("String", TypeLocation::Scalar, false, TypeClass::Scalar),
        ]);
        assert_eq!(select_input_type(&filter, &config).unwrap().name, "StringFilter");

        let update = field(vec![
            type_ref("String", TypeLocation::Scalar, false, TypeClass::Scalar),
            type_ref(
                "StringFieldUpdateOperationsInput",
                TypeLocation::InputObjectTypes,
                false,
                TypeClass::Library,
            ),
        ]);
        assert_eq!(
            select_input_type(&update, &config).unwrap().name,
            "StringFieldUpdateOperationsInput"
        );

        let plain_updates = GeneratorConfig {
            do_not_use_field_update_operations_input: true,
            ..Default::default()
        };
        assert_eq!(select_input_type(&update, &plain_updates).unwrap().name, "String");

        let json = field(vec![
            type_ref("JsonNullValueInput", TypeLocation::EnumTypes, false, TypeClass::Library),
            type_ref("Json", TypeLocation::Scalar, false, TypeClass::Scalar),
        ]);
        assert_eq!(select_input_type(&json, &config).unwrap().name, "Json");

        assert!(select_input_type(&field(Vec::new()), &config).is_none());
    }
}
