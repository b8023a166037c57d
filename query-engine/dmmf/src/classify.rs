//! Classification of schema type and field names.
//!
//! The DMMF encodes a few structural roles only through naming conventions
//! (`AggregateUser`, `AffectedRowsOutput`, `findManyUser`, ...). These are
//! decoded once while the [`SchemaGraph`](crate::SchemaGraph) is built, and
//! consumers match on the resulting enums.

use crate::serialization_ast::TypeLocation;

pub const AGGREGATE_PREFIX: &str = "Aggregate";
pub const AFFECTED_ROWS_OUTPUT: &str = "AffectedRowsOutput";
pub const GROUP_BY_SUFFIX: &str = "GroupByOutputType";
pub const FIND_MANY_PREFIX: &str = "findMany";
pub const QUERY: &str = "Query";
pub const MUTATION: &str = "Mutation";

/// What a referenced type name stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass {
    Scalar,
    /// `Aggregate<Model>` result types.
    Aggregate { model: String },
    /// The result of batch mutations (`updateMany`, `deleteMany`, ...).
    AffectedRows,
    /// A datamodel model or an enum derived from the datamodel.
    Model,
    /// Any other type, provided by the client library's own namespace.
    Library,
}

impl TypeClass {
    pub fn classify(name: &str, location: TypeLocation, is_model: bool) -> Self {
        if location == TypeLocation::Scalar {
            return Self::Scalar;
        }

        if let Some(model) = name.strip_prefix(AGGREGATE_PREFIX) {
            return Self::Aggregate {
                model: model.to_owned(),
            };
        }

        if name == AFFECTED_ROWS_OUTPUT {
            return Self::AffectedRows;
        }

        if is_model { Self::Model } else { Self::Library }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// The role of an output object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTypeKind {
    Operation(OperationKind),
    Aggregate { model: String },
    GroupBy { model: String },
    AffectedRows,
    Model,
    Library,
}

impl OutputTypeKind {
    pub fn classify(name: &str, is_model: bool) -> Self {
        match name {
            QUERY => return Self::Operation(OperationKind::Query),
            MUTATION => return Self::Operation(OperationKind::Mutation),
            AFFECTED_ROWS_OUTPUT => return Self::AffectedRows,
            _ => (),
        }

        if let Some(model) = name.strip_prefix(AGGREGATE_PREFIX) {
            return Self::Aggregate {
                model: model.to_owned(),
            };
        }

        match name.strip_suffix(GROUP_BY_SUFFIX) {
            Some(model) if !model.is_empty() => Self::GroupBy {
                model: model.to_owned(),
            },
            _ if is_model => Self::Model,
            _ => Self::Library,
        }
    }

    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }

    /// The model summarised by an aggregate or group-by type.
    pub fn aggregated_model(&self) -> Option<&str> {
        match self {
            Self::Aggregate { model } | Self::GroupBy { model } => Some(model),
            _ => None,
        }
    }
}

/// The role of a field on an output object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFieldKind {
    /// `findMany<Model>`, which gets a sibling `<field>Count` resolver.
    FindMany,
    /// An operation returning `Aggregate<Model>`.
    Aggregate { model: String },
    Plain,
}

impl OutputFieldKind {
    pub fn classify(name: &str, output_type: &TypeClass, parent: &OutputTypeKind) -> Self {
        match output_type {
            _ if Self::of_name(name) == Self::FindMany => Self::FindMany,
            TypeClass::Aggregate { model } if parent.is_operation() => Self::Aggregate { model: model.clone() },
            _ => Self::Plain,
        }
    }

    /// The kind a field name implies on its own, for requested fields no
    /// output type declares.
    pub fn of_name(name: &str) -> Self {
        if name.starts_with(FIND_MANY_PREFIX) {
            Self::FindMany
        } else {
            Self::Plain
        }
    }
}
