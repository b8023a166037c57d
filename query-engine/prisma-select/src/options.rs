use crate::ResolveTree;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::{fmt, sync::Arc};

/// Field name to inclusion flag.
pub type FieldMap = IndexMap<String, bool>;

type ComputeDefaults = dyn Fn(&ResolveTree) -> FieldMap + Send + Sync;
type ComputeExclusions = dyn Fn(&ResolveTree) -> Vec<String> + Send + Sync;

/// Per-call configuration of the selection pruner, keyed by model name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrismaSelectOptions {
    /// Fields always selected for a model, unless excluded.
    pub default_fields: IndexMap<String, DefaultFields>,
    /// Fields never selected for a model, even when requested.
    pub exclude_fields: IndexMap<String, ExcludeFields>,
    /// Reject requested fields the model does not declare instead of
    /// dropping them.
    pub strict: bool,
    /// Model used by entry points requiring a root when the root type is not
    /// a model.
    pub fallback_model: Option<String>,
    pub empty_selection: EmptySelection,
}

/// What to do with a selection left without any field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptySelection {
    /// Select the model's id field.
    #[default]
    PrimaryKey,
    /// Return the empty selection as is.
    Keep,
}

#[derive(Clone)]
pub enum DefaultFields {
    Fixed(FieldMap),
    /// Computed from the requested sub-tree of the model.
    Computed(Arc<ComputeDefaults>),
}

#[derive(Clone)]
pub enum ExcludeFields {
    Fixed(Vec<String>),
    /// Computed from the requested sub-tree of the model.
    Computed(Arc<ComputeExclusions>),
}

impl PrismaSelectOptions {
    pub fn with_default_fields<'a>(mut self, model: &str, fields: impl IntoIterator<Item = &'a str>) -> Self {
        let fields = fields.into_iter().map(|f| (f.to_owned(), true)).collect();
        self.default_fields.insert(model.to_owned(), DefaultFields::Fixed(fields));
        self
    }

    pub fn with_excluded_fields<'a>(mut self, model: &str, fields: impl IntoIterator<Item = &'a str>) -> Self {
        let fields = fields.into_iter().map(ToOwned::to_owned).collect();
        self.exclude_fields.insert(model.to_owned(), ExcludeFields::Fixed(fields));
        self
    }

    pub fn with_fallback_model(mut self, model: &str) -> Self {
        self.fallback_model = Some(model.to_owned());
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn keep_empty_selections(mut self) -> Self {
        self.empty_selection = EmptySelection::Keep;
        self
    }

    pub(crate) fn defaults_for(&self, model: &str, tree: &ResolveTree) -> FieldMap {
        match self.default_fields.get(model) {
            Some(DefaultFields::Fixed(fields)) => fields.clone(),
            Some(DefaultFields::Computed(compute)) => compute(tree),
            None => FieldMap::new(),
        }
    }

    pub(crate) fn exclusions_for(&self, model: &str, tree: &ResolveTree) -> Vec<String> {
        match self.exclude_fields.get(model) {
            Some(ExcludeFields::Fixed(fields)) => fields.clone(),
            Some(ExcludeFields::Computed(compute)) => compute(tree),
            None => Vec::new(),
        }
    }
}

impl DefaultFields {
    pub fn computed(compute: impl Fn(&ResolveTree) -> FieldMap + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(compute))
    }
}

impl ExcludeFields {
    pub fn computed(compute: impl Fn(&ResolveTree) -> Vec<String> + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(compute))
    }
}

impl From<FieldMap> for DefaultFields {
    fn from(fields: FieldMap) -> Self {
        Self::Fixed(fields)
    }
}

impl From<Vec<String>> for ExcludeFields {
    fn from(fields: Vec<String>) -> Self {
        Self::Fixed(fields)
    }
}

impl<'de> Deserialize<'de> for DefaultFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        FieldMap::deserialize(deserializer).map(Self::Fixed)
    }
}

impl<'de> Deserialize<'de> for ExcludeFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(Self::Fixed)
    }
}

impl fmt::Debug for DefaultFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(fields) => f.debug_tuple("Fixed").field(fields).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl fmt::Debug for ExcludeFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(fields) => f.debug_tuple("Fixed").field(fields).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
