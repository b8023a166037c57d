use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The resolved shape of one requested GraphQL field: fragments are already
/// inlined and aliases resolved. Mirrors the `ResolveTree` produced by
/// `graphql-parse-resolve-info`, so the JSON form of that structure can be
/// deserialized directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTree {
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub args: IndexMap<String, Value>,
    /// Sub-selections keyed by the GraphQL type they apply to, then by alias.
    #[serde(default)]
    pub fields_by_type_name: IndexMap<String, IndexMap<String, ResolveTree>>,
}

impl ResolveTree {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            alias: name.clone(),
            name,
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    pub fn with_field(mut self, type_name: &str, field: ResolveTree) -> Self {
        let key = if field.alias.is_empty() {
            field.name.clone()
        } else {
            field.alias.clone()
        };

        self.fields_by_type_name
            .entry(type_name.to_owned())
            .or_default()
            .insert(key, field);

        self
    }

    pub fn with_fields(self, type_name: &str, fields: impl IntoIterator<Item = ResolveTree>) -> Self {
        fields
            .into_iter()
            .fold(self, |tree, field| tree.with_field(type_name, field))
    }

    /// All sub-selections, across every type they were requested on.
    pub fn fields(&self) -> impl Iterator<Item = &ResolveTree> {
        self.fields_by_type_name.values().flat_map(|fields| fields.values())
    }

    /// The first sub-selection of the given field name.
    pub fn field(&self, name: &str) -> Option<&ResolveTree> {
        self.fields().find(|f| f.name == name)
    }

    pub fn is_leaf(&self) -> bool {
        self.fields_by_type_name.values().all(|fields| fields.is_empty())
    }

    /// Follows a dotted path of field names, e.g. `posts.comments`.
    pub fn descend(&self, path: &str) -> Option<&ResolveTree> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |tree, segment| tree.field(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_the_resolve_info_json_shape() {
        let tree: ResolveTree = serde_json::from_value(json!({
            "name": "user",
            "alias": "user",
            "args": { "where": { "id": 1 } },
            "fieldsByTypeName": {
                "User": {
                    "id": { "name": "id", "alias": "id", "args": {}, "fieldsByTypeName": {} },
                    "mail": { "name": "email", "alias": "mail", "args": {}, "fieldsByTypeName": {} }
                }
            }
        }))
        .unwrap();

        let names: Vec<_> = tree.fields().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["id", "email"]);
        assert_eq!(tree.args["where"], json!({ "id": 1 }));
        assert!(tree.field("email").unwrap().is_leaf());
    }

    #[test]
    fn descend_follows_field_names() {
        let tree = ResolveTree::new("user").with_field(
            "User",
            ResolveTree::new("posts").with_field("Post", ResolveTree::new("comments")),
        );

        assert_eq!(tree.descend("posts.comments").unwrap().name, "comments");
        assert!(tree.descend("posts.author").is_none());
        assert_eq!(tree.descend("").unwrap().name, "user");
    }
}
