use crate::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_setup::BLOG_DMMF;

fn blog() -> SchemaGraph {
    SchemaGraph::load(BLOG_DMMF).unwrap()
}

fn minimal_document(models: serde_json::Value) -> String {
    json!({
        "datamodel": { "enums": [], "models": models },
        "schema": {
            "inputObjectTypes": { "prisma": [] },
            "outputObjectTypes": { "prisma": [] },
            "enumTypes": { "prisma": [] }
        }
    })
    .to_string()
}

fn scalar_field(name: &str, typ: &str) -> serde_json::Value {
    json!({ "name": name, "kind": "scalar", "isList": false, "isRequired": true, "type": typ })
}

#[test]
fn models_are_loaded_with_admin_metadata() {
    let graph = blog();
    let names: Vec<_> = graph.models().iter().map(|m| m.id.as_str()).collect();

    assert_eq!(names, vec!["User", "Post", "Comment"]);

    let user = graph.find_model("User").unwrap();
    assert_eq!(user.id_field.as_deref(), Some("id"));
    assert_eq!(user.field("firstName").unwrap().title, "First Name");
    assert!(!user.field("id").unwrap().update);
    assert!(user.field("posts").unwrap().update);
    assert!(user.field("posts").unwrap().is_list_relation());

    let post = graph.find_model("Post").unwrap();
    assert!(!post.field("authorId").unwrap().update);
    assert!(!post.field("updatedAt").unwrap().update);
    assert!(post.field("title").unwrap().update);
    assert!(post.field("author").unwrap().is_relation());
    assert!(!post.field("author").unwrap().list);
}

#[test]
fn is_model_includes_model_enums() {
    let graph = blog();

    assert!(graph.is_model("User"));
    assert!(graph.is_model("Role"));
    assert!(!graph.is_model("SortOrder"));
    assert!(!graph.is_model("AggregateUser"));
}

#[test]
fn model_aliases_only_apply_to_resolution() {
    let graph = blog();

    assert!(graph.find_model("Account").is_none());
    assert_eq!(graph.resolve_model("Account").map(|m| m.id.as_str()), Some("User"));
    assert_eq!(graph.resolve_model("Profile").map(|m| m.id.as_str()), Some("User"));
    assert!(graph.resolve_model("Nope").is_none());
}

#[test]
fn find_field_walks_model_then_field() {
    let graph = blog();

    assert_eq!(graph.find_field("Post", "author").unwrap().field_type, "User");
    assert!(graph.find_field("Post", "unknown").is_none());
    assert!(graph.find_field("Unknown", "id").is_none());
}

#[test]
fn output_types_are_classified_once() {
    let graph = blog();

    assert_eq!(
        graph.find_output_type("AggregateUser").unwrap().kind,
        OutputTypeKind::Aggregate {
            model: "User".to_owned()
        }
    );
    assert_eq!(
        graph.find_output_type("UserGroupByOutputType").unwrap().kind,
        OutputTypeKind::GroupBy {
            model: "User".to_owned()
        }
    );
    assert_eq!(
        graph.find_output_type("AffectedRowsOutput").unwrap().kind,
        OutputTypeKind::AffectedRows
    );
    assert_eq!(graph.find_output_type("Post").unwrap().kind, OutputTypeKind::Model);
    assert_eq!(
        graph.find_output_type("UserCountOutputType").unwrap().kind,
        OutputTypeKind::Library
    );

    let query = graph.find_output_type("Query").unwrap();
    assert_eq!(query.kind, OutputTypeKind::Operation(OperationKind::Query));
    assert_eq!(query.field("findManyUser").unwrap().kind, OutputFieldKind::FindMany);
    assert_eq!(
        query.field("aggregateUser").unwrap().kind,
        OutputFieldKind::Aggregate {
            model: "User".to_owned()
        }
    );
    assert_eq!(query.field("findUniqueUser").unwrap().kind, OutputFieldKind::Plain);

    let role = &graph.find_output_type("User").unwrap().field("role").unwrap().output_type;
    assert_eq!(role.class, TypeClass::Model);
    assert_eq!(role.location, TypeLocation::EnumTypes);
}

#[test]
fn input_type_references_keep_their_alternatives() {
    let graph = blog();
    let where_input = graph.find_input_type("UserWhereInput").unwrap();
    let and = &where_input.fields[0];

    assert_eq!(and.name, "AND");
    assert_eq!(and.input_types.len(), 2);
    assert!(and.input_types.iter().all(|t| t.name == "UserWhereInput"));
    assert!(and.input_types[1].is_list);
    assert!(and.input_types[0].is_input_object());
    assert_eq!(where_input.namespace, Namespace::Prisma);
}

#[test]
fn collections_iterate_in_emission_order() {
    let graph = blog();

    let outputs: Vec<_> = graph.output_types().map(|t| t.name.as_str()).collect();
    assert_eq!(&outputs[..4], &["User", "Post", "Comment", "Query"]);

    let enums: Vec<_> = graph.enum_types().map(|t| t.name.as_str()).collect();
    assert_eq!(enums, vec!["SortOrder", "QueryMode", "UserScalarFieldEnum", "Role"]);

    assert_eq!(graph.input_types().next().unwrap().name, "UserWhereInput");
}

#[test]
fn missing_schema_section_is_a_load_error() {
    let document = json!({ "datamodel": { "models": [] } }).to_string();
    let err = SchemaGraph::load(&document).unwrap_err();

    assert!(matches!(err, SchemaLoadError::Malformed(_)));
}

#[test]
fn missing_prisma_namespace_is_a_load_error() {
    let document = json!({
        "datamodel": { "models": [] },
        "schema": {
            "inputObjectTypes": { "model": [] },
            "outputObjectTypes": { "prisma": [] },
            "enumTypes": { "prisma": [] }
        }
    })
    .to_string();

    let err = SchemaGraph::load(&document).unwrap_err();
    assert!(matches!(err, SchemaLoadError::Malformed(_)));
}

#[test]
fn relations_to_unknown_models_are_rejected() {
    let document = minimal_document(json!([{
        "name": "Post",
        "fields": [
            scalar_field("id", "Int"),
            { "name": "author", "kind": "object", "isList": false, "isRequired": false, "type": "Writer" }
        ]
    }]));

    let err = SchemaGraph::load(&document).unwrap_err();
    let expected = "Relation field `Post.author` points to `Writer`, which is neither a model nor a composite type";

    assert_eq!(err.to_string(), expected);
}

#[test]
fn unnamed_models_are_rejected() {
    let document = minimal_document(json!([{ "name": "", "fields": [] }]));
    let err = SchemaGraph::load(&document).unwrap_err();

    assert!(matches!(err, SchemaLoadError::EmptyName { kind: "model" }));
}

#[test]
fn id_field_falls_back_to_primary_key_then_unique() {
    let document = minimal_document(json!([
        {
            "name": "Membership",
            "fields": [scalar_field("userId", "Int"), scalar_field("groupId", "Int")],
            "primaryKey": { "name": null, "fields": ["groupId", "userId"] }
        },
        {
            "name": "Setting",
            "fields": [
                scalar_field("value", "String"),
                { "name": "key", "kind": "scalar", "isList": false, "isRequired": true, "isUnique": true, "type": "String" }
            ]
        }
    ]));

    let graph = SchemaGraph::load(&document).unwrap();

    assert_eq!(graph.find_model("Membership").unwrap().id_field.as_deref(), Some("groupId"));
    assert_eq!(graph.find_model("Setting").unwrap().id_field.as_deref(), Some("key"));
}

#[test]
fn several_documents_merge_and_the_first_declaration_wins() {
    let extra = minimal_document(json!([
        { "name": "User", "fields": [scalar_field("nickname", "String")] },
        { "name": "Tag", "fields": [scalar_field("label", "String")] }
    ]));

    let graph = SchemaGraph::load_many([BLOG_DMMF, extra.as_str()]).unwrap();

    assert_eq!(graph.models().len(), 4);
    assert!(graph.find_field("User", "nickname").is_none());
    assert!(graph.find_field("Tag", "label").is_some());
}
