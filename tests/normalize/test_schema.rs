use pipewright::core::normalize::{Field, NormalizeError, Schema};
use serde_json::json;

fn container_like() -> Schema {
    Schema::new("Invalid entry given")
        .scalar_shorthand("image")
        .field(Field::required("image", "Image missing").text("Invalid image"))
        .field(Field::optional("args").string_seq("Invalid args"))
        .field(
            Field::optional("workingdir")
                .renamed("workingDir")
                .text("Invalid workingdir"),
        )
}

#[test]
fn test_scalar_shorthand_promotes_non_mappings() {
    let schema = container_like();
    let canonical = schema.normalize(&json!("docker.io/centos")).unwrap();
    assert_eq!(canonical.get("image"), Some(&json!("docker.io/centos")));
}

#[test]
fn test_without_shorthand_non_mapping_is_invalid() {
    let schema = Schema::new("Invalid entry given")
        .field(Field::required("image", "Image missing").text("Invalid image"));
    let err = schema.normalize(&json!("docker.io/centos")).unwrap_err();
    assert_eq!(err, NormalizeError::data("Invalid entry given"));
}

#[test]
fn test_required_field_missing_uses_field_message() {
    let schema = container_like();
    let err = schema.normalize(&json!({"args": ["x"]})).unwrap_err();
    assert_eq!(err, NormalizeError::data("Image missing"));
}

#[test]
fn test_null_counts_as_absent() {
    let schema = container_like();
    let err = schema.normalize(&json!({"image": null})).unwrap_err();
    assert_eq!(err, NormalizeError::data("Image missing"));

    let canonical = schema
        .normalize(&json!({"image": "img", "args": null}))
        .unwrap();
    assert!(!canonical.contains_key("args"));
}

#[test]
fn test_optional_absent_is_omitted() {
    let schema = container_like();
    let canonical = schema.normalize(&json!({"image": "img"})).unwrap();
    assert_eq!(canonical.len(), 1);
    assert!(!canonical.contains_key("args"));
    assert!(!canonical.contains_key("workingDir"));
}

#[test]
fn test_default_injected_when_absent() {
    let schema = Schema::new("Invalid entry given")
        .field(Field::optional("timeout").with_default(json!(3600)));
    let canonical = schema.normalize(&json!({})).unwrap();
    assert_eq!(canonical.get("timeout"), Some(&json!(3600)));

    let canonical = schema.normalize(&json!({"timeout": 60})).unwrap();
    assert_eq!(canonical.get("timeout"), Some(&json!(60)));
}

#[test]
fn test_rename_emits_canonical_key() {
    let schema = container_like();
    let canonical = schema
        .normalize(&json!({"image": "img", "workingdir": "/src"}))
        .unwrap();
    assert_eq!(canonical.get("workingDir"), Some(&json!("/src")));
    assert!(!canonical.contains_key("workingdir"));
}

#[test]
fn test_lookup_falls_back_to_canonical_spelling() {
    let schema = container_like();
    let canonical = schema
        .normalize(&json!({"image": "img", "workingDir": "/src"}))
        .unwrap();
    assert_eq!(canonical.get("workingDir"), Some(&json!("/src")));
}

#[test]
fn test_source_spelling_wins_over_canonical() {
    let schema = container_like();
    let canonical = schema
        .normalize(&json!({"image": "img", "workingdir": "/a", "workingDir": "/b"}))
        .unwrap();
    assert_eq!(canonical.get("workingDir"), Some(&json!("/a")));
}

#[test]
fn test_unknown_keys_dropped() {
    let schema = container_like();
    let canonical = schema
        .normalize(&json!({"image": "img", "flavor": "extra"}))
        .unwrap();
    assert!(!canonical.contains_key("flavor"));
}

#[test]
fn test_output_follows_field_declaration_order() {
    let schema = container_like();
    let canonical = schema
        .normalize(&json!({"workingdir": "/src", "args": "x", "image": "img"}))
        .unwrap();
    let keys: Vec<&String> = canonical.keys().collect();
    assert_eq!(keys, vec!["image", "args", "workingDir"]);
}

#[test]
fn test_text_shape_requires_non_empty_string() {
    let schema = container_like();
    for bad in [json!(""), json!(7), json!({}), json!(["img"])] {
        let err = schema.normalize(&json!({ "image": bad })).unwrap_err();
        assert_eq!(err, NormalizeError::data("Invalid image"));
    }
}

#[test]
fn test_scalar_shape_keeps_value_as_is() {
    let schema =
        Schema::new("Invalid entry given").field(Field::optional("level").scalar("Invalid level"));
    for good in [json!("0"), json!(42), json!(true)] {
        let canonical = schema
            .normalize(&json!({ "level": good.clone() }))
            .unwrap();
        assert_eq!(canonical.get("level"), Some(&good));
    }
    for bad in [json!(["0"]), json!({})] {
        let err = schema.normalize(&json!({ "level": bad })).unwrap_err();
        assert_eq!(err, NormalizeError::data("Invalid level"));
    }
}

#[test]
fn test_string_seq_shape() {
    let schema = container_like();

    let canonical = schema
        .normalize(&json!({"image": "img", "args": "one"}))
        .unwrap();
    assert_eq!(canonical.get("args"), Some(&json!(["one"])));

    let canonical = schema
        .normalize(&json!({"image": "img", "args": ["one", "two"]}))
        .unwrap();
    assert_eq!(canonical.get("args"), Some(&json!(["one", "two"])));

    let canonical = schema
        .normalize(&json!({"image": "img", "args": []}))
        .unwrap();
    assert_eq!(canonical.get("args"), Some(&json!([])));

    for bad in [json!(7), json!(["one", 2]), json!({"a": 1})] {
        let err = schema
            .normalize(&json!({"image": "img", "args": bad}))
            .unwrap_err();
        assert_eq!(err, NormalizeError::data("Invalid args"));
    }
}

#[test]
fn test_nested_schema_normalizes_recursively() {
    let inner = Schema::new("Invalid security context").field(
        Field::optional("runasuser")
            .renamed("runAsUser")
            .scalar("Invalid runAsUser"),
    );
    let schema = Schema::new("Invalid entry given").field(
        Field::optional("securitycontext")
            .renamed("securityContext")
            .nested(inner, "Invalid security context"),
    );

    let canonical = schema
        .normalize(&json!({"securitycontext": {"runasuser": "0", "extra": true}}))
        .unwrap();
    assert_eq!(
        canonical.get("securityContext"),
        Some(&json!({"runAsUser": "0"}))
    );

    let err = schema
        .normalize(&json!({"securitycontext": "root"}))
        .unwrap_err();
    assert_eq!(err, NormalizeError::data("Invalid security context"));
}

#[test]
fn test_nested_empty_mapping_preserved() {
    let inner = Schema::new("Invalid security context");
    let schema = Schema::new("Invalid entry given").field(
        Field::optional("securitycontext")
            .renamed("securityContext")
            .nested(inner, "Invalid security context"),
    );
    let canonical = schema.normalize(&json!({"securitycontext": {}})).unwrap();
    assert_eq!(canonical.get("securityContext"), Some(&json!({})));
}

#[test]
fn test_normalizing_canonical_output_is_identity() {
    let schema = container_like();
    let once = schema
        .normalize(&json!({"image": "img", "args": "x", "workingdir": "/src"}))
        .unwrap();
    let twice = schema.normalize(&serde_json::Value::Object(once.clone())).unwrap();
    assert_eq!(once, twice);
}
