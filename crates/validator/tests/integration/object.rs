use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json as j;
use tessera_validator::prelude::*;

use crate::{init_tracing, json};

fn signup() -> ObjectValidator {
    inp()
        .object()
        .field("email", inp().string().trim().email())
        .field("age", inp().number().integer().min(18.0))
        .field("nickname", inp().string().optional().max(12))
        .field(
            "address",
            inp()
                .object()
                .field("city", inp().string().min(2))
                .field("zip", inp().string().trim().to_number().integer()),
        )
}

#[test]
fn valid_payload_is_transformed() {
    let schema = signup();
    let result = schema.validate(json(j!({
        "email": "  ann@example.com ",
        "age": 30,
        "address": { "city": "Oslo", "zip": " 0150 " },
    })));
    assert!(result.ok, "{:?}", result.errors);
    assert_eq!(result.value.get("email"), &Value::from("ann@example.com"));
    assert_eq!(result.value.get("address").get("zip"), &Value::from(150));
    // missing optional keys are not materialized
    assert!(result.value.as_object().is_some_and(|m| !m.contains_key("nickname")));
}

#[test]
fn field_errors_use_dotted_keys() {
    init_tracing();
    let schema = signup();
    let result = schema.validate(json(j!({
        "email": "nope",
        "age": 12.5,
        "address": { "city": "X", "zip": "abc" },
    })));
    assert!(!result.ok);
    assert_eq!(result.messages_for("email"), ["Invalid email address"]);
    assert_eq!(
        result.messages_for("age"),
        ["Number must be an integer", "Number must be greater than or equal to 18"]
    );
    assert_eq!(
        result.messages_for("address.city"),
        ["String must be at least 2 characters long"]
    );
    assert_eq!(
        result.messages_for("address.zip")[0],
        "Value must be a valid number"
    );
    assert!(result
        .errors
        .iter()
        .all(|e| e.kind == ErrorKind::NestedFieldFailure));
}

#[test]
fn missing_required_fields() {
    let schema = signup();
    let result = schema.validate(json(j!({})));
    assert_eq!(result.messages_for("email"), ["This field must be a string and is required."]);
    assert_eq!(result.messages_for("age"), ["This field is required."]);
    assert_eq!(result.messages_for("address"), ["This field is required."]);
    assert!(result.messages_for("nickname").is_empty());
}

#[test]
fn fields_are_skipped_when_the_object_fails() {
    let v = inp().object().min_keys(2).field("a", inp().string());
    let result = v.validate(json(j!({ "a": 1 })));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, "minKeys");

    let result = v.validate(json(j!([1, 2])));
    assert_eq!(result.errors[0].message, "Value must be an object, not an array");
}

#[test]
fn key_rules() {
    assert!(inp().object().has_key("id").validate(json(j!({ "id": 1 }))).ok);
    assert_eq!(
        inp().object().has_key("id").validate(json(j!({}))).errors[0].message,
        "Object must have key \"id\""
    );
    assert!(!inp().object().max_keys(1).validate(json(j!({ "a": 1, "b": 2 }))).ok);

    let exact = inp().object().exact_keys(["a", "b"]);
    assert!(exact.validate(json(j!({ "b": 1, "a": 2 }))).ok);
    assert!(!exact.validate(json(j!({ "a": 1 }))).ok);
    assert!(!exact.validate(json(j!({ "a": 1, "b": 2, "c": 3 }))).ok);
}

#[test]
fn optional_nested_object() {
    let v = inp()
        .object()
        .field("meta", inp().object().optional().field("x", inp().number()));
    assert!(v.validate(json(j!({}))).ok);
    assert!(v.validate(json(j!({ "meta": null }))).ok);
    assert_eq!(
        v.validate(json(j!({ "meta": {} }))).messages_for("meta.x"),
        ["This field is required."]
    );
}

#[derive(Debug, Deserialize, PartialEq)]
struct Login {
    user: String,
    remember: bool,
}

#[test]
fn deserialize_transformed_value() {
    let v = inp()
        .object()
        .field("user", inp().string().trim())
        .field("remember", inp().boolean().transform());
    let result = v.validate(json(j!({ "user": " ann ", "remember": "TRUE" })));
    assert_eq!(
        result.deserialize::<Login>().unwrap(),
        Login {
            user: "ann".into(),
            remember: true,
        }
    );
}
