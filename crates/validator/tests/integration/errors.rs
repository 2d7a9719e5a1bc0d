use pretty_assertions::assert_eq;
use serde_json::json as j;
use tessera_validator::prelude::*;

use crate::json;

fn profile() -> ObjectValidator {
    inp()
        .object()
        .field("name", inp().string().min(3).max(20))
        .field("tags", inp().array().every(inp().string().min(2)))
}

#[test]
fn grouped_json_payload() {
    let schema = profile();
    let result = schema.validate(json(j!({ "name": "Al", "tags": ["ok", "x", "y"] })));
    let errors: ValidationErrors = result.errors.into();
    assert_eq!(
        errors.to_json(),
        j!({
            "errors": {
                "name": ["String must be at least 3 characters long"],
                "tags[1]": ["String must be at least 2 characters long"],
                "tags[2]": ["String must be at least 2 characters long"],
                "tags": ["All items must pass validation"],
            }
        })
    );
}

#[test]
fn context_key_and_source_are_applied() {
    let ctx = ValidateContext::new()
        .with_key("profile")
        .with_source(Source::Body);
    let schema = profile();
    let result = schema.validate_with(json(j!({ "name": "Al", "tags": [] })), &ctx);

    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.key, "profile.name");
    assert_eq!(error.from, Some(Source::Body));
    assert_eq!(error.param("limit"), Some("3"));
}

#[test]
fn static_and_computed_prefixes() {
    let v = inp().string().min(2);

    let ctx = ValidateContext::new().with_key("items").with_path_prefix("[4]");
    assert_eq!(v.validate_with("x".into(), &ctx).errors[0].key, "items[4]");

    let ctx = ValidateContext::new()
        .with_key("user")
        .with_computed_prefix(|value| format!("by_len_{}", value.as_str().map_or(0, str::len)));
    assert_eq!(v.validate_with("x".into(), &ctx).errors[0].key, "user.by_len_1");
}

#[test]
fn serialized_error_shape() {
    let ctx = ValidateContext::new().with_key("q").with_source(Source::Query);
    let schema = inp().number().max(5.0);
    let result = schema.validate_with(9.into(), &ctx);
    let error = serde_json::to_value(&result.errors[0]).unwrap();
    assert_eq!(
        error,
        j!({
            "message": "Number must be less than or equal to 5",
            "key": "q",
            "from": "query",
            "code": "max",
            "kind": "constraint_violation",
            "params": [["limit", "5"]],
        })
    );
}

#[test]
fn into_result_and_display() {
    let err = inp().string().email().validate("nope").into_result().unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.messages_for(""), ["Invalid email address"]);
    assert!(err.to_string().starts_with("Validation failed with 1 error(s):"));

    let ok = inp().string().trim().validate(" ok ").into_result().unwrap();
    assert_eq!(ok, Value::from("ok"));
}

#[test]
fn schema_errors_are_reported_up_front() {
    let err = inp().string().try_regex("(").unwrap_err();
    assert!(matches!(err, SchemaError::InvalidPattern { ref pattern, .. } if pattern == "("));

    let err = inp().number().try_range(10.0, 1.0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid range: min (10) is greater than max (1)"
    );
}
