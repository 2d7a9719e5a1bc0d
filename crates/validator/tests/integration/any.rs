use rstest::rstest;
use serde_json::json as j;
use tessera_validator::prelude::*;

use crate::json;

#[rstest]
#[case(Value::from("text"))]
#[case(Value::from(0))]
#[case(Value::Bool(false))]
#[case(json(j!([])))]
#[case(json(j!({ "a": 1 })))]
#[case(Value::from(FileValue::new("a", 1, "x/y")))]
fn accepts_any_present_value(#[case] value: Value) {
    assert!(inp().any().validate(value).ok);
}

#[test]
fn presence() {
    let v = inp().any();
    assert_eq!(v.validate(Value::Null).errors[0].message, "This field is required.");
    assert_eq!(v.validate(Value::Null).errors[0].kind, ErrorKind::MissingRequired);
    assert!(v.optional().validate(Value::Undefined).ok);
}

#[test]
fn custom_rules() {
    let v = inp()
        .any()
        .custom_rule("even", |v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0), "Must be even");
    assert!(v.validate(2).ok);
    assert!(!v.validate(3).ok);
    assert!(!v.validate("2").ok);
}

#[test]
fn transform_with_replaces_the_value() {
    let v = inp().any().transform_with(
        "wrap",
        |v: &Value| RuleOutcome::pass().with_value(Value::Array(vec![v.clone()])),
        "Cannot wrap",
    );
    assert_eq!(v.validate(1).value, json(j!([1])));
}
