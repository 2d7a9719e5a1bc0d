use rstest::rstest;
use tessera_validator::prelude::*;

use crate::json;

#[test]
fn basic_types_and_required() {
    let v = inp().boolean();
    assert!(v.validate(true).ok);
    assert!(v.validate(false).ok);
    assert!(!v.validate(Value::Null).ok);
    assert!(!v.validate("true").ok);
    assert!(!v.validate(1).ok);
    assert!(!v.validate(0).ok);
}

#[test]
fn true_false_only() {
    assert!(inp().boolean().is_true().validate(true).ok);
    assert!(!inp().boolean().is_true().validate(false).ok);
    assert!(!inp().boolean().is_true().validate(Value::Null).ok);
    assert!(inp().boolean().is_false().validate(false).ok);
    assert!(!inp().boolean().is_false().validate(true).ok);
}

#[test]
fn equals_and_not_equals() {
    assert!(inp().boolean().equals(true).validate(true).ok);
    assert!(!inp().boolean().equals(true).validate(false).ok);
    assert!(inp().boolean().not_equals(true).validate(false).ok);
    assert!(!inp().boolean().not_equals(false).validate(false).ok);
}

#[rstest]
#[case(Value::from("true"), true)]
#[case(Value::from("false"), false)]
#[case(Value::from("TRUE"), true)]
#[case(Value::from("FALSE"), false)]
#[case(Value::from(1), true)]
#[case(Value::from(0), false)]
#[case(Value::from("1"), true)]
#[case(Value::from("0"), false)]
fn transform_coerces(#[case] input: Value, #[case] expected: bool) {
    let schema = inp().boolean().transform();
    let result = schema.validate(input);
    assert!(result.ok);
    assert_eq!(result.value, Value::Bool(expected));
}

#[rstest]
#[case(Value::from("yes"))]
#[case(Value::from("no"))]
#[case(Value::from("t"))]
#[case(Value::from(" 1 "))]
#[case(Value::from("0 "))]
#[case(Value::from(2))]
#[case(Value::from(-1))]
#[case(json(serde_json::json!({})))]
#[case(json(serde_json::json!([])))]
fn transform_rejects(#[case] input: Value) {
    let schema = inp().boolean().transform();
    let result = schema.validate(input);
    assert!(!result.ok);
    assert_eq!(result.errors[0].message, "Cannot transform value to boolean");
}

#[test]
fn optional() {
    let v = inp().boolean().optional();
    assert!(v.validate(Value::Undefined).ok);
    assert!(v.validate(Value::Null).ok);
    assert!(!v.validate("true").ok);
}
