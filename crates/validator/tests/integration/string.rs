use rstest::rstest;
use tessera_validator::prelude::*;

use crate::json;

#[test]
fn basic_types() {
    let v = inp().string();
    assert!(v.validate("hello").ok);
    assert!(v.validate("").ok);
    assert!(!v.validate(123).ok);
    assert!(!v.validate(Value::Null).ok);
    assert!(!v.validate(Value::Undefined).ok);
}

#[rstest]
#[case("  hello  ")]
#[case("\n\thello\n")]
#[case("hello")]
fn trim_yields_bare_text(#[case] input: &str) {
    assert_eq!(inp().string().trim().validate(input).value, Value::from("hello"));
}

#[test]
fn length_constraints() {
    assert!(inp().string().max(5).validate("hello").ok);
    assert!(!inp().string().max(5).validate("hello!").ok);
    assert!(!inp().string().min(3).validate("hi").ok);
    assert!(inp().string().length(4).validate("test").ok);
    assert!(!inp().string().length(4).validate("tests").ok);
}

#[rstest]
#[case("test@example.com", true)]
#[case("test.name@example.co.uk", true)]
#[case("invalid.email", false)]
#[case("@example.com", false)]
#[case("test@", false)]
#[case("test@.com", false)]
fn email(#[case] input: &str, #[case] ok: bool) {
    assert_eq!(inp().string().email().validate(input).ok, ok);
}

#[rstest]
#[case("https://example.com", true)]
#[case("http://localhost:3000", true)]
#[case("ftp://files.example.com", true)]
#[case("not-a-url", false)]
#[case("http://", false)]
fn url(#[case] input: &str, #[case] ok: bool) {
    assert_eq!(inp().string().url().validate(input).ok, ok);
}

#[rstest]
#[case("Hello", true)]
#[case("HELLO", false)]
#[case("hello", false)]
#[case("Hello123", false)]
fn regex(#[case] input: &str, #[case] ok: bool) {
    let v = inp().string().try_regex("^[A-Z][a-z]+$").unwrap();
    assert_eq!(v.validate(input).ok, ok);
}

#[test]
fn content_rules() {
    let v = inp().string().includes("test").starts_with("unit").ends_with("now");
    assert!(v.validate("unit-test-now").ok);
    assert!(!v.validate("unit-testing-later").ok);
    assert!(!v.validate("not-test-now").ok);
}

#[test]
fn case_transformations() {
    assert_eq!(inp().string().to_lower_case().validate("MiXeD").value, Value::from("mixed"));
    assert_eq!(inp().string().to_upper_case().validate("hello").value, Value::from("HELLO"));
}

#[rstest]
#[case("192.168.1.1", true)]
#[case("255.255.255.255", true)]
#[case("256.1.2.3", false)]
#[case("1.2.3.256", false)]
#[case("2001:0db8:85a3:0000:0000:8a2e:0370:7334", true)]
#[case("fe80::1", true)]
#[case("::1", true)]
#[case("2001:0db8:85a3:0000:0000:8a2e:0370:7334:extra", false)]
fn ip(#[case] input: &str, #[case] ok: bool) {
    assert_eq!(inp().string().ip().validate(input).ok, ok);
}

#[rstest]
#[case("SGVsbG8gV29ybGQ=", true)]
#[case("SGVsbG8=", true)]
#[case("SGVsbG8", true)]
#[case("SGVsbG8==", true)]
#[case("SGVsbG8%", false)]
#[case("SGVsbG8===", false)]
fn base64(#[case] input: &str, #[case] ok: bool) {
    assert_eq!(inp().string().base64().validate(input).ok, ok);
}

#[test]
fn transformers_run_before_checks_regardless_of_order() {
    let v = inp()
        .string()
        .trim()
        .min(3)
        .max(10)
        .try_regex("^[a-z]+$")
        .unwrap()
        .to_lower_case();

    let result = v.validate("  HELLO  ");
    assert!(result.ok);
    assert_eq!(result.value, Value::from("hello"));
    assert!(!v.validate("hi").ok);
    assert!(!v.validate("hello world").ok);
    assert!(!v.validate("Hello123").ok);
}

#[test]
fn optional_still_checks_type() {
    let v = inp().string().optional();
    assert!(v.validate(Value::Undefined).ok);
    assert!(v.validate(Value::Null).ok);
    assert!(!v.validate(123).ok);
    assert!(!v.validate(json(serde_json::json!({}))).ok);
}

#[test]
fn every_violation_is_reported() {
    let v = inp().string().min(10).email().starts_with("x");
    let result = v.validate("abc");
    let codes: Vec<_> = result.errors.iter().map(|e| e.code.as_ref()).collect();
    assert_eq!(codes, ["min", "email", "startsWith"]);
}

#[rstest]
#[case("4.5", Some(4.5))]
#[case("-0.25", Some(-0.25))]
#[case("10", Some(10.0))]
#[case("1e5", None)]
#[case(" 123", None)]
#[case("+7", None)]
#[case("1,000", None)]
#[case("Infinity", None)]
fn to_number(#[case] input: &str, #[case] expected: Option<f64>) {
    let schema = inp().string().to_number();
    let result = schema.validate(input);
    match expected {
        Some(n) => {
            assert!(result.ok);
            assert_eq!(result.value, Value::Number(n));
        }
        None => {
            assert!(!result.ok);
            assert_eq!(result.errors[0].message, "Value must be a valid number");
            assert_eq!(result.errors[0].kind, ErrorKind::TransformFailure);
        }
    }
}

#[test]
fn to_number_then_number_rules() {
    let port = inp().string().trim().to_number().integer().range(1.0, 65535.0);
    assert_eq!(port.validate(" 8080 ").value, Value::from(8080));
    assert_eq!(
        port.validate("70000").errors[0].message,
        "Number must be between 1 and 65535"
    );
    assert!(!port.validate("80.5").ok);
    assert_eq!(port.kind(), SchemaKind::Number);
}
