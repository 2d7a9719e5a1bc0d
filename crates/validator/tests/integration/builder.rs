use rstest::rstest;
use tessera_validator::prelude::*;

#[rstest]
#[case(SchemaKind::String, inp().string().kind())]
#[case(SchemaKind::Number, inp().number().kind())]
#[case(SchemaKind::Boolean, inp().boolean().kind())]
#[case(SchemaKind::Date, inp().date().kind())]
#[case(SchemaKind::File, inp().file().kind())]
#[case(SchemaKind::Array, inp().array().kind())]
#[case(SchemaKind::Object, inp().object().kind())]
#[case(SchemaKind::Any, inp().any().kind())]
fn input_selects_kind(#[case] expected: SchemaKind, #[case] actual: SchemaKind) {
    assert_eq!(actual, expected);
}

#[test]
fn every_validator_starts_required() {
    let schemas: Vec<SchemaRef> = vec![
        inp().string().into_schema_ref(),
        inp().number().into_schema_ref(),
        inp().boolean().into_schema_ref(),
        inp().date().into_schema_ref(),
        inp().file().into_schema_ref(),
        inp().array().into_schema_ref(),
        inp().object().into_schema_ref(),
        inp().any().into_schema_ref(),
    ];
    for schema in schemas {
        assert!(schema.has_rule("required"), "{:?}", schema.kind());
        assert!(!schema.evaluate(Value::Undefined).ok());
    }
}

#[test]
fn optional_then_required_restores_presence() {
    let v = inp().string().optional().required();
    assert!(!v.validate(Value::Null).ok);
    assert_eq!(v.node().rules()[0].title(), "required");
}

#[test]
fn schemas_are_reusable_values() {
    let base = inp().string().trim();
    let short = base.clone().max(3);
    let long = base.min(10);
    assert!(short.validate(" abc ").ok);
    assert!(!long.validate(" abc ").ok);
}

#[test]
fn without_rule() {
    let v = inp().number().min(10.0).without_rule("min");
    assert!(v.validate(1).ok);
    assert!(!v.has_rule("min"));
}
