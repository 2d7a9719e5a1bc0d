use chrono::{DateTime, Duration, Months, Utc, Weekday};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tessera_validator::prelude::*;

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().to_utc()
}

#[rstest]
#[case("2024-01-01")]
#[case("2024-01-01T00:00:00Z")]
#[case("2024-01-01T00:00:00.000Z")]
#[case("2024-01-01 00:00")]
#[case("2024/01/01")]
#[case("01/01/2024")]
#[case("Jan 1, 2024")]
#[case("January 1, 2024")]
fn parses_common_layouts(#[case] input: &str) {
    let schema = inp().date();
    let result = schema.validate(input);
    assert!(result.ok, "{input}: {:?}", result.errors);
    assert_eq!(result.value, Value::from(utc("2024-01-01T00:00:00Z")));
}

#[rstest]
#[case(Value::from("not a date"))]
#[case(Value::from("2024-13-01"))]
#[case(Value::from("2024-02-30"))]
#[case(Value::from(1_704_067_200))]
#[case(Value::Bool(true))]
fn rejects_non_dates(#[case] input: Value) {
    let schema = inp().date();
    let result = schema.validate(input);
    assert_eq!(result.errors[0].message, "Value must be a valid date");
    assert_eq!(result.errors[0].kind, ErrorKind::TypeMismatch);
}

#[test]
fn presence() {
    assert_eq!(
        inp().date().validate(Value::Null).errors[0].message,
        "This field is required."
    );
    assert!(inp().date().optional().validate(Value::Undefined).ok);
}

#[test]
fn bounds() {
    let v = inp()
        .date()
        .try_min("2024-01-01")
        .unwrap()
        .try_max("2024-12-31")
        .unwrap();
    assert!(v.validate("2024-06-15").ok);
    assert_eq!(
        v.validate("2023-12-31").errors[0].message,
        "Date must be after or equal to 1/1/2024"
    );
    assert_eq!(
        v.validate("2025-01-01").errors[0].message,
        "Date must be before or equal to 12/31/2024"
    );
    assert!(matches!(
        inp().date().try_min("soon"),
        Err(SchemaError::InvalidDateBound(_))
    ));
}

#[test]
fn future_and_past() {
    let tomorrow = Utc::now() + Duration::days(1);
    let yesterday = Utc::now() - Duration::days(1);
    assert!(inp().date().future().validate(tomorrow).ok);
    assert!(!inp().date().future().validate(yesterday).ok);
    assert!(inp().date().past().validate(yesterday).ok);
    assert_eq!(
        inp().date().past().validate(tomorrow).errors[0].message,
        "Date must be in the past"
    );
}

#[test]
fn weekends_only() {
    let v = inp().date().weekday([Weekday::Sat, Weekday::Sun]);
    assert!(v.validate("2024-01-06").ok);
    assert!(v.validate("2024-01-07").ok);
    assert_eq!(
        v.validate("2024-01-08").errors[0].message,
        "Date must be on Saturday or Sunday"
    );
}

#[test]
fn age() {
    let v = inp().date().age(18);
    let now = Utc::now();
    let adult = now.checked_sub_months(Months::new(18 * 12)).unwrap() - Duration::days(1);
    let minor = now.checked_sub_months(Months::new(17 * 12)).unwrap();
    assert!(v.validate(adult).ok);
    assert_eq!(v.validate(minor).errors[0].message, "Must be at least 18 years old");
}

#[test]
fn format_renders_a_string() {
    let v = inp().date().format("dd/MM/yyyy HH:mm");
    assert_eq!(v.validate("2024-03-09T07:05:00Z").value, Value::from("09/03/2024 07:05"));
    assert_eq!(v.validate("2024-03-09T07:05:00+02:00").value, Value::from("09/03/2024 07:05"));
}

#[test]
fn timezone_then_format() {
    let v = inp()
        .date()
        .try_timezone("Asia/Tokyo")
        .unwrap()
        .format("yyyy-MM-dd HH:mm");
    assert_eq!(v.validate("2024-01-01T20:00:00Z").value, Value::from("2024-01-02 05:00"));

    let v = inp()
        .date()
        .format(DateFormat::new("HH:mm").with_timezone(chrono_tz::America::New_York));
    assert_eq!(v.validate("2024-07-01T16:30:00Z").value, Value::from("12:30"));

    assert!(matches!(
        inp().date().try_timezone("Mars/Olympus"),
        Err(SchemaError::UnknownTimezone(name)) if name == "Mars/Olympus"
    ));
}

#[test]
fn configured_formats_and_default_timezone() {
    let config = DateConfig {
        formats: vec!["dd.MM.yyyy".to_owned()],
        default_timezone: chrono_tz::Europe::Berlin,
        ..DateConfig::default()
    };
    let v = inp().date_with(config);
    let result = v.validate("15.01.2024");
    assert!(result.ok);
    assert_eq!(result.value, Value::from(utc("2024-01-14T23:00:00Z")));
}

#[test]
fn local_time_in_spring_gap_lands_after_it() {
    let config = DateConfig {
        default_timezone: chrono_tz::America::New_York,
        ..DateConfig::default()
    };
    let v = inp().date_with(config).format("yyyy-MM-dd HH:mm:ss");
    let result = v.validate("2024-03-10T02:30:00");
    assert!(result.ok, "{:?}", result.errors);
    assert_eq!(result.value, Value::from("2024-03-10 03:30:00"));
}

#[test]
fn chaining() {
    let v = inp()
        .date()
        .try_min("2024-01-01")
        .unwrap()
        .try_max("2024-12-31")
        .unwrap()
        .weekday([Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri])
        .format("yyyy-MM-dd");

    assert_eq!(v.validate("2024-01-08").value, Value::from("2024-01-08"));
    let result = v.validate("2024-01-06");
    assert_eq!(result.errors[0].code, "weekday");
    let result = v.validate("2023-12-30");
    let codes: Vec<_> = result.errors.iter().map(|e| e.code.as_ref()).collect();
    assert_eq!(codes, ["min", "weekday"]);
}
