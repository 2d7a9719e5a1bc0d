use pretty_assertions::assert_eq;
use tessera_validator::prelude::*;

fn file(name: &str, size: u64, mime: &str) -> FileValue {
    FileValue::new(name, size, mime)
}

fn files(n: usize) -> Value {
    Value::from(
        (0..n)
            .map(|i| file(&format!("{i}.txt"), 10, "text/plain"))
            .collect::<Vec<_>>(),
    )
}

#[test]
fn single_file() {
    let v = inp().file();
    assert!(v.validate(file("a.txt", 1, "text/plain")).ok);
    assert_eq!(v.read_mode(), ReadMode::Single);
    assert_eq!(v.validate(Value::Null).errors[0].message, "This field is required.");
    assert_eq!(
        v.validate("a.txt").errors[0].message,
        "Value must be a file or an array of files"
    );
    assert!(!v.validate(files(2)).ok);
}

#[test]
fn multiple_files() {
    let v = inp().file().multiple_files();
    assert_eq!(v.read_mode(), ReadMode::Multi);
    assert!(v.validate(files(3)).ok);
    assert!(v.validate(file("a.txt", 1, "text/plain")).ok);
    assert!(v.validate(files(0)).ok);
    assert!(!v.validate(Value::Array(vec![Value::from("x")])).ok);
}

#[test]
fn file_counts() {
    let v = inp().file().multiple_files().min_files_count(2).max_files_count(3);
    assert_eq!(v.validate(files(1)).errors[0].message, "Minimum number of files is 2. Got 1");
    assert!(v.validate(files(2)).ok);
    assert!(v.validate(files(3)).ok);
    assert_eq!(v.validate(files(4)).errors[0].message, "Maximum number of files is 3. Got 4");
    assert_eq!(
        v.validate(file("a", 1, "x/y")).errors[0].message,
        "Minimum number of files is 2. Got 1"
    );
}

#[test]
fn sizes() {
    let v = inp().file().min_size(10).max_size(1000);
    assert!(v.validate(file("a.bin", 10, "application/octet-stream")).ok);
    assert!(v.validate(file("a.bin", 1000, "application/octet-stream")).ok);
    assert_eq!(
        v.validate(file("a.bin", 9, "application/octet-stream")).errors[0].message,
        "File must be at least 10 bytes"
    );
    assert_eq!(
        v.validate(file("a.bin", 1001, "application/octet-stream")).errors[0].message,
        "File size must not exceed 1000 bytes. Got 1001"
    );
}

#[test]
fn sizes_in_list_mode_report_every_file() {
    let v = inp().file().multiple_files().max_size(100);
    let list = Value::from(vec![file("a", 50, "x/y"), file("b", 150, "x/y")]);
    assert_eq!(
        v.validate(list).errors[0].message,
        "File size must not exceed 100 bytes. Got 50, 150"
    );
}

#[test]
fn mime_types() {
    let v = inp().file().mime_type(["image/png", "image/jpeg"]);
    assert!(v.validate(file("a.png", 1, "image/png")).ok);
    assert!(v.validate(file("a.jpg", 1, "image/jpeg")).ok);
    assert_eq!(
        v.validate(file("a.pdf", 1, "application/pdf")).errors[0].message,
        "File must be of type image/png or image/jpeg. Got application/pdf"
    );
    // exact comparison
    assert!(!v.validate(file("a.png", 1, "IMAGE/PNG")).ok);
}

#[test]
fn zero_byte_and_optional() {
    assert!(inp().file().validate(file("empty", 0, "text/plain")).ok);
    assert!(!inp().file().min_size(1).validate(file("empty", 0, "text/plain")).ok);

    let v = inp().file().optional().max_size(1);
    assert!(v.validate(Value::Undefined).ok);
    assert!(v.validate(Value::Null).ok);
}

#[test]
fn parse_typed() {
    let single = inp().file().max_size(100);
    let parsed = single.parse(file("a.txt", 5, "text/plain")).unwrap();
    assert_eq!(parsed.map(|f| f.name), Some("a.txt".to_owned()));

    let many = inp().file().multiple_files();
    let parsed = many.parse(files(2)).unwrap().unwrap();
    assert_eq!(parsed.len(), 2);
}
