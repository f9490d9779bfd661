use serde::Deserialize;
use serde_sedf::{
    from_reader, from_slice, from_str, from_value, parse_document, parse_document_with_options,
    parse_value, sedf, Category, CommentStyle, Error, ParserOptions, SedfMap, Value,
};
use std::collections::HashMap;

#[test]
fn test_parse_example_document() {
    let atoms = parse_document(r#"(:name "Ada" :tags #(t nil 3.5))"#).unwrap();
    assert_eq!(atoms.len(), 1);

    let object = atoms[0].as_object().unwrap();
    assert_eq!(object.keys().collect::<Vec<_>>(), vec!["name", "tags"]);
    assert_eq!(object.get("name"), Some(&Value::String("Ada".to_string())));
    assert_eq!(
        object.get("tags"),
        Some(&Value::Array(vec![
            Value::Bool(true),
            Value::Null,
            Value::Number(3.5)
        ]))
    );
}

#[test]
fn test_parse_matches_macro() {
    let parsed = parse_value(
        r#"
        ; inventory record
        (:id 7
         :items #((:sku "A-1" :qty 2)
                  (:sku "B-2" :qty 0))
         :note nil)
        "#,
    )
    .unwrap();

    let built = sedf!({
        "id": 7,
        "items": [
            { "sku": "A-1", "qty": 2 },
            { "sku": "B-2", "qty": 0 }
        ],
        "note": null
    });
    assert_eq!(parsed, built);
}

#[test]
fn test_multiple_top_level_atoms() {
    let atoms = parse_document("1 \"two\" three #() ()\n; done").unwrap();
    assert_eq!(
        atoms,
        vec![
            Value::Number(1.0),
            Value::String("two".to_string()),
            Value::Symbol("three".to_string()),
            Value::Array(vec![]),
            Value::Object(SedfMap::new()),
        ]
    );
}

#[test]
fn test_literal_inference_table() {
    let cases = [
        ("t", Value::Bool(true)),
        ("nil", Value::Null),
        ("0", Value::Number(0.0)),
        ("-7", Value::Number(-7.0)),
        ("6.02e23", Value::Number(6.02e23)),
        (".5", Value::Number(0.5)),
        ("0x1A", Value::Number(26.0)),
        ("0x1p3", Value::Number(8.0)),
        ("-0x.4", Value::Number(-0.25)),
        ("0xZZ", Value::Symbol("0xZZ".to_string())),
        ("T", Value::Symbol("T".to_string())),
        ("false", Value::Symbol("false".to_string())),
        ("1-2", Value::Symbol("1-2".to_string())),
        ("foo.bar", Value::Symbol("foo.bar".to_string())),
        (":kw", Value::Symbol(":kw".to_string())),
    ];
    for (input, expected) in cases {
        assert_eq!(parse_value(input).unwrap(), expected, "input {input:?}");
    }
}

#[test]
fn test_error_kinds_and_categories() {
    let cases: [(&str, Category, fn(&Error) -> bool); 6] = [
        ("(:a 1", Category::Incomplete, |e| {
            matches!(e, Error::UnexpectedEof { .. })
        }),
        ("\"open", Category::Incomplete, |e| {
            matches!(e, Error::UnexpectedEof { .. })
        }),
        ("(a 1)", Category::Malformed, |e| {
            matches!(e, Error::UnexpectedToken { .. })
        }),
        ("#x", Category::Malformed, |e| {
            matches!(e, Error::UnexpectedToken { .. })
        }),
        (")", Category::Malformed, |e| {
            matches!(e, Error::UnexpectedToken { .. })
        }),
        ("(:a |)", Category::Malformed, |e| {
            matches!(e, Error::UnexpectedChar { ch: '|', .. })
        }),
    ];
    for (input, category, check) in cases {
        let err = parse_document(input).unwrap_err();
        assert!(check(&err), "{input:?} gave {err:?}");
        assert_eq!(err.category(), category, "{input:?}");
    }
}

#[test]
fn test_error_location() {
    let err = parse_document("(:a 1\n :b\n  @@ ,)").unwrap_err();
    assert_eq!(err.location(), Some((3, 6)));
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_non_ascii_is_rejected_outside_strings() {
    let err = parse_document("(:name caf\u{e9})").unwrap_err();
    assert!(matches!(err, Error::UnexpectedChar { ch: '\u{e9}', .. }));

    let atoms = parse_document("\"caf\u{e9}\"").unwrap();
    assert_eq!(atoms[0].as_str(), Some("caf\u{e9}"));
}

#[test]
fn test_double_semicolon_comments() {
    let options = ParserOptions::new().with_comments(CommentStyle::DoubleSemicolon);
    let atoms = parse_document_with_options(";; header\n(:a 1) ;; trailing", options.clone())
        .unwrap();
    assert_eq!(atoms.len(), 1);

    assert!(parse_document_with_options("(:a 1) ; single", options).is_err());
    assert!(parse_document("(:a 1) ; single").is_ok());
}

#[derive(Debug, Deserialize, PartialEq)]
struct Record {
    name: String,
    tags: Vec<Option<f64>>,
    flags: HashMap<String, bool>,
}

#[test]
fn test_typed_decoding() {
    let record: Record =
        from_str(r#"(:name "Ada" :tags #(1 nil 3.5) :flags (:admin t))"#).unwrap();
    assert_eq!(record.name, "Ada");
    assert_eq!(record.tags, vec![Some(1.0), None, Some(3.5)]);
    assert_eq!(record.flags.get("admin"), Some(&true));
}

#[test]
fn test_typed_decoding_entry_points_agree() {
    let text = "#(1 2 3)";
    let a: Vec<u16> = from_str(text).unwrap();
    let b: Vec<u16> = from_slice(text.as_bytes()).unwrap();
    let c: Vec<u16> = from_reader(text.as_bytes()).unwrap();
    let d: Vec<u16> = from_value(parse_value(text).unwrap()).unwrap();
    assert_eq!(a, vec![1, 2, 3]);
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(c, d);
}

#[test]
fn test_json_interop() {
    let value = parse_value(r#"(:name "Ada" :tags #(t nil 3.5) :kind :person)"#).unwrap();
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Ada",
            "tags": [true, null, 3.5],
            "kind": ":person"
        })
    );

    let back: Value = serde_json::from_value(json).unwrap();
    // Symbols come back as strings.
    assert_eq!(back.get("kind"), Some(&Value::String(":person".to_string())));
}

#[test]
fn test_recursion_limit() {
    let deep = format!("{}1{}", "(:a ".repeat(300), ")".repeat(300));
    let err = parse_document(&deep).unwrap_err();
    assert!(matches!(err, Error::RecursionLimit { limit: 128, .. }));

    let options = ParserOptions::new().with_max_depth(512);
    assert!(parse_document_with_options(&deep, options).is_ok());
}
