use dremelgen_core::Document;
use schemars::schema_for;

#[test]
fn json_schema_uses_record_field_names() {
    let schema = schema_for!(Vec<Document>);
    let json = serde_json::to_value(&schema).expect("serialize json schema");

    let document = json
        .pointer("/definitions/Document/properties")
        .and_then(|value| value.as_object())
        .expect("document properties");
    assert!(document.contains_key("DocId"));
    assert!(document.contains_key("Links"));
    assert!(document.contains_key("Name"));

    let required = json
        .pointer("/definitions/Document/required")
        .and_then(|value| value.as_array())
        .expect("required list");
    assert_eq!(required, &vec![serde_json::Value::String("DocId".to_string())]);
}
