#![allow(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

//! Whole documents fed through every kind of source.

use futures::{executor::block_on, stream};
use jsonassembler::{Assembler, Map, Value};
use rstest::rstest;
use serde_json::json;

fn from_serde(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap()),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(from_serde).collect()),
        serde_json::Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(k, v)| (k.clone(), from_serde(v)))
                .collect::<Map>(),
        ),
    }
}

/// Split `text` into chunks of 1 to 7 characters, roughly the size of model
/// tokens.
fn token_chunks(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut size = 1;
    while start < chars.len() {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        start = end;
        size = size % 7 + 1;
    }
    chunks
}

fn assert_all_sources(text: &str, expected: &Value) {
    assert_eq!(&Assembler::from_text(text).assemble_blocking(), expected);

    let chunks = token_chunks(text);
    assert_eq!(chunks.concat(), text);
    assert_eq!(
        &Assembler::from_chunks(chunks.clone()).assemble_blocking(),
        expected
    );

    let streamed = block_on(Assembler::from_stream(stream::iter(chunks)).assemble());
    assert_eq!(&streamed, expected);
}

#[rstest]
#[case::nested_objects_and_arrays(json!({
    "obj_key": {
        "nested_obj": {"int_key": 109, "bool_key": false, "null_key": null},
        "arr_key": [1, 2, "three"]
    },
    "arr_key": ["first", 2, {"nested_obj": {"str_key": "nested"}}, [], [1, 2, 3]]
}))]
#[case::array_of_primitives(json!([1, "string", false, null]))]
#[case::empty_object(json!({}))]
#[case::empty_array(json!([]))]
#[case::empty_objects_as_values(json!({"obj_key1": {}, "obj_key2": {}, "obj_key3": {}}))]
#[case::nested_arrays(json!({"arr_key": [[[]], [1, 2, [3, 4, [5]]], []]}))]
#[case::primitive_members(json!({
    "str_key": "string",
    "num_key": 100,
    "bool_key": false,
    "null_key": null
}))]
#[case::objects_inside_arrays(json!([
    {"id": 1, "name": "John Doe"},
    {"id": 2, "name": "Jane Doe"}
]))]
#[case::special_strings(json!({
    "special_str_key1": "\\Test",
    "special_str_key2": "Line \n Break",
    "special_str_key3": "\u{8}\u{c}\n\r\t",
    "special_str_key4": "\"Double quotes\" and 'Single quotes'"
}))]
#[case::mixed_primitives(json!(["String", 28, true, null]))]
#[case::deep_nesting(json!({"level1": {"level2": {"level3": {"level4": "End"}}}}))]
#[case::numeric_keys(json!({"1": "Number One", "2": "Number Two", "3": "Number Three"}))]
#[case::unicode(json!({"unicode_str_key": "Test\u{dc}nicode"}))]
#[case::keys_with_spaces(json!({
    "key one": "value one",
    "key two": "value two",
    "key three": "value three"
}))]
#[case::floats(json!({"pi": 3.25, "neg": -0.5, "exp": 1.5e300}))]
fn sample_documents(#[case] document: serde_json::Value) {
    let text = serde_json::to_string(&document).unwrap();
    assert_all_sources(&text, &from_serde(&document));

    let pretty = serde_json::to_string_pretty(&document).unwrap();
    assert_all_sources(&pretty, &from_serde(&document));
}

#[test]
fn undefined_member() {
    let text = r#"{"str_key":"string","undef_key":undefined}"#;
    let expected = Value::Object(Map::from_iter([
        ("str_key".to_string(), Value::String("string".into())),
        ("undef_key".to_string(), Value::Undefined),
    ]));
    assert_all_sources(text, &expected);
}

// A tool-call response cut on the seams between strings, objects and arrays.
#[rustfmt::skip]
const TOOL_CALL: [&str; 22] = [
    r#"{"moderation":{"decision":"al"#,
    r#"lo"#,
    r#"w","reason":null},""#,
    r#"request":{"filename":"example.rs""#,
    r#","language":"rust","#,
    r#""options":{"opt_level":"2""#,
    r#","features":["serde""#,
    r#","tokio"]}"#,
    r#"}"#,
    r#","snippets":["#,
    r#""fn main() {}","#,
    r#""println!(\"hi\")"]"#,
    r#","entities":[{"type":"function","name":"main"},{"type":"macro","name":"println"}]"#,
    r#","matrix":[["a"]]"#,
    r#","mixed":["s",{"k":"v"}"#,
    r#","t""#,
    r#",["u"]"#,
    r#","end"]"#,
    r#","trailing":{"status":"ok"}"#,
    r#","object_in_array_last":[{"a":1}]"#,
    r#","nested_objects":{"outer":{"inner":1}}"#,
    r#"}"#,
];

#[test]
fn tool_call_stream() {
    let document: serde_json::Value = serde_json::from_str(&TOOL_CALL.concat()).unwrap();
    let expected = from_serde(&document);

    let assembled = Assembler::from_chunks(TOOL_CALL).assemble_blocking();
    assert_eq!(assembled, expected);
    assert_eq!(
        assembled.get("snippets").and_then(Value::as_array).map(Vec::len),
        Some(2)
    );
}

#[test]
fn tool_call_stream_cut_short() {
    let cut = &TOOL_CALL[..7];
    let result = block_on(Assembler::from_chunks(cut.iter().copied()).assemble_detailed());
    assert!(result.truncated);
    assert_eq!(
        result.value.to_string(),
        r#"{"moderation":{"decision":"allow","reason":null},"request":{"filename":"example.rs","language":"rust","options":{"opt_level":"2","features":["serde"]}}}"#
    );
}
