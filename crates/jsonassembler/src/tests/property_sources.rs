use futures::{executor::block_on, stream};
use quickcheck::QuickCheck;

use crate::{Assembler, Value, assemble_str, produce_char_chunks};

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 5_000 } else { 500 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: assembling the rendered text of a value yields the value.
#[test]
fn round_trip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        assemble_str(&value.to_string()) == value
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: how the text is carved into chunks, and whether chunks are
/// pulled or awaited, never changes the result.
#[test]
fn source_equivalence_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value, splits: Vec<usize>) -> bool {
        let src = value.to_string();
        let chunks = produce_char_chunks(&src, &splits);

        let from_static = Assembler::from_text(src.as_str()).assemble_blocking();
        let from_iter = Assembler::from_chunks(chunks.iter().copied()).assemble_blocking();
        let from_stream = block_on(Assembler::from_stream(stream::iter(chunks.clone())).assemble());

        from_static == value && from_iter == value && from_stream == value
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value, Vec<usize>) -> bool);
}

/// Property: one character per chunk is the worst case for token streams.
#[test]
fn char_at_a_time_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let src = value.to_string();
        let chars: Vec<String> = src.chars().map(String::from).collect();
        Assembler::from_chunks(chars).assemble_blocking() == value
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: a serializer that uses named escapes reads back the same.
#[test]
fn serde_json_text_quickcheck() {
    fn to_json(value: &Value) -> serde_json::Value {
        match value {
            Value::Null | Value::Undefined => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => {
                serde_json::Number::from_f64(*n).map_or(serde_json::Value::Null, Into::into)
            }
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(a) => serde_json::Value::Array(a.iter().map(to_json).collect()),
            Value::Object(m) => serde_json::Value::Object(
                m.iter().map(|(k, v)| (k.clone(), to_json(v))).collect(),
            ),
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let text = serde_json::to_string(&to_json(&value)).unwrap();
        assemble_str(&text) == value
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value) -> bool);
}
