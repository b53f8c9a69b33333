#![no_main]

use arbitrary::Arbitrary;
use futures::executor::block_on;
use jsonassembler::{Assembler, produce_char_chunks};
use libfuzzer_sys::fuzz_target;

/// A piece of model output. Sequences of these cover well-formed JSON as well
/// as the shapes the assembler accepts leniently.
#[derive(Arbitrary, Debug)]
enum Fragment {
    Open { object: bool },
    Close { object: bool },
    Comma,
    Colon,
    Whitespace(u8),
    Quoted(String),
    /// Unquoted text, read back as a bare string.
    Word(String),
    Number(f64),
    Literal(u8),
    /// A backslash followed by any character, in or out of a string.
    Escape(char),
    Raw(String),
}

impl Fragment {
    fn render(&self, out: &mut String) {
        match self {
            Self::Open { object } => out.push(if *object { '{' } else { '[' }),
            Self::Close { object } => out.push(if *object { '}' } else { ']' }),
            Self::Comma => out.push(','),
            Self::Colon => out.push(':'),
            Self::Whitespace(n) => out.push([' ', '\n', '\t', '\r'][usize::from(*n % 4)]),
            Self::Quoted(s) => {
                out.push('"');
                for ch in s.chars() {
                    if matches!(ch, '"' | '\\') {
                        out.push('\\');
                    }
                    out.push(ch);
                }
                out.push('"');
            }
            Self::Word(s) => out.extend(s.chars().filter(|c| c.is_alphanumeric())),
            Self::Number(n) => out.push_str(&n.to_string()),
            Self::Literal(n) => out.push_str(
                ["true", "false", "null", "undefined", "Infinity", "-Infinity"]
                    [usize::from(*n % 6)],
            ),
            Self::Escape(ch) => {
                out.push('\\');
                out.push(*ch);
            }
            Self::Raw(s) => out.push_str(s),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Input {
    fragments: Vec<Fragment>,
    splits: Vec<usize>,
    max_depth: u8,
}

// The assembled value and the truncation flag must not depend on how the
// text was split into chunks, and no input may panic.
fuzz_target!(|input: Input| {
    let mut text = String::new();
    for fragment in &input.fragments {
        fragment.render(&mut text);
    }
    let max_depth = usize::from(input.max_depth);

    let whole = block_on(
        Assembler::from_text(text.as_str())
            .with_max_depth(max_depth)
            .assemble_detailed(),
    );
    let chunks = produce_char_chunks(&text, &input.splits);
    let chunked = block_on(
        Assembler::from_chunks(chunks)
            .with_max_depth(max_depth)
            .assemble_detailed(),
    );

    // NaN never equals itself, so compare the rendered form.
    assert_eq!(whole.value.to_string(), chunked.value.to_string());
    assert_eq!(whole.truncated, chunked.truncated);
});
