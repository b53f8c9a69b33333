//! Demonstrates how to react **immediately** to content-moderation feedback
//! while incrementally assembling a tool-call response from an LLM.
//!
//! The assistant answers with a JSON object describing a code snippet. Besides
//! the snippet the object carries a `moderation` field that comes first, so
//! that a policy violation can be acted on before the rest arrives:
//!
//! ```text
//! {
//!   "moderation": {
//!     "decision": "allow" | "block",
//!     "reason":   string | null
//!   },
//!   "filename":   string,
//!   "code":       string
//! }
//! ```
//!
//! The response is fed to the assembler in small, irregular chunks the way
//! chat-completion APIs deliver tokens. The update hook sees the partial
//! object after every character:
//!
//! 1. As soon as `moderation.decision` starts with `"block"` the chunk supply
//!    is cut off, which ends the assembly early.
//! 2. While `code` grows, its progress is reported so that a user interface
//!    could render the snippet as it arrives.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonassembler --example llm_tool_call
//! ```

#![allow(clippy::needless_raw_string_hashes)]

use std::{cell::Cell, io::Write, rc::Rc};

use jsonassembler::{Assembler, Value};

fn decision(root: &Value) -> Option<&str> {
    root.get("moderation")?.get("decision")?.as_str()
}

fn main() {
    // In real life this would come from the network.
    let simulated_stream: [&str; 7] = [
        r#"{"moderation":{"decision":"al"#,
        r#"lo"#,
        r#"w","reason":null},"#,
        r#""filename":"example.rs","#,
        r#""code":"use jsonassembler::Assembler;\nfn main() {\n"#,
        r#"    let _ = Assembler::from_text(\"[1]\");\n}\n"#,
        r#""}"#,
    ];

    let blocked = Rc::new(Cell::new(false));
    let announced = Rc::new(Cell::new(false));
    let code_len = Rc::new(Cell::new(0));

    let chunks = {
        let blocked = Rc::clone(&blocked);
        simulated_stream
            .into_iter()
            .take_while(move |_| !blocked.get())
    };

    let mut assembler = Assembler::from_chunks(chunks).on_update({
        let blocked = Rc::clone(&blocked);
        let code_len = Rc::clone(&code_len);
        move |root| {
            if let Some(d) = decision(root) {
                if d.starts_with("block") && !blocked.get() {
                    eprintln!("🚨  Moderation blocked the content – aborting");
                    blocked.set(true);
                }
                // `reason` is only announced once the decision string closed.
                let settled = root.get("moderation").and_then(|m| m.get("reason")).is_some();
                if settled && !announced.get() {
                    println!("✅  Moderation decision: {d}");
                    announced.set(true);
                }
            }

            // Until the string closes the partial code is raw, escapes included.
            if let Some(code) = root.get("code").and_then(Value::as_str) {
                if code.len() != code_len.get() {
                    code_len.set(code.len());
                    print!("\r⏳  received {} bytes of code", code.len());
                    let _ = std::io::stdout().flush();
                }
            }
        }
    });

    let result = futures::executor::block_on(assembler.assemble_detailed());
    println!();

    if blocked.get() {
        return;
    }
    if result.truncated {
        eprintln!("⚠️  Stream ended before the response was complete");
    }

    let filename = result.value.get("filename").and_then(Value::as_str);
    let code = result.value.get("code").and_then(Value::as_str);
    if let (Some(filename), Some(code)) = (filename, code) {
        println!("--- {filename} ---\n{code}");
    }

    assert_eq!(
        code,
        Some("use jsonassembler::Assembler;\nfn main() {\n    let _ = Assembler::from_text(\"[1]\");\n}\n")
    );
}
