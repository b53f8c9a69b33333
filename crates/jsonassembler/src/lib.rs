//! An incremental JSON assembler.
//!
//! Language models stream JSON one token at a time. [`Assembler`] reads such
//! text character by character from a [`CharSource`] and keeps a live,
//! partially built [`Value`] that an update hook can render before the
//! document is complete.
//!
//! ```
//! use jsonassembler::{Assembler, Value};
//!
//! let tokens = ["{\"steps\": [\"mix", "\", \"bake\"", "], \"done\": tr", "ue}"];
//! let mut assembler = Assembler::from_chunks(tokens).on_update(|partial| {
//!     // render `partial` here
//!     let _ = partial;
//! });
//! let value = assembler.assemble_blocking();
//! assert_eq!(value.get("done"), Some(&Value::Boolean(true)));
//! assert_eq!(value.to_string(), r#"{"steps":["mix","bake"],"done":true}"#);
//! ```
//!
//! The reader is deliberately lenient: truncated input yields whatever was
//! read so far, bare words become strings and `undefined` is a value. The
//! only errors are configuration errors reported by [`Assembler::new`].

mod assembler;
mod chunk_utils;
mod coerce;
mod error;
mod options;
mod path;
mod source;
mod tree;
mod value;

#[cfg(test)]
mod tests;

pub use assembler::{Assembled, Assembler, DEFAULT_MAX_DEPTH, assemble_str};
pub use chunk_utils::{produce_char_chunks, produce_chunks};
pub use error::ConfigError;
pub use options::{AssemblerOptions, EndHook, StartHook, UpdateHook};
pub use source::{
    AnySource, BoxChunkIter, BoxChunkStream, CharSource, Filter, IteratorSource, StaticSource,
    StreamSource,
};
pub use value::{Array, Map, Value};
