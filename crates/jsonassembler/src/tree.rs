//! The live partial result.
//!
//! `PartialTree` owns the root of the value under construction together with
//! the path to the slot currently being assembled. Every write replaces the
//! slot's value in place, so a borrow of the root taken between writes always
//! shows the latest known structure.
//!
//! Alongside the path the tree caches the position each component resolved
//! to. Object members keep their `IndexMap` index once inserted and array
//! elements are never removed, so a slot is found again without hashing or
//! cloning keys.

use crate::{
    path::{Path, PathComponent},
    value::Value,
};

#[derive(Debug, Default)]
pub(crate) struct PartialTree {
    root: Option<Value>,
    path: Path,
    /// `positions[i]` is where `path[i]` lives in its container; may lag
    /// behind `path` until the slot is first written.
    positions: Vec<usize>,
}

impl PartialTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self) {
        self.root = None;
        self.path.clear();
        self.positions.clear();
    }

    /// The root, once a string or container has been opened.
    #[inline]
    pub(crate) fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    pub(crate) fn take_root(&mut self) -> Option<Value> {
        self.path.clear();
        self.positions.clear();
        self.root.take()
    }

    pub(crate) fn path(&self) -> &[PathComponent] {
        &self.path
    }

    pub(crate) fn enter(&mut self, pc: PathComponent) {
        self.path.push(pc);
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
        self.positions.truncate(self.path.len());
    }

    /// Replace the value of the current slot.
    pub(crate) fn store(&mut self, value: Value) {
        if let Some(slot) = self.slot_mut() {
            *slot = value;
        }
    }

    /// Append one character to the string held by the current slot, turning
    /// the slot into a string first if it holds anything else.
    pub(crate) fn push_char(&mut self, ch: char) {
        if let Some(slot) = self.slot_mut() {
            match slot {
                Value::String(s) => s.push(ch),
                other => *other = Value::String(ch.to_string()),
            }
        }
    }

    /// Walk from the root to the current slot, creating the final slot when it
    /// does not exist yet.
    ///
    /// Returns `None` if an intermediate value is not the container the path
    /// expects; the assembler always opens a container before descending into
    /// it, so this only guards against misuse.
    fn slot_mut(&mut self) -> Option<&mut Value> {
        let mut cur = self.root.get_or_insert(Value::Undefined);
        for (depth, pc) in self.path.iter().enumerate() {
            let known = self.positions.get(depth).copied();
            cur = match (cur, pc) {
                (Value::Object(map), PathComponent::Key(k)) => {
                    let pos = match known {
                        Some(pos) => pos,
                        None => {
                            let pos = match map.get_index_of(k.as_str()) {
                                Some(pos) => pos,
                                None => map.insert_full(k.clone(), Value::Undefined).0,
                            };
                            self.positions.push(pos);
                            pos
                        }
                    };
                    map.get_index_mut(pos)?.1
                }
                (Value::Array(arr), PathComponent::Index(i)) => {
                    if known.is_none() {
                        if *i >= arr.len() {
                            arr.resize(*i + 1, Value::Undefined);
                        }
                        self.positions.push(*i);
                    }
                    arr.get_mut(*i)?
                }
                _ => return None,
            };
        }
        Some(cur)
    }
}
