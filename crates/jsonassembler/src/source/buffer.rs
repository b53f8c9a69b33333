use std::collections::VecDeque;

use super::Pushback;

/// Characters of the most recently fetched chunk that have not been consumed
/// yet, plus the one-slot pushback.
#[derive(Debug, Default)]
pub(crate) struct CharBuffer {
    data: VecDeque<char>,
    pushback: Pushback,
}

impl CharBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, text: &str) {
        // Reserve the byte length as an upper bound on additional chars
        self.data.reserve(text.len());
        self.data.extend(text.chars());
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.pushback.is_empty() && self.data.is_empty()
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.data.pop_front())
    }

    #[inline]
    pub(crate) fn unread(&mut self, ch: char) {
        self.pushback.put(ch);
    }
}
