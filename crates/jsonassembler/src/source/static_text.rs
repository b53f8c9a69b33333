use super::{CharSource, Pushback};

/// A source over text that is fully known up front.
///
/// Reading advances a cursor over the owned text; nothing is ever refilled.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
    cursor: usize,
    pushback: Pushback,
}

impl StaticSource {
    /// Create a source reading `text` from the start.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
            pushback: Pushback::default(),
        }
    }

    /// The text that has not been consumed yet, excluding any pushed-back
    /// character.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.text[self.cursor..]
    }
}

impl CharSource for StaticSource {
    async fn next_raw(&mut self) -> Option<char> {
        if let Some(ch) = self.pushback.take() {
            return Some(ch);
        }
        let ch = self.text[self.cursor..].chars().next()?;
        self.cursor += ch.len_utf8();
        Some(ch)
    }

    fn return_char(&mut self, ch: char) {
        self.pushback.put(ch);
    }
}
