//! Character sources.
//!
//! The assembler reads its input one character at a time through
//! [`CharSource`]. Three implementations differ only in where text comes
//! from:
//!
//! - [`StaticSource`]: a string known up front. Never suspends.
//! - [`IteratorSource`]: a pull iterator of chunks. Never suspends either, but
//!   chunks are only pulled when the buffered characters run out.
//! - [`StreamSource`]: an asynchronous stream of chunks, e.g. the receiving end
//!   of a channel fed by a network task. Suspends while waiting for a chunk.
//!
//! Every source supports pushing back exactly one character, which is all the
//! lookahead the assembler needs.

mod buffer;
mod iter;
mod static_text;
mod stream;

use futures::stream::LocalBoxStream;
pub use iter::IteratorSource;
pub use static_text::StaticSource;
pub use stream::StreamSource;

/// Which characters [`CharSource::next_char`] discards before returning one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<'a> {
    /// Return the very next character.
    Any,
    /// Discard leading characters that are in the set.
    Skip(&'a [char]),
    /// Discard leading characters that are *not* in the set.
    Until(&'a [char]),
}

impl Filter<'_> {
    #[inline]
    fn discards(&self, ch: char) -> bool {
        match self {
            Filter::Any => false,
            Filter::Skip(set) => set.contains(&ch),
            Filter::Until(set) => !set.contains(&ch),
        }
    }
}

/// A supply of characters with one character of pushback.
///
/// `None` signals end of input. Once a source has reported end of input and
/// holds no pushed-back character it keeps returning `None`.
#[allow(async_fn_in_trait)]
pub trait CharSource {
    /// Consume and return the next raw character.
    ///
    /// This is the only place a source may suspend: when its buffered
    /// characters are exhausted it awaits the next chunk.
    async fn next_raw(&mut self) -> Option<char>;

    /// Push `ch` back so that it is returned by the next read.
    ///
    /// At most one character may be pending; callers always return the
    /// character they consumed last before reading again.
    fn return_char(&mut self, ch: char);

    /// Consume characters until one survives `filter`, and return it.
    async fn next_char(&mut self, filter: Filter<'_>) -> Option<char> {
        loop {
            let ch = self.next_raw().await?;
            if !filter.discards(ch) {
                return Some(ch);
            }
        }
    }
}

/// One-slot pushback shared by all sources.
#[derive(Debug, Default, Clone)]
pub(crate) struct Pushback(Option<char>);

impl Pushback {
    #[inline]
    pub(crate) fn put(&mut self, ch: char) {
        debug_assert!(
            self.0.is_none(),
            "a character was returned twice without an intervening read"
        );
        self.0 = Some(ch);
    }

    #[inline]
    pub(crate) fn take(&mut self) -> Option<char> {
        self.0.take()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Boxed chunk iterator accepted by [`crate::AssemblerOptions::iterator`].
pub type BoxChunkIter = Box<dyn Iterator<Item = String>>;
/// Boxed chunk stream accepted by [`crate::AssemblerOptions::stream`].
pub type BoxChunkStream = LocalBoxStream<'static, String>;

/// The source picked by [`crate::Assembler::new`] from the configured option.
pub enum AnySource {
    /// From [`crate::AssemblerOptions::text`].
    Static(StaticSource),
    /// From [`crate::AssemblerOptions::iterator`].
    Iterator(IteratorSource<BoxChunkIter>),
    /// From [`crate::AssemblerOptions::stream`].
    Stream(StreamSource<BoxChunkStream>),
}

impl core::fmt::Debug for AnySource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Static(s) => f.debug_tuple("Static").field(s).finish(),
            Self::Iterator(_) => f.write_str("Iterator(..)"),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl CharSource for AnySource {
    async fn next_raw(&mut self) -> Option<char> {
        match self {
            Self::Static(s) => s.next_raw().await,
            Self::Iterator(s) => s.next_raw().await,
            Self::Stream(s) => s.next_raw().await,
        }
    }

    fn return_char(&mut self, ch: char) {
        match self {
            Self::Static(s) => s.return_char(ch),
            Self::Iterator(s) => s.return_char(ch),
            Self::Stream(s) => s.return_char(ch),
        }
    }
}
