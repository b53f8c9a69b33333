use log::trace;

use super::{CharSource, buffer::CharBuffer};

/// A source that pulls chunks from an [`Iterator`] whenever its buffered
/// characters run out.
///
/// Empty chunks are skipped. Once the iterator returns `None` it is never
/// polled again. Pulling never suspends; for chunks that arrive
/// asynchronously use [`StreamSource`](super::StreamSource).
///
/// # Examples
///
/// ```
/// use jsonassembler::{Assembler, IteratorSource, Value};
///
/// let chunks = ["[tr", "ue, nu", "ll]"];
/// let mut assembler = Assembler::from_source(IteratorSource::new(chunks.into_iter()));
/// assert_eq!(
///     assembler.assemble_blocking(),
///     Value::Array(vec![Value::Boolean(true), Value::Null])
/// );
/// ```
#[derive(Debug)]
pub struct IteratorSource<I> {
    chunks: I,
    buffer: CharBuffer,
    exhausted: bool,
}

impl<I> IteratorSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Wrap a chunk iterator.
    pub fn new(chunks: I) -> Self {
        Self {
            chunks,
            buffer: CharBuffer::new(),
            exhausted: false,
        }
    }

    fn refill(&mut self) {
        while self.buffer.is_empty() && !self.exhausted {
            match self.chunks.next() {
                Some(chunk) => {
                    let chunk = chunk.as_ref();
                    trace!("pulled chunk of {} bytes", chunk.len());
                    self.buffer.push(chunk);
                }
                None => {
                    trace!("chunk iterator exhausted");
                    self.exhausted = true;
                }
            }
        }
    }
}

impl<I> CharSource for IteratorSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    async fn next_raw(&mut self) -> Option<char> {
        self.refill();
        self.buffer.pop()
    }

    fn return_char(&mut self, ch: char) {
        self.buffer.unread(ch);
    }
}
