use futures::{Stream, StreamExt};
use log::trace;

use super::{CharSource, buffer::CharBuffer};

/// A source that awaits chunks from an asynchronous [`Stream`].
///
/// This is the push-style source: a producer task sends chunks into a
/// channel and the receiving end is handed to the assembler, which only polls
/// for the next chunk when its buffered characters run out. Empty chunks are
/// skipped, and once the stream ends it is never polled again.
///
/// # Examples
///
/// ```
/// use futures::{channel::mpsc, executor::block_on};
/// use jsonassembler::{Assembler, StreamSource, Value};
///
/// let (tx, rx) = mpsc::unbounded::<String>();
/// for chunk in ["{\"ok\"", ":", "true}"] {
///     tx.unbounded_send(chunk.to_string()).unwrap();
/// }
/// drop(tx);
///
/// let mut assembler = Assembler::from_source(StreamSource::new(rx));
/// let value = block_on(assembler.assemble());
/// assert_eq!(value.get("ok"), Some(&Value::Boolean(true)));
/// ```
#[derive(Debug)]
pub struct StreamSource<S> {
    chunks: S,
    buffer: CharBuffer,
    exhausted: bool,
}

impl<S> StreamSource<S>
where
    S: Stream + Unpin,
    S::Item: AsRef<str>,
{
    /// Wrap a chunk stream.
    pub fn new(chunks: S) -> Self {
        Self {
            chunks,
            buffer: CharBuffer::new(),
            exhausted: false,
        }
    }

    async fn refill(&mut self) {
        while self.buffer.is_empty() && !self.exhausted {
            match self.chunks.next().await {
                Some(chunk) => {
                    let chunk = chunk.as_ref();
                    trace!("received chunk of {} bytes", chunk.len());
                    self.buffer.push(chunk);
                }
                None => {
                    trace!("chunk stream ended");
                    self.exhausted = true;
                }
            }
        }
    }
}

impl<S> CharSource for StreamSource<S>
where
    S: Stream + Unpin,
    S::Item: AsRef<str>,
{
    async fn next_raw(&mut self) -> Option<char> {
        self.refill().await;
        self.buffer.pop()
    }

    fn return_char(&mut self, ch: char) {
        self.buffer.unread(ch);
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::block_on, stream};

    use super::*;

    #[test]
    fn reads_across_chunks() {
        let mut src = StreamSource::new(stream::iter(["ab", "", "c"]));
        block_on(async {
            assert_eq!(src.next_raw().await, Some('a'));
            assert_eq!(src.next_raw().await, Some('b'));
            src.return_char('b');
            assert_eq!(src.next_raw().await, Some('b'));
            assert_eq!(src.next_raw().await, Some('c'));
            assert_eq!(src.next_raw().await, None);
            assert_eq!(src.next_raw().await, None);
        });
    }

    #[test]
    fn fused_after_end() {
        // A stream that would yield again after signalling its end.
        let mut polls = 0;
        let chunks = stream::poll_fn(move |_| {
            polls += 1;
            core::task::Poll::Ready(match polls {
                1 => Some("x"),
                2 => None,
                _ => Some("late"),
            })
        });
        let mut src = StreamSource::new(chunks);
        block_on(async {
            assert_eq!(src.next_raw().await, Some('x'));
            assert_eq!(src.next_raw().await, None);
            assert_eq!(src.next_raw().await, None);
        });
    }
}
