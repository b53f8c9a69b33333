//! The assembler session.
//!
//! [`Assembler`] is a recursive-descent reader over a [`CharSource`]. While it
//! reads it keeps the value built so far in a live tree: strings are extended
//! one character at a time, object members appear as soon as their key is
//! read, and array elements as soon as they are complete. After each of these
//! changes the update hook is called with the root of that tree.

use futures::{
    Stream,
    future::{FutureExt, LocalBoxFuture},
};
use log::debug;

use crate::{
    coerce::{JSON_WHITESPACE, coerce_primitive, unescape},
    error::ConfigError,
    options::{AssemblerOptions, Hooks},
    path::{PathComponent, display_path},
    source::{AnySource, CharSource, Filter, IteratorSource, StaticSource, StreamSource},
    tree::PartialTree,
    value::{Map, Value},
};

/// Skipped between array elements.
const ELEMENT_SEPARATORS: &[char] = &[',', ' ', '\n', '\t', '\r'];
/// End a bare token; pushed back for the enclosing container.
const TERMINATORS: &[char] = &[',', ']', '}'];
const KEY_SEPARATOR: &[char] = &[':'];

/// Containers nested deeper than this are not descended into.
///
/// Each open container holds a boxed future on the polling stack, so the
/// bound keeps hostile input like `[[[[...` from exhausting the stack.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Result of [`Assembler::assemble_detailed`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    /// The assembled value, identical to what [`Assembler::assemble`] returns.
    pub value: Value,
    /// Input ended inside an unterminated string, array or object, or before
    /// any value started, or assembly stopped at the nesting limit.
    pub truncated: bool,
}

/// Incremental JSON assembler over a character source.
///
/// One call to [`assemble`](Self::assemble) reads one value. The borrow
/// checker keeps calls from overlapping; once a call has finished the
/// assembler can be used again to read whatever input follows.
///
/// Nesting is limited to [`DEFAULT_MAX_DEPTH`] open containers unless set
/// otherwise with [`with_max_depth`](Self::with_max_depth). A container that
/// would exceed the limit ends assembly as if input had run out there: its
/// slot is [`Value::Undefined`], the result is flagged as truncated and the
/// rest of the input is left unread.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use jsonassembler::{Assembler, Value};
///
/// let updates = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&updates);
/// let mut assembler = Assembler::from_chunks([r#"{"name":"Ad"#, r#"a"}"#])
///     .on_update(move |root| sink.borrow_mut().push(root.to_string()));
///
/// let value = assembler.assemble_blocking();
/// assert_eq!(value.get("name"), Some(&Value::String("Ada".into())));
/// assert_eq!(
///     *updates.borrow(),
///     [
///         r#"{"name":undefined}"#,
///         r#"{"name":"A"}"#,
///         r#"{"name":"Ad"}"#,
///         r#"{"name":"Ada"}"#,
///         r#"{"name":"Ada"}"#,
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Assembler<S> {
    source: S,
    tree: PartialTree,
    hooks: Hooks,
    truncated: bool,
    depth: usize,
    max_depth: usize,
    halted: bool,
}

impl Assembler<AnySource> {
    /// Build an assembler from options, choosing the source from whichever of
    /// `text`, `iterator` or `stream` is set.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingSource`] if none is set and
    /// [`ConfigError::MultipleSources`] if more than one is.
    pub fn new(options: AssemblerOptions) -> Result<Self, ConfigError> {
        let (source, hooks) = options.into_parts()?;
        Ok(Self::with_hooks(source, hooks))
    }
}

impl Assembler<StaticSource> {
    /// Assemble text that is fully known up front.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_source(StaticSource::new(text))
    }
}

impl<I> Assembler<IteratorSource<I>>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Assemble text pulled chunk by chunk from an iterator.
    pub fn from_chunks(chunks: impl IntoIterator<IntoIter = I>) -> Self {
        Self::from_source(IteratorSource::new(chunks.into_iter()))
    }
}

impl<T> Assembler<StreamSource<T>>
where
    T: Stream + Unpin,
    T::Item: AsRef<str>,
{
    /// Assemble text awaited chunk by chunk from a stream.
    pub fn from_stream(chunks: T) -> Self {
        Self::from_source(StreamSource::new(chunks))
    }
}

impl<S> Assembler<S> {
    /// Assemble from any character source.
    pub fn from_source(source: S) -> Self {
        Self::with_hooks(source, Hooks::default())
    }

    fn with_hooks(source: S, hooks: Hooks) -> Self {
        Self {
            source,
            tree: PartialTree::new(),
            hooks,
            truncated: false,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            halted: false,
        }
    }

    /// Limit nesting to `max_depth` open containers.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the hook called once before any input is read.
    #[must_use]
    pub fn on_start(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hooks.on_start = Some(Box::new(hook));
        self
    }

    /// Set the hook called after every change to the partial result.
    ///
    /// The hook receives the live root, which keeps changing once the hook
    /// returns; use [`Value::snapshot`] to keep a copy.
    #[must_use]
    pub fn on_update(mut self, hook: impl FnMut(&Value) + 'static) -> Self {
        self.hooks.on_update = Some(Box::new(hook));
        self
    }

    /// Set the hook called once with the finished value.
    #[must_use]
    pub fn on_end(mut self, hook: impl FnMut(&Value) + 'static) -> Self {
        self.hooks.on_end = Some(Box::new(hook));
        self
    }

    /// The partial result of the assembly in progress, once a string or
    /// container has been opened.
    #[must_use]
    pub fn partial(&self) -> Option<&Value> {
        self.tree.root()
    }

    /// Give back the source, e.g. to read input that follows the value.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: CharSource> Assembler<S> {
    /// Read one value.
    ///
    /// Input is read leniently: truncated strings and containers are returned
    /// as far as they got, bare words become strings and `undefined` is
    /// accepted. Empty input yields [`Value::Undefined`].
    pub async fn assemble(&mut self) -> Value {
        self.assemble_detailed().await.value
    }

    /// Like [`assemble`](Self::assemble), additionally reporting whether the
    /// input was cut off.
    pub async fn assemble_detailed(&mut self) -> Assembled {
        self.tree.reset();
        self.truncated = false;
        self.depth = 0;
        self.halted = false;
        debug!("assembly started");
        if let Some(on_start) = self.hooks.on_start.as_mut() {
            on_start();
        }

        self.assemble_value().await;

        let value = self.tree.take_root().unwrap_or_default();
        debug!("assembly finished (truncated: {})", self.truncated);
        if let Some(on_end) = self.hooks.on_end.as_mut() {
            on_end(&value);
        }
        Assembled {
            value,
            truncated: self.truncated,
        }
    }

    /// Drive [`assemble`](Self::assemble) to completion on the current thread.
    ///
    /// Static and iterator sources never wait. A stream source must be fed
    /// from another thread, otherwise this blocks forever.
    pub fn assemble_blocking(&mut self) -> Value {
        futures::executor::block_on(self.assemble())
    }

    fn notify(&mut self) {
        if let (Some(on_update), Some(root)) = (self.hooks.on_update.as_mut(), self.tree.root()) {
            on_update(root);
        }
    }

    fn assemble_value<'a>(&'a mut self) -> LocalBoxFuture<'a, ()>
    where
        S: 'a,
    {
        async move {
            match self.source.next_char(Filter::Skip(JSON_WHITESPACE)).await {
                Some('"') => self.assemble_string().await,
                Some(open @ ('{' | '[')) if self.depth >= self.max_depth => {
                    debug!(
                        "nesting limit {} reached at {}, ignoring {open:?} and the rest of the input",
                        self.max_depth,
                        display_path(self.tree.path())
                    );
                    self.halted = true;
                    self.truncated = true;
                    self.tree.store(Value::Undefined);
                }
                Some(open @ ('{' | '[')) => {
                    self.depth += 1;
                    if open == '{' {
                        self.assemble_object().await;
                    } else {
                        self.assemble_array().await;
                    }
                    self.depth -= 1;
                }
                // Early close: nothing left to read for this slot.
                Some('}' | ']') => self.tree.store(Value::Undefined),
                None => {
                    self.truncated = true;
                    self.tree.store(Value::Undefined);
                }
                Some(first) => self.assemble_primitive(first).await,
            }
        }
        .boxed_local()
    }

    /// Read characters up to the closing quote, returning the raw body.
    ///
    /// With `track` set, every character is also appended to the current slot
    /// and announced.
    async fn read_string(&mut self, track: bool) -> String {
        let mut raw = String::new();
        let mut escaped = false;
        loop {
            let Some(ch) = self.source.next_char(Filter::Any).await else {
                self.truncated = true;
                break;
            };
            if ch == '"' && !escaped {
                break;
            }
            escaped = ch == '\\' && !escaped;
            raw.push(ch);
            if track {
                self.tree.push_char(ch);
                self.notify();
            }
        }
        raw
    }

    async fn assemble_string(&mut self) {
        self.tree.store(Value::String(String::new()));
        let raw = self.read_string(true).await;
        self.tree.store(Value::String(unescape(&raw)));
    }

    async fn assemble_array(&mut self) {
        self.tree.store(Value::Array(Vec::new()));
        let mut index = 0;
        let mut next = self.source.next_char(Filter::Skip(JSON_WHITESPACE)).await;
        loop {
            match next {
                Some(']') => break,
                None => {
                    self.truncated = true;
                    break;
                }
                Some(ch) => {
                    self.source.return_char(ch);
                    self.tree.enter(PathComponent::Index(index));
                    self.assemble_value().await;
                    self.tree.leave();
                    index += 1;
                    self.notify();
                    if self.halted {
                        break;
                    }
                }
            }
            next = self.source.next_char(Filter::Skip(ELEMENT_SEPARATORS)).await;
        }
    }

    async fn assemble_object(&mut self) {
        self.tree.store(Value::Object(Map::new()));
        loop {
            match self.source.next_char(Filter::Skip(JSON_WHITESPACE)).await {
                Some('}') => break,
                None => {
                    self.truncated = true;
                    break;
                }
                Some('"') => {
                    let key = unescape(&self.read_string(false).await);
                    self.tree.enter(PathComponent::Key(key));
                    // The key is announced before its value is known.
                    self.tree.store(Value::Undefined);
                    self.notify();
                    self.source.next_char(Filter::Until(KEY_SEPARATOR)).await;
                    self.assemble_value().await;
                    self.tree.leave();
                    self.notify();
                    if self.halted {
                        break;
                    }
                }
                // Member separators and stray characters between members.
                Some(ch) => {
                    if ch != ',' {
                        debug!("skipping {ch:?} in object at {}", display_path(self.tree.path()));
                    }
                }
            }
        }
    }

    async fn assemble_primitive(&mut self, first: char) {
        let mut raw = String::from(first);
        while let Some(ch) = self.source.next_char(Filter::Any).await {
            if TERMINATORS.contains(&ch) {
                self.source.return_char(ch);
                break;
            }
            raw.push(ch);
        }
        self.tree.store(coerce_primitive(&raw));
    }
}

/// Assemble a complete string in one call.
///
/// # Examples
///
/// ```
/// use jsonassembler::{Value, assemble_str};
///
/// assert_eq!(assemble_str("[1, 2"), Value::Array(vec![1.0.into(), 2.0.into()]));
/// assert_eq!(assemble_str("undefined"), Value::Undefined);
/// ```
#[must_use]
pub fn assemble_str(text: &str) -> Value {
    Assembler::from_text(text).assemble_blocking()
}
