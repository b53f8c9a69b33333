use core::fmt;

use log::debug;

use crate::{
    error::ConfigError,
    source::{AnySource, BoxChunkIter, BoxChunkStream, IteratorSource, StaticSource, StreamSource},
    value::Value,
};

/// Called once before any input is read.
pub type StartHook = Box<dyn FnMut()>;
/// Called after every change to the partial result, with the live root.
pub type UpdateHook = Box<dyn FnMut(&Value)>;
/// Called once with the finished value.
pub type EndHook = Box<dyn FnMut(&Value)>;

/// Configuration for [`crate::Assembler::new`].
///
/// Exactly one of `text`, `iterator` and `stream` must be set; the hooks are
/// optional.
///
/// # Examples
///
/// ```rust
/// use jsonassembler::{Assembler, AssemblerOptions, ConfigError, Value};
///
/// let mut assembler = Assembler::new(AssemblerOptions {
///     iterator: Some(Box::new(["{\"a\"", ":1}"].map(String::from).into_iter())),
///     on_end: Some(Box::new(|v: &Value| assert!(v.is_object()))),
///     ..Default::default()
/// })?;
/// assert_eq!(assembler.assemble_blocking().get("a"), Some(&Value::Number(1.0)));
///
/// let both = AssemblerOptions {
///     text: Some("1".into()),
///     iterator: Some(Box::new(std::iter::empty::<String>())),
///     ..Default::default()
/// };
/// assert!(matches!(
///     Assembler::new(both),
///     Err(ConfigError::MultipleSources { .. })
/// ));
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Default)]
pub struct AssemblerOptions {
    /// Read from a string that is fully known up front.
    pub text: Option<String>,
    /// Pull chunks from a synchronous iterator.
    ///
    /// A pull iterator that has to wait for its chunks is a [`Stream`];
    /// configure it through `stream` instead.
    ///
    /// [`Stream`]: futures::Stream
    pub iterator: Option<BoxChunkIter>,
    /// Await chunks from a stream: an asynchronous pull iterator, or the
    /// receiving end of a channel that a producer pushes into.
    pub stream: Option<BoxChunkStream>,
    /// See [`StartHook`].
    pub on_start: Option<StartHook>,
    /// See [`UpdateHook`].
    pub on_update: Option<UpdateHook>,
    /// See [`EndHook`].
    pub on_end: Option<EndHook>,
}

impl fmt::Debug for AssemblerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssemblerOptions")
            .field("text", &self.text)
            .field("iterator", &self.iterator.is_some())
            .field("stream", &self.stream.is_some())
            .field("on_start", &self.on_start.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

impl AssemblerOptions {
    pub(crate) fn into_parts(self) -> Result<(AnySource, Hooks), ConfigError> {
        let configured: Vec<&'static str> = [
            ("text", self.text.is_some()),
            ("iterator", self.iterator.is_some()),
            ("stream", self.stream.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();
        if configured.len() > 1 {
            debug!("rejecting options with several inputs: {configured:?}");
            return Err(ConfigError::MultipleSources { configured });
        }

        let source = if let Some(text) = self.text {
            AnySource::Static(StaticSource::new(text))
        } else if let Some(chunks) = self.iterator {
            AnySource::Iterator(IteratorSource::new(chunks))
        } else if let Some(chunks) = self.stream {
            AnySource::Stream(StreamSource::new(chunks))
        } else {
            debug!("rejecting options without an input");
            return Err(ConfigError::MissingSource);
        };

        let hooks = Hooks {
            on_start: self.on_start,
            on_update: self.on_update,
            on_end: self.on_end,
        };
        Ok((source, hooks))
    }
}

/// Lifecycle callbacks of one assembler.
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) on_start: Option<StartHook>,
    pub(crate) on_update: Option<UpdateHook>,
    pub(crate) on_end: Option<EndHook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}
