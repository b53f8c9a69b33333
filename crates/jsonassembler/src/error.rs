use thiserror::Error;

/// Why an [`crate::AssemblerOptions`] could not be turned into an assembler.
///
/// These are the only failures the crate reports; malformed or truncated
/// input is assembled on a best-effort basis instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// None of `text`, `iterator` or `stream` was set.
    #[error("no input configured: set one of `text`, `iterator` or `stream`")]
    MissingSource,
    /// More than one input option was set.
    #[error("only one input may be configured, found {}", .configured.join(", "))]
    MultipleSources {
        /// Names of the options that were set, in declaration order.
        configured: Vec<&'static str>,
    },
}
