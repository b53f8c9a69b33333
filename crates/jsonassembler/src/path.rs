use core::fmt;

/// A component in the path to a slot of the partial tree.
///
/// Paths are sequences of keys or indices (for objects and arrays,
/// respectively) leading from the root to the value being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// Object member name.
    Key(String),
    /// Array position.
    Index(usize),
}

/// Location of a slot, root first.
pub type Path = Vec<PathComponent>;

impl From<&str> for PathComponent {
    fn from(s: &str) -> Self {
        Self::Key(s.into())
    }
}

impl From<String> for PathComponent {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

impl From<usize> for PathComponent {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => write!(f, ".{k}"),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Render a path the way it would be written in JavaScript, e.g. `$.a[0].b`.
pub(crate) fn display_path(path: &[PathComponent]) -> String {
    let mut out = String::from("$");
    for pc in path {
        out.push_str(&pc.to_string());
    }
    out
}
