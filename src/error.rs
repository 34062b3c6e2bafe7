use core::fmt;
use std::path::PathBuf;

/// Result alias for `kitsort`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by linkage, cluster, and materialization primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Feature rows have inconsistent dimensionality.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of leaves in the tree.
        n_items: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// No persisted linkage at the given path.
    LinkageNotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// Persisted linkage exists but is unreadable or violates the
    /// merge-tree invariants.
    CorruptLinkage(String),

    /// File listing does not correspond one-to-one with the tree's leaves.
    MappingMismatch {
        /// Leaf count the tree expects.
        expected: usize,
        /// Cardinality of the file listing.
        found: usize,
    },

    /// Filesystem failure during listing or copy.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} samples")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::LinkageNotFound { path } => {
                write!(f, "no linkage found at {}", path.display())
            }
            Error::CorruptLinkage(msg) => write!(f, "corrupt linkage: {msg}"),
            Error::MappingMismatch { expected, found } => {
                write!(
                    f,
                    "file listing does not match tree: {expected} leaves, {found} files"
                )
            }
            Error::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
