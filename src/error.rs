//! Error taxonomy shared by both generators.

use camino::Utf8PathBuf;

/// Errors raised while scanning inputs or producing an output document.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A configured scan root does not exist or is not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: Utf8PathBuf },

    /// Reading a directory or writing the destination failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file or directory name lacks the tokens needed to derive an identifier.
    #[error("malformed input name {path}: {reason}")]
    MalformedInputName { path: Utf8PathBuf, reason: String },

    /// Two icons map to the same feature identifier and duplicates are rejected.
    #[error("duplicate feature identifier '{identifier}' from {first} and {second}")]
    DuplicateIdentifier {
        identifier: String,
        first: Utf8PathBuf,
        second: Utf8PathBuf,
    },

    /// The style layer name cannot be used as a `#layer` selector.
    #[error("layer name '{layer}' is not a valid CSS identifier")]
    InvalidLayerName { layer: String },

    /// The rendered document failed its own well-formedness check.
    #[error("generated document is malformed: {reason}")]
    MalformedOutput { reason: String },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration {path}: {reason}")]
    Config { path: Utf8PathBuf, reason: String },
}

impl GenError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for generator operations.
pub type GenResult<T> = Result<T, GenError>;
