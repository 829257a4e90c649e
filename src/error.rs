use thiserror::Error;

/// Result type for snipdoc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library.
///
/// Problems inside a listing (unknown types, missing keys, wrong value types)
/// are not errors at this level: the tree builder logs them and skips the
/// offending descriptor.
#[derive(Error, Debug)]
pub enum Error {
    /// The listing payload could not be decoded
    #[error("unable to decode listing: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A descriptor holds a value of the wrong shape
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(#[source] serde_json::Error),

    /// A descriptor lacks a key the builder needs
    #[error("malformed descriptor {name}: missing '{key}'")]
    MalformedDescriptor { name: String, key: &'static str },

    #[error("unknown format: {0}. Use markdown, html, or json")]
    UnknownFormat(String),

    #[error("no node at path: {0}")]
    NodeNotFound(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn malformed(name: Option<&str>, key: &'static str) -> Self {
        Self::MalformedDescriptor {
            name: name.unwrap_or("<unnamed>").to_string(),
            key,
        }
    }
}
