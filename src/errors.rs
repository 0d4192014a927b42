//! Error handling for the git-backup crate.
use std::{error::Error as StdError, fmt};

/// Error type for the git-backup crate.
#[derive(Debug)]
pub struct GitBackupError {
    /// Inner error.
    inner: Box<Inner>,
}

impl GitBackupError {
    /// Create a new error.
    pub(crate) fn new(kind: GitBackupErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    /// Create a new error of the given kind wrapping a source error.
    pub(crate) fn with_source<E: Into<BoxError>>(kind: GitBackupErrorKind, source: E) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                source: Some(source.into()),
            }),
        }
    }

    /// Create a new error with a message and a source.
    pub(crate) fn new_with_source<E: Into<BoxError>>(text: &str, source: E) -> Self {
        let source = source.into();
        Self::new(GitBackupErrorKind::Other).with_text(&format!("{text}: {source}"))
    }

    /// Attach a text source to the error.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text)));
        self
    }

    /// Kind of the error
    pub fn kind(&self) -> &GitBackupErrorKind {
        &self.inner.kind
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the git-backup crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: GitBackupErrorKind,

    /// Source error.
    source: Option<BoxError>,
}

/// Kinds of errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitBackupErrorKind {
    /// Missing or invalid configuration (empty credential input, bad config file, bad regex)
    Config,

    /// Error related to the reqwest crate.
    Reqwest,

    /// A request returned a non-success status without a usable body.
    Http,

    /// Error related to serde.
    Serde,

    /// Error related to the secret service.
    SecretStore,

    /// The destination API reported an error message.
    Api,

    /// Any other error.
    Other,
}

impl fmt::Display for GitBackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.source {
            Some(source) => write!(f, "{:?}: {}", self.inner.kind, source),
            None => write!(f, "{:?}", self.inner.kind),
        }
    }
}

impl StdError for GitBackupError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<reqwest::Error> for GitBackupError {
    fn from(e: reqwest::Error) -> Self {
        Self::with_source(GitBackupErrorKind::Reqwest, e)
    }
}

impl From<serde_json::Error> for GitBackupError {
    fn from(e: serde_json::Error) -> Self {
        Self::with_source(GitBackupErrorKind::Serde, e)
    }
}

impl From<toml::de::Error> for GitBackupError {
    fn from(e: toml::de::Error) -> Self {
        Self::with_source(GitBackupErrorKind::Config, e)
    }
}

impl From<regex::Error> for GitBackupError {
    fn from(e: regex::Error) -> Self {
        Self::with_source(GitBackupErrorKind::Config, e)
    }
}

impl From<url::ParseError> for GitBackupError {
    fn from(e: url::ParseError) -> Self {
        Self::with_source(GitBackupErrorKind::Config, e)
    }
}

impl From<secret_service::Error> for GitBackupError {
    fn from(e: secret_service::Error) -> Self {
        Self::with_source(GitBackupErrorKind::SecretStore, e)
    }
}

impl From<std::io::Error> for GitBackupError {
    fn from(e: std::io::Error) -> Self {
        Self::with_source(GitBackupErrorKind::Other, e)
    }
}

impl From<&str> for GitBackupError {
    fn from(text: &str) -> Self {
        Self::new(GitBackupErrorKind::Other).with_text(text)
    }
}

impl From<String> for GitBackupError {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}
