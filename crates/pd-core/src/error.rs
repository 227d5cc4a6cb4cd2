//! Unified error type for plexdeck.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for route handlers to derive an HTTP status code via [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes in plexdeck.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The process-wide media server connection was never established.
    #[error("Plex server not connected.")]
    ServerUnavailable,

    /// A media id did not resolve on the media server, or was not a valid
    /// rating key to begin with.
    #[error("Media not found.")]
    MediaNotFound {
        /// The id as it was requested.
        id: String,
    },

    /// Some other entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "user", "resource").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The media server (or plex.tv) returned an error or was unreachable.
    #[error("Upstream error [{service}]: {message}")]
    Upstream {
        /// Which upstream service failed ("plex", "plex.tv").
        service: String,
        /// Human-readable error description.
        message: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::ServerUnavailable => 500,
            Error::MediaNotFound { .. } => 404,
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::Upstream { .. } => 502,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::MediaNotFound`].
    pub fn media_not_found(id: impl fmt::Display) -> Self {
        Error::MediaNotFound { id: id.to_string() }
    }

    /// Convenience constructor for [`Error::Upstream`].
    pub fn upstream(service: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::Upstream {
            service: service.into(),
            message: message.to_string(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
