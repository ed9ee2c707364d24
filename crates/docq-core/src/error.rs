use std::time::Duration;
use thiserror::Error;

use crate::types::SourceKind;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A retrieval backend was never initialized (or was shut down).
    #[error("Backend not ready: {0}")]
    NotReady(SourceKind),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{backend} backend failed: {message}")]
    Backend { backend: SourceKind, message: String },

    #[error("Search deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn backend(backend: SourceKind, err: impl std::fmt::Display) -> Self {
        Self::Backend { backend, message: err.to_string() }
    }

    /// True for failures a transport layer should report as service-unavailable.
    pub fn is_unavailable(&self) -> bool { matches!(self, Error::NotReady(_) | Error::DeadlineExceeded(_)) }
}

pub type Result<T> = std::result::Result<T, Error>;
