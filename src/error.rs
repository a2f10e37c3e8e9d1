//! Error types returned by the report composer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[cfg(feature = "bookmarks")]
use crate::bookmarks::BookmarkError;

/// A work order that cannot be rendered as supplied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("work order {order} has no client")]
    MissingClient { order: String },
    #[error("work order {order} has no vehicle")]
    MissingVehicle { order: String },
    #[error("part #{index} ({description}) has a negative unit price")]
    NegativeUnitPrice { index: usize, description: String },
    #[error("labor entry #{index} ({description}) has negative hours")]
    NegativeHours { index: usize, description: String },
    #[error("labor entry #{index} ({description}) has a negative hourly rate")]
    NegativeHourlyRate { index: usize, description: String },
    #[error("work order {order} has amounts too large to total")]
    AmountOverflow { order: String },
}

/// Failure of a single compose call.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The inputs break the caller contract; nothing was rendered or written.
    #[error("invalid work order: {0}")]
    Validation(#[from] ValidationError),
    /// No usable font family could be loaded.
    #[error("failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),
    /// Layout or PDF serialization failed.
    #[error("failed to render PDF: {0}")]
    Render(#[source] genpdf::error::Error),
    /// The destination could not be created, written or renamed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The blocking render task did not run to completion.
    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[cfg(feature = "bookmarks")]
    #[error("failed to embed bookmarks: {0}")]
    Bookmarks(#[from] BookmarkError),
}

impl ComposeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the underlying I/O error for write failures.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
