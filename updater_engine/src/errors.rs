use std::io;
use thiserror::Error;

/// Terminal failures of the listing, selection and download operations.
///
/// None of these are retried; every variant carries a reason that can be
/// shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdaterError {
    /// The file listing could not be fetched.
    #[error("Failed to fetch file list: {reason}")]
    ListingFailure { reason: String },

    /// The requested name is not in the listing, or the listing is empty.
    #[error("Selection rejected: {reason}")]
    SelectionRejected { reason: String },

    /// The transfer or the write to the destination failed.
    #[error("Failed to download file: {reason}")]
    DownloadFailure { reason: String },

    /// No destination was provided.
    #[error("Download canceled")]
    CancelledByUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Listing,
    Selection,
    Download,
    Cancelled,
}

impl UpdaterError {
    pub fn listing(reason: impl Into<String>) -> Self {
        UpdaterError::ListingFailure {
            reason: reason.into(),
        }
    }

    pub fn selection(reason: impl Into<String>) -> Self {
        UpdaterError::SelectionRejected {
            reason: reason.into(),
        }
    }

    pub fn download(reason: impl Into<String>) -> Self {
        UpdaterError::DownloadFailure {
            reason: reason.into(),
        }
    }

    /// Creates a `DownloadFailure` from an I/O error on the destination file.
    pub fn from_write_error(err: io::Error) -> Self {
        UpdaterError::download(format!("write error: {}", err))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UpdaterError::ListingFailure { .. } => ErrorKind::Listing,
            UpdaterError::SelectionRejected { .. } => ErrorKind::Selection,
            UpdaterError::DownloadFailure { .. } => ErrorKind::Download,
            UpdaterError::CancelledByUser => ErrorKind::Cancelled,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            UpdaterError::ListingFailure { reason }
            | UpdaterError::SelectionRejected { reason }
            | UpdaterError::DownloadFailure { reason } => reason,
            UpdaterError::CancelledByUser => "no destination chosen",
        }
    }
}
