// SPDX-License-Identifier: MPL-2.0

//! Error types for the film camera core

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Top-level error used by the command-line front end
#[derive(Debug, Clone)]
pub enum AppError {
    /// Capture pipeline errors
    Capture(CaptureError),
    /// Image decode/encode/validation errors
    Image(ImageError),
    /// Durable path store errors
    Persist(PersistError),
    /// Session command errors
    Session(SessionError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Errors from the codec adapter and the filter engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Bytes are not a supported image format, or are truncated
    Decode(String),
    /// Compression failed
    Encode(String),
    /// Raster has a zero dimension
    InvalidImage { width: u32, height: u32 },
}

/// Capture pipeline errors
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// The capture source failed to deliver a photo
    SourceUnavailable(String),
    /// Decode, filter, encode or the filtered write failed
    FilterFailed(String),
    /// The original file could not be written
    Storage(String),
    /// The pair could not be recorded in the durable store
    Persist(PersistError),
    /// Another capture is already in flight
    Busy,
}

/// Durable path store errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// Writing a path list failed
    WriteFailed(String),
}

/// Errors returned through a session handle
#[derive(Debug, Clone)]
pub enum SessionError {
    /// The session task has stopped
    Closed,
    /// The capture failed
    Capture(CaptureError),
    /// The pair store could not be saved
    Persist(PersistError),
}

/// Failure reported by a capture source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSourceError {
    /// No device or input is available
    NotAvailable(String),
    /// Reading the photo failed
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Image(e) => write!(f, "Image error: {}", e),
            AppError::Persist(e) => write!(f, "Persist error: {}", e),
            AppError::Session(e) => write!(f, "Session error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "Decode failed: {}", msg),
            ImageError::Encode(msg) => write!(f, "Encode failed: {}", msg),
            ImageError::InvalidImage { width, height } => {
                write!(f, "Invalid image dimensions {}x{}", width, height)
            }
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::SourceUnavailable(msg) => write!(f, "Capture source unavailable: {}", msg),
            CaptureError::FilterFailed(msg) => write!(f, "Filter failed: {}", msg),
            CaptureError::Storage(msg) => write!(f, "Failed to store original: {}", msg),
            CaptureError::Persist(e) => write!(f, "Failed to record pair: {}", e),
            CaptureError::Busy => write!(f, "A capture is already in progress"),
        }
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Closed => write!(f, "Session is closed"),
            SessionError::Capture(e) => write!(f, "{}", e),
            SessionError::Persist(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for CaptureSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureSourceError::NotAvailable(msg) => write!(f, "Source not available: {}", msg),
            CaptureSourceError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for ImageError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for PersistError {}
impl std::error::Error for SessionError {}
impl std::error::Error for CaptureSourceError {}

// Conversions from sub-errors to AppError
impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        AppError::Image(err)
    }
}

impl From<PersistError> for AppError {
    fn from(err: PersistError) -> Self {
        AppError::Persist(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Capture(e) => AppError::Capture(e),
            SessionError::Persist(e) => AppError::Persist(e),
            other => AppError::Session(other),
        }
    }
}

impl From<CaptureSourceError> for AppError {
    fn from(err: CaptureSourceError) -> Self {
        AppError::Capture(err.into())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

// Conversions into CaptureError
impl From<CaptureSourceError> for CaptureError {
    fn from(err: CaptureSourceError) -> Self {
        CaptureError::SourceUnavailable(err.to_string())
    }
}

impl From<ImageError> for CaptureError {
    fn from(err: ImageError) -> Self {
        CaptureError::FilterFailed(err.to_string())
    }
}

impl From<PersistError> for CaptureError {
    fn from(err: PersistError) -> Self {
        CaptureError::Persist(err)
    }
}

impl From<CaptureError> for SessionError {
    fn from(err: CaptureError) -> Self {
        SessionError::Capture(err)
    }
}

impl From<PersistError> for SessionError {
    fn from(err: PersistError) -> Self {
        SessionError::Persist(err)
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::WriteFailed(err.to_string())
    }
}

impl From<std::io::Error> for CaptureSourceError {
    fn from(err: std::io::Error) -> Self {
        CaptureSourceError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_maps_to_source_unavailable() {
        let err: CaptureError = CaptureSourceError::NotAvailable("no camera".into()).into();
        assert!(matches!(err, CaptureError::SourceUnavailable(_)));
    }

    #[test]
    fn test_session_error_flattens_into_app_error() {
        let err: AppError = SessionError::Capture(CaptureError::Busy).into();
        assert!(matches!(err, AppError::Capture(CaptureError::Busy)));

        let err: AppError = SessionError::Closed.into();
        assert!(matches!(err, AppError::Session(SessionError::Closed)));
    }

    #[test]
    fn test_bad_source_file_is_a_capture_error() {
        let err: AppError = CaptureSourceError::NotAvailable("txt".into()).into();
        match err {
            AppError::Capture(CaptureError::SourceUnavailable(msg)) => assert!(msg.contains("txt")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_image_error_maps_to_filter_failed() {
        let err: CaptureError = ImageError::InvalidImage {
            width: 0,
            height: 4,
        }
        .into();
        match err {
            CaptureError::FilterFailed(msg) => assert!(msg.contains("0x4")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
