//! Global error handling for filebundle
//!
//! Only request-level failures are represented here. Problems with an
//! individual file never surface as an error; they become a
//! [`SkipReason`](crate::types::SkipReason) on that file's outcome.

use std::io;
use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for bundling operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The directory walk could not enumerate an entry
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A folder scan was requested on something that is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// The request was cancelled between two files
    #[error("Bundling cancelled")]
    Cancelled,

    /// The classification thread pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for bundling operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Creates a BundleError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::BundleError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Lets the binary keep an io::Result main
impl From<BundleError> for io::Error {
    fn from(err: BundleError) -> Self {
        match err {
            BundleError::Io(e) => e,
            BundleError::Cancelled => io::Error::new(io::ErrorKind::Interrupted, "Bundling cancelled"),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
