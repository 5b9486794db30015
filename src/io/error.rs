//! Error types for loading, exporting and configuring renders

use std::fmt;
use std::path::PathBuf;

/// Every way a stampgrid operation can fail
///
/// Rendering itself never fails; these cover configuration, decoding,
/// export and settings persistence.
#[derive(Debug)]
pub enum StampError {
    /// A source or stamp file could not be read or decoded
    ImageLoad {
        /// File that was being decoded
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// A finished render could not be encoded or written
    ImageExport {
        /// Destination of the PNG
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Reading, writing or listing a path failed
    FileSystem {
        /// Path being accessed
        path: PathBuf,
        /// What was being done, e.g. `"create directory"`
        operation: &'static str,
        /// OS error
        source: std::io::Error,
    },

    /// A size, cell dimension, bias or path argument was rejected
    InvalidParameter {
        /// Parameter name as the user knows it
        parameter: &'static str,
        /// Offending value, rendered as text
        value: String,
        /// What a valid value looks like
        reason: String,
    },

    /// The settings file is not valid JSON for [`crate::io::settings::Settings`]
    Settings {
        /// Settings file
        path: PathBuf,
        /// JSON error with line and column
        source: serde_json::Error,
    },
}

impl fmt::Display for StampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "cannot decode '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(f, "cannot write render to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => write!(f, "{operation} failed for '{}': {source}", path.display()),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } if value.is_empty() => write!(f, "{parameter}: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "{parameter} = {value}: {reason}"),
            Self::Settings { path, source } => {
                write!(f, "settings file '{}' is malformed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Settings { source, .. } => Some(source),
            Self::InvalidParameter { .. } => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, StampError>;

// Conversions for `?` where no path is at hand; callers that know the path
// build the variant themselves.
impl From<image::ImageError> for StampError {
    fn from(source: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::new(),
            source,
        }
    }
}

impl From<std::io::Error> for StampError {
    fn from(source: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::new(),
            operation: "I/O",
            source,
        }
    }
}

impl From<serde_json::Error> for StampError {
    fn from(source: serde_json::Error) -> Self {
        Self::Settings {
            path: PathBuf::new(),
            source,
        }
    }
}

/// Reject `value` for `parameter`
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StampError {
    StampError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Reject a path argument with a message and no value
pub fn io_error(msg: &str) -> StampError {
    invalid_parameter("path", &"", &msg)
}
