//! Session settings remembered between runs

use crate::io::error::{Result, StampError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The user's last chosen inputs and output size
///
/// Every field is optional so partially filled files keep working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Source image or directory of images
    pub source: Option<PathBuf>,
    /// Stamp pattern image
    pub stamp: Option<PathBuf>,
    /// Full resolution output width
    pub width: Option<u32>,
    /// Full resolution output height
    pub height: Option<u32>,
}

impl Settings {
    /// Load settings, treating a missing file as empty settings
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved settings");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(StampError::FileSystem {
                    path: path.to_path_buf(),
                    operation: "read settings",
                    source: e,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| StampError::Settings {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write settings as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| StampError::Settings {
            path: path.to_path_buf(),
            source: e,
        })?;

        std::fs::write(path, json).map_err(|e| StampError::FileSystem {
            path: path.to_path_buf(),
            operation: "write settings",
            source: e,
        })
    }

    /// Fields set in `overrides` win over the saved values
    #[must_use]
    pub fn merged_with(&self, overrides: &Self) -> Self {
        Self {
            source: overrides.source.clone().or_else(|| self.source.clone()),
            stamp: overrides.stamp.clone().or_else(|| self.stamp.clone()),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
        }
    }
}
