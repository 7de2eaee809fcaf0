//! Viewport configuration with TOML preset support.
//!
//! Camera projection, navigation sensitivity and the default ground target
//! are consolidated here. Options serialize to/from TOML so hosts can ship
//! presets; every section uses `#[serde(default)]`, so a preset only needs
//! the fields it overrides.

mod camera;
mod ground;
mod navigation;

use std::path::Path;

pub use camera::CameraOptions;
pub use ground::GroundOptions;
pub use navigation::NavigationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and framing parameters.
    pub camera: CameraOptions,
    /// Orbit navigation parameters.
    pub navigation: NavigationOptions,
    /// Default pick target.
    pub ground: GroundOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`ViewportError::OptionsParse`] for malformed TOML and for values
    /// rejected by [`validate`](Self::validate).
    pub fn from_toml(content: &str) -> Result<Self, ViewportError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| ViewportError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check every section for values the controller cannot use.
    ///
    /// # Errors
    ///
    /// [`ViewportError::OptionsParse`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ViewportError> {
        self.camera.validate()?;
        self.navigation.validate()
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`ViewportError::Io`] if the file cannot be read, otherwise as for
    /// [`from_toml`](Self::from_toml).
    pub fn load(path: &Path) -> Result<Self, ViewportError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`ViewportError::Io`] if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ViewportError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewportError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
