//! Centralized viewer options with TOML file support.
//!
//! All tweakable settings (camera defaults, input sensitivity, animation
//! timing, scene primitives, shading, keybindings) are consolidated here.
//! Every sub-struct uses `#[serde(default)]` so partial TOML files work.

mod animation;
mod camera;
mod display;
mod input;
mod keybindings;
mod scene;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use display::{DisplayOptions, ShadingMode};
pub use input::InputOptions;
pub use keybindings::KeybindingOptions;
pub use scene::{AxisOptions, SceneOptions};
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Initial camera state and zoom factor.
    pub camera: CameraOptions,
    /// Drag sensitivity and movement step.
    pub input: InputOptions,
    /// Timer interval and phase increments.
    pub animation: AnimationOptions,
    /// Torus and axis primitives.
    pub scene: SceneOptions,
    /// Shading mode and clear color.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] for malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ViewerError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Serialize to pretty-printed TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ViewerError> {
        toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file cannot be read, or
    /// [`ViewerError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        let opts = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file or its parent directory
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }
}
