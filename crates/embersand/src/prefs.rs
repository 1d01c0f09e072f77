use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The content rendered behind each effect in the preview pane.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStyle {
    /// A flag emoji.
    Emoji,
    /// A bundled photograph.
    Image,
    /// A solid rectangle.
    Shape,
    /// An interesting glyph.
    #[default]
    Symbol,
}

/// Sandbox preferences that survive between runs. Descriptor identities are
/// deliberately absent; only presentation choices are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SandboxPrefs {
    pub preview: PreviewStyle,
    pub fps: Option<f32>,
    pub size: Option<[u32; 2]>,
}

impl SandboxPrefs {
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read preferences at {}", path.display()))?;
            let prefs: Self = toml::from_str(&contents)
                .with_context(|| format!("failed to parse preferences at {}", path.display()))?;
            Ok(prefs)
        } else {
            Ok(Self::default())
        }
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("preferences path has no parent: {}", path.display()))?;
        fs::create_dir_all(dir).with_context(|| {
            format!(
                "failed to prepare directory for preferences at {}",
                dir.display()
            )
        })?;
        let serialized = toml::to_string_pretty(self)
            .context("failed to serialize preferences to TOML")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write preferences to {}", path.display()))?;
        Ok(())
    }
}

/// Default on-disk location for the preferences file.
pub fn default_path() -> Result<PathBuf> {
    let dirs = directories_next::ProjectDirs::from("", "", "embersand")
        .ok_or_else(|| anyhow::anyhow!("unable to determine a config directory"))?;
    Ok(dirs.config_dir().join("prefs.toml"))
}
