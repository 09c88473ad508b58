//! User Preferences
//!
//! The theme and the key-click sound survive across sessions. Everything
//! else (scientific layout, open panels) is session state.
//!
//! # Storage
//!
//! [`FilePreferenceStore`] keeps a small JSON object with two fixed keys:
//!
//! ```json
//! { "calcTheme": "pastel-blue", "calcSound": false }
//! ```
//!
//! Stored under `$XDG_CONFIG_HOME/calc-keypad/preferences.json`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

/// Storage key for the theme id
pub const THEME_KEY: &str = "calcTheme";

/// Storage key for the sound flag
pub const SOUND_KEY: &str = "calcSound";

/// Volume of the key-click cue (0.0-1.0)
pub const CUE_VOLUME: f32 = 0.4;

/// Colour theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Dark background, the default
    #[default]
    Dark,
    /// Soft blue
    PastelBlue,
    /// Soft pink
    PastelPink,
    /// Light grey on white
    GreyWhite,
    /// Muted green
    SageGreen,
}

impl Theme {
    /// Every theme, in picker order
    #[must_use]
    pub fn all() -> [Theme; 5] {
        [
            Self::Dark,
            Self::PastelBlue,
            Self::PastelPink,
            Self::GreyWhite,
            Self::SageGreen,
        ]
    }

    /// Stable identifier used in storage
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::PastelBlue => "pastel-blue",
            Self::PastelPink => "pastel-pink",
            Self::GreyWhite => "grey-white",
            Self::SageGreen => "sage-green",
        }
    }

    /// Parse a stored identifier
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.id() == id)
    }

    /// Human-readable name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::PastelBlue => "Pastel Blue",
            Self::PastelPink => "Pastel Pink",
            Self::GreyWhite => "Grey White",
            Self::SageGreen => "Sage Green",
        }
    }

    /// The cue that plays for key presses under this theme
    #[must_use]
    pub fn cue(self) -> SoundCue {
        SoundCue { theme: self }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A key-click sound
///
/// Surfaces decide how to play it; the asset name is what a surface with
/// real audio would load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundCue {
    /// Theme the cue belongs to
    pub theme: Theme,
}

impl SoundCue {
    /// Audio asset file for this cue
    #[must_use]
    pub fn asset(self) -> &'static str {
        match self.theme {
            Theme::Dark => "darkAudio.mp3",
            Theme::PastelBlue => "blueAudio.mp3",
            Theme::PastelPink => "pinkAudio.mp3",
            Theme::GreyWhite => "oysterAudio.mp3",
            Theme::SageGreen => "greenAudio.mp3",
        }
    }

    /// Playback volume
    #[must_use]
    pub fn volume(self) -> f32 {
        CUE_VOLUME
    }
}

/// Persisted preferences
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    /// Colour theme
    pub theme: Theme,
    /// Whether key presses click
    pub sound_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            sound_enabled: true,
        }
    }
}

/// On-disk shape, tolerant of unknown or missing values
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(rename = "calcTheme", default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
    #[serde(rename = "calcSound", default, skip_serializing_if = "Option::is_none")]
    sound: Option<bool>,
}

impl StoredPreferences {
    fn resolve(self) -> Preferences {
        let theme = match self.theme.as_deref() {
            None => Theme::default(),
            Some(id) => Theme::from_id(id).unwrap_or_else(|| {
                tracing::warn!(theme = %id, "Unknown stored theme, using default");
                Theme::default()
            }),
        };
        Preferences {
            theme,
            sound_enabled: self.sound.unwrap_or(true),
        }
    }
}

impl From<Preferences> for StoredPreferences {
    fn from(prefs: Preferences) -> Self {
        Self {
            theme: Some(prefs.theme.id().to_string()),
            sound: Some(prefs.sound_enabled),
        }
    }
}

/// Errors reading or writing preferences
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Filesystem failure
    #[error("preference file {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not the expected JSON
    #[error("malformed preference file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Preference persistence
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load stored preferences, defaults for anything missing
    async fn load(&self) -> Result<Preferences, PreferenceError>;

    /// Persist preferences
    async fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError>;
}

/// Default preference file path
///
/// `$XDG_CONFIG_HOME/calc-keypad/preferences.json`
#[must_use]
pub fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("calc-keypad").join("preferences.json"))
}

/// JSON file store
#[derive(Clone, Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store preferences at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing this store
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load(&self) -> Result<Preferences, PreferenceError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No stored preferences");
                return Ok(Preferences::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let stored: StoredPreferences = serde_json::from_str(&content)?;
        Ok(stored.resolve())
    }

    async fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(&StoredPreferences::from(*prefs))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            theme = %prefs.theme,
            sound = prefs.sound_enabled,
            "Saved preferences"
        );
        Ok(())
    }
}

/// In-memory store (tests and ephemeral sessions)
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    prefs: Mutex<Option<Preferences>>,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `prefs`
    #[must_use]
    pub fn with(prefs: Preferences) -> Self {
        Self {
            prefs: Mutex::new(Some(prefs)),
        }
    }

    /// Last saved preferences, if any
    pub async fn saved(&self) -> Option<Preferences> {
        *self.prefs.lock().await
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self) -> Result<Preferences, PreferenceError> {
        Ok(self.prefs.lock().await.unwrap_or_default())
    }

    async fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError> {
        *self.prefs.lock().await = Some(*prefs);
        Ok(())
    }
}
