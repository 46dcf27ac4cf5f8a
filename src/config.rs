//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/animal-game/animal-game.toml`
//! 3. Environment variables: `ANIMAL_GAME_*` prefix
//! 4. Command line (`--file`), applied by the caller

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, DEFAULT_SEED_ANIMAL};

const APP_NAME: &str = "animal-game";
const KNOWLEDGE_FILE_NAME: &str = "knowledge.txt";

/// Unified configuration for animal-game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Where learned knowledge is kept between sessions
    pub knowledge_file: PathBuf,
    /// Animal the game knows before anything is learned
    pub seed_animal: String,
    /// Greet the player before the first question
    pub intro: bool,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub knowledge_file: Option<PathBuf>,
    pub seed_animal: Option<String>,
    pub intro: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            knowledge_file: default_knowledge_file(),
            seed_animal: DEFAULT_SEED_ANIMAL.to_string(),
            intro: true,
        }
    }
}

/// Default knowledge file in the XDG data directory.
fn default_knowledge_file() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join(KNOWLEDGE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(format!("{}.txt", APP_NAME)))
}

/// Get the XDG config directory for animal-game.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{}.toml", APP_NAME)))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.knowledge_file.to_string_lossy().as_ref());
        self.knowledge_file = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            knowledge_file: overlay
                .knowledge_file
                .clone()
                .unwrap_or_else(|| self.knowledge_file.clone()),
            seed_animal: overlay
                .seed_animal
                .clone()
                .unwrap_or_else(|| self.seed_animal.clone()),
            intro: overlay.intro.unwrap_or(self.intro),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/animal-game/animal-game.toml`
    /// 3. Environment variables: `ANIMAL_GAME_*` prefix
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` in place of the global config.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables
        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths();

        Ok(current)
    }

    /// Apply ANIMAL_GAME_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ANIMAL_GAME").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("knowledge_file") {
            settings.knowledge_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("seed_animal") {
            settings.seed_animal = val;
        }
        if let Ok(val) = config.get_bool("intro") {
            settings.intro = val;
        }

        Ok(settings)
    }

    /// Override the knowledge file (e.g. from `--file`).
    pub fn with_knowledge_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.knowledge_file = path;
            self.expand_paths();
        }
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# animal-game configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/animal-game/animal-game.toml
#   Env:    ANIMAL_GAME_* environment variables
#   CLI:    --file overrides knowledge_file

# File holding everything the game has learned
# knowledge_file = "~/.local/share/animal-game/knowledge.txt"

# Animal known before anything is learned
# seed_animal = "cat"

# Greet the player before the first question
# intro = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
