//! Persistence for console settings.
//!
//! [`ConsoleConfig`] is read from and written to a RON file. Variables are
//! session state and are never saved.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use thiserror::Error;

use crate::config::ConsoleConfig;
use crate::core::{CommandHandlers, CommandHistory, CommandRegistry, ConCommand, ConsoleLog};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "console.ron";

/// Errors that can occur during config operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("IO error for '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Parse error for '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl ConsoleConfig {
    /// Load settings from a RON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        ron::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save settings to a RON file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let pretty = ron::ser::PrettyConfig::new().depth_limit(1);
        let contents =
            ron::ser::to_string_pretty(self, pretty).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load settings, falling back to defaults if the file is missing or bad.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Resource tracking the config file path.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub String);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(DEFAULT_CONFIG_FILE.to_string())
    }
}

/// Apply loaded settings, resizing history to the new capacity.
pub fn apply_config(loaded: ConsoleConfig, config: &mut ConsoleConfig, history: &mut CommandHistory) {
    history.set_capacity(loaded.max_history);
    *config = loaded;
}

/// System to load config on startup.
pub fn load_config_on_startup(
    mut config: ResMut<ConsoleConfig>,
    mut history: ResMut<CommandHistory>,
    config_path: Res<ConfigPath>,
) {
    let path = &config_path.0;

    if !Path::new(path).exists() {
        info!("No console config found at '{}', using defaults", path);
        return;
    }

    match ConsoleConfig::load(path) {
        Ok(loaded) => {
            info!("Loading console config from '{}'", path);
            debug!("Console config: {:?}", loaded);
            apply_config(loaded, &mut config, &mut history);
        }
        Err(e) => {
            error!("Failed to load console config: {}", e);
        }
    }
}

/// Register `writeconfig`, which saves the current settings to [`ConfigPath`].
pub(crate) fn register_persist_commands(registry: &mut CommandRegistry, handlers: &mut CommandHandlers) {
    crate::register(
        registry,
        handlers,
        ConCommand::new("writeconfig", |_, world| {
            let path = world.resource::<ConfigPath>().0.clone();
            world.resource::<ConsoleConfig>().save(&path)?;
            world
                .resource_mut::<ConsoleLog>()
                .success(format!("Console settings written to '{path}'"));
            Ok(())
        })
        .description("Save console settings to the config file"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_config_file_roundtrip() {
        let config = ConsoleConfig {
            max_history: 25,
            execution_symbol: '$',
            match_threshold: 4,
        };

        let temp = NamedTempFile::new().unwrap();
        config.save(temp.path()).unwrap();

        let loaded = ConsoleConfig::load(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("console.ron");
        ConsoleConfig::default().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_config_file_load_missing() {
        let result = ConsoleConfig::load("nonexistent_file.ron");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_config_file_load_or_default() {
        let config = ConsoleConfig::load_or_default("nonexistent_file.ron");
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_config_parse_ron_partial() {
        let ron_content = r#"(
    max_history: 3,
)"#;

        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(ron_content.as_bytes()).unwrap();
        temp.flush().unwrap();

        let config = ConsoleConfig::load(temp.path()).unwrap();
        assert_eq!(config.max_history, 3);
        assert_eq!(config.execution_symbol, '>');
    }

    #[test]
    fn test_config_parse_error() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"(max_history: \"lots\")").unwrap();
        temp.flush().unwrap();

        assert!(matches!(ConsoleConfig::load(temp.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_apply_config_resizes_history() {
        let mut config = ConsoleConfig::default();
        let mut history = CommandHistory::new(10);
        for i in 0..10 {
            history.record(format!("cmd {i}"));
        }

        let loaded = ConsoleConfig {
            max_history: 2,
            ..Default::default()
        };
        apply_config(loaded, &mut config, &mut history);

        assert_eq!(config.max_history, 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0), Some("cmd 9"));
    }
}
