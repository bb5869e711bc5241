//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the catalog file path
pub const ENV_CATALOG_PATH: &str = "BOOKSHELF_CATALOG_PATH";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "BOOKSHELF_LOG_LEVEL";

/// Main configuration manager
///
/// Resolves the config file location and loads, saves and validates it.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// The default directory follows XDG base directory specification:
    /// - Linux: `~/.config/bookshelf/`
    /// - macOS: `~/Library/Application Support/bookshelf/`
    /// - Windows: `%APPDATA%\bookshelf\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE));

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    /// Returns the default config directory based on the platform
    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "bookshelf")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.persistence.path().to_path_buf()
    }

    /// Loads the configuration from file
    ///
    /// A missing file gives the defaults. A blank or unparsable file is an
    /// error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    ///
    /// Errors are logged but the function always returns a valid config.
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves the configuration, refusing values that fail validation
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Writes a default config file if one doesn't exist
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.save(&Config::default())?;
        Ok(true)
    }

    /// Validates the current configuration file
    ///
    /// Returns all validation errors found, or an empty list if valid.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the config (or defaults) and applies environment overrides
    ///
    /// Recognised variables: `BOOKSHELF_CATALOG_PATH`, `BOOKSHELF_LOG_LEVEL`.
    /// An unparsable log level is ignored with a warning.
    pub fn load_with_env_overrides(&self) -> Config {
        let mut config = self.load_or_default();
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        config
    }
}

/// Applies overrides from `lookup` (normally the process environment)
fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_CATALOG_PATH).filter(|p| !p.trim().is_empty()) {
        log::debug!("Catalog path override: {}", path);
        config.catalog.path = PathBuf::from(path);
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        match level.parse::<LogLevel>() {
            Ok(level) => config.app.log_level = level,
            Err(e) => log::warn!("Ignoring {}: {}", ENV_LOG_LEVEL, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn setup_test_manager() -> (TempDir, ConfigManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())
            .expect("Failed to create manager");
        (temp_dir, manager)
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_load_or_default_with_missing_file() {
        let (_temp_dir, manager) = setup_test_manager();
        let config = manager.load_or_default();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, manager) = setup_test_manager();

        let mut config = Config::default();
        config.app.log_level = LogLevel::Trace;

        manager.save(&config).expect("Should save config");
        let loaded = manager.load().expect("Should load config");

        assert_eq!(loaded.app.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_initialize_creates_file() {
        let (_temp_dir, manager) = setup_test_manager();

        let created = manager.initialize().expect("Should initialize");
        assert!(created);
        assert!(manager.config_path().exists());
    }

    #[test]
    fn test_initialize_with_existing_file() {
        let (_temp_dir, manager) = setup_test_manager();

        manager.save(&Config::default()).expect("Should save");

        let created = manager.initialize().expect("Should initialize");
        assert!(!created);
    }

    #[test]
    fn test_validate_valid_config() {
        let (_temp_dir, manager) = setup_test_manager();
        manager.save(&Config::default()).expect("Should save");

        let errors = manager.validate().expect("Should validate");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_reports_bad_file_values() {
        let (_temp_dir, manager) = setup_test_manager();
        std::fs::write(manager.config_path(), "[catalog]\npath = \"\"\n").expect("Should write");

        let errors = manager.validate().expect("Should validate");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_env_override_catalog_path() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, env(&[(ENV_CATALOG_PATH, "/tmp/shelf.json")]));
        assert_eq!(config.catalog.path, PathBuf::from("/tmp/shelf.json"));
    }

    #[test]
    fn test_env_override_blank_path_ignored() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, env(&[(ENV_CATALOG_PATH, "  ")]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_override_log_level() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, env(&[(ENV_LOG_LEVEL, "debug")]));
        assert_eq!(config.app.log_level, LogLevel::Debug);

        apply_env_overrides(&mut config, env(&[(ENV_LOG_LEVEL, "very-loud")]));
        assert_eq!(config.app.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_config_file_path() {
        let (_temp_dir, manager) = setup_test_manager();
        assert!(manager.config_path().ends_with("config.toml"));
    }
}
