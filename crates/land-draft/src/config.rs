// Configuration loading and parsing (draft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub draft: DraftConfig,
    pub data_paths: DataPaths,
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire draft.toml file.
#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    draft: DraftConfig,
    data_paths: DataPaths,
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
    /// Fewest registered voters a draft may run with.
    pub min_voters: usize,
    /// Fixed seed for reproducible draws. Omit for a fresh draw every run.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub voters: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write the report here instead of stdout.
    #[serde(default)]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/draft.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer [`load_config_in`], which copies defaults first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let draft_path = base_dir.join("config").join("draft.toml");
    let draft_text = read_file(&draft_path)?;
    let draft_file: DraftFile =
        toml::from_str(&draft_text).map_err(|e| ConfigError::ParseError {
            path: draft_path.clone(),
            source: e,
        })?;

    let config = Config {
        draft: draft_file.draft,
        data_paths: draft_file.data_paths,
        output: draft_file.output,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        // create_new so an operator's edited config is never clobbered
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Loads config relative to `base_dir`, copying default config files first.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.draft.min_voters == 0 {
        return Err(ConfigError::ValidationError {
            field: "draft.min_voters".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.data_paths.voters.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.voters".into(),
            message: "must not be empty".into(),
        });
    }

    if let Some(path) = &config.output.path {
        if path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "output.path".into(),
                message: "must not be empty when set".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
