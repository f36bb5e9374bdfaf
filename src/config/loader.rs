use std::path::Path;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ExecutorConfig;

/// File names probed by `find_config`, in order of preference.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["volley.toml", "volley.json"];

/// Loads the first of `volley.toml` and `volley.json` found in `dir`.
/// Returns `None` when neither exists.
///
/// # Errors
///
/// Returns an error when the file found cannot be read or parsed.
pub fn find_config(dir: &Path) -> AppResult<Option<ExecutorConfig>> {
    let Some(path) = CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
    else {
        return Ok(None);
    };
    load_config_file(&path).map(Some)
}

/// Loads one `.toml` or `.json` configuration file.
///
/// # Errors
///
/// Returns an error when the file cannot be read, fails to parse, or has an
/// unsupported extension.
pub fn load_config_file(path: &Path) -> AppResult<ExecutorConfig> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
