//! Configuration root discovery and `wapi.yml` loading

use crate::config::types::{
    Config, ConfigFile, CONFIG_FILE_NAME, DEFAULT_SPACE_NAME, ROOT_ENV_VAR,
};
use crate::error::{ConfigError, ConfigResult, WapiError};
use directories::BaseDirs;
use serde_yaml::Mapping;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_ENV_ROOT: &str = "env";
const DEFAULT_MODULE_ROOT: &str = "module";
const DEFAULT_BODY_ROOT: &str = "body";
const DEFAULT_RESPONSE_ROOT: &str = "response";

/// Directory name of the default root under the home directory
const DEFAULT_ROOT_DIR: &str = ".wapi";

/// Pick the config root: explicit path, then `$WAPI_ROOT`, then `~/.wapi`
pub fn resolve_root(explicit: Option<&Path>) -> ConfigResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env::var_os(ROOT_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_root()
}

/// `~/.wapi`
pub fn default_root() -> ConfigResult<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DEFAULT_ROOT_DIR))
        .ok_or(ConfigError::RootNotFound)
}

/// Parse the contents of a `wapi.yml` file
pub fn parse_config(yaml: &str) -> Result<ConfigFile, WapiError> {
    if yaml.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// Read a YAML file holding a mapping; an empty file is an empty mapping
pub fn read_mapping(path: &Path) -> Result<Mapping, WapiError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    if contents.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let mapping: Option<Mapping> = serde_yaml::from_str(&contents)?;
    Ok(mapping.unwrap_or_default())
}

impl Config {
    /// Load `<root>/wapi.yml`, falling back to defaults when it is absent
    pub fn load(root: &Path) -> Result<Self, WapiError> {
        debug!("Config load path: {}", root.display());
        let config_path = root.join(CONFIG_FILE_NAME);
        let file = if config_path.is_file() {
            let contents = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadFile {
                path: config_path.clone(),
                error: e.to_string(),
            })?;
            parse_config(&contents)?
        } else {
            debug!("{} not found, using defaults", config_path.display());
            ConfigFile::default()
        };

        let config = Self::from_file(root, file);
        if !config.response_root.exists() {
            fs::create_dir_all(&config.response_root)?;
        }
        Ok(config)
    }

    /// Load from a config root, or from a config file whose directory is the root
    pub fn load_path(path: &Path) -> Result<Self, WapiError> {
        if !path.is_file() {
            return Self::load(path);
        }
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        let config = Self::from_file(root, parse_config(&contents)?);
        if !config.response_root.exists() {
            fs::create_dir_all(&config.response_root)?;
        }
        Ok(config)
    }

    /// Resolve every root of `file` against `root` without touching the disk
    pub fn from_file(root: &Path, file: ConfigFile) -> Self {
        let resolve = |value: Option<String>, default: &str| {
            fmt_path(root, value.as_deref().unwrap_or(default))
        };

        Config {
            root: root.to_path_buf(),
            env_root: resolve(file.env_root, DEFAULT_ENV_ROOT),
            module_root: resolve(file.module_root, DEFAULT_MODULE_ROOT),
            body_root: resolve(file.body_root, DEFAULT_BODY_ROOT),
            response_root: resolve(file.response_root, DEFAULT_RESPONSE_ROOT),
            space_name: file
                .space_name
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SPACE_NAME.to_string()),
            env: file.env,
            modules: file.modules,
        }
    }
}

/// Resolve `path` against `root`; `~` expands to the home directory
pub fn fmt_path(root: &Path, path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest.trim_start_matches('/'));
        }
    }
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
