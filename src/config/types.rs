//! Core configuration types
//!
//! This module defines the data structures behind a `wapi.yml` file and the
//! module definitions it points at.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;

/// Name of the configuration file inside a config root
pub const CONFIG_FILE_NAME: &str = "wapi.yml";

/// Extension of module and env files
pub const YAML_EXTENSION: &str = ".yml";

/// Module used when a command names none
pub const DEFAULT_MODULE_NAME: &str = "default";

/// Space used when neither the line nor `wapi.yml` names one
pub const DEFAULT_SPACE_NAME: &str = "default";

/// Environment variable overriding the config root
pub const ROOT_ENV_VAR: &str = "WAPI_ROOT";

/// Contents of `wapi.yml` as written by the user
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    /// Directory of `<space>.yml` env files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_root: Option<String>,

    /// Directory of `<module>.yml` request definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_root: Option<String>,

    /// Directory of request bodies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_root: Option<String>,

    /// Directory responses are saved into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_root: Option<String>,

    /// Active space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_name: Option<String>,

    /// Variables shared by every module
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub env: Mapping,

    /// Modules defined inline instead of under `module_root`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Mapping>,
}

/// Resolved configuration with every root turned into a usable path
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `wapi.yml`
    pub root: PathBuf,

    pub env_root: PathBuf,

    pub module_root: PathBuf,

    pub body_root: PathBuf,

    pub response_root: PathBuf,

    pub space_name: String,

    pub env: Mapping,

    pub modules: Vec<Mapping>,
}

/// A module after env and parent merging
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,

    /// The merged definition
    pub definition: Mapping,
}

impl Module {
    /// The merged `env` mapping
    pub fn env(&self) -> Mapping {
        match self.definition.get("env") {
            Some(Value::Mapping(env)) => env.clone(),
            _ => Mapping::new(),
        }
    }

    /// Request definitions in file order
    pub fn requests(&self) -> Vec<&Mapping> {
        requests_of(&self.definition)
    }

    /// Names of the requests that carry one
    pub fn request_names(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|req| req.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }

    /// Render the definition back to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.definition)
    }
}

/// The `requests` sequence of a module mapping
pub(crate) fn requests_of(definition: &Mapping) -> Vec<&Mapping> {
    match definition.get("requests") {
        Some(Value::Sequence(items)) => items.iter().filter_map(Value::as_mapping).collect(),
        _ => Vec::new(),
    }
}
