//! Module discovery and resolution
//!
//! A module is a YAML file of request definitions under `module_root` (or an
//! inline entry of `wapi.yml`). Loading one merges in the environment of the
//! active space and, when the module names a `parent`, layers it on top of
//! the parent definition.

use crate::config::parse::read_mapping;
use crate::config::types::{requests_of, Config, Module, DEFAULT_MODULE_NAME, YAML_EXTENSION};
use crate::error::{ConfigError, WapiError};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

impl Config {
    /// Names of the modules under `module_root`, hidden files excluded
    pub fn get_modules(&self) -> Result<Vec<String>, WapiError> {
        let entries = fs::read_dir(&self.module_root).map_err(|e| ConfigError::ReadFile {
            path: self.module_root.clone(),
            error: e.to_string(),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let file_name = entry?.file_name().to_string_lossy().into_owned();
            if file_name.starts_with('.') {
                continue;
            }
            let name = match file_name.strip_suffix(YAML_EXTENSION) {
                Some(stem) => stem.to_string(),
                None => file_name,
            };
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    /// `<module_root>/<name>.yml`; an empty name selects the default module
    pub fn get_module_path(&self, module_name: &str) -> PathBuf {
        let name = if module_name.is_empty() {
            DEFAULT_MODULE_NAME
        } else {
            module_name
        };
        self.module_root.join(format!("{}{}", name, YAML_EXTENSION))
    }

    /// `<env_root>/<space>.yml`; an empty space selects the configured one
    pub fn get_env_path(&self, space_name: &str) -> PathBuf {
        let space = if space_name.is_empty() {
            self.space_name.as_str()
        } else {
            space_name
        };
        self.env_root.join(format!("{}{}", space, YAML_EXTENSION))
    }

    pub fn get_body_path(&self, body_name: &str) -> PathBuf {
        self.body_root.join(body_name)
    }

    /// File name of the body for one request
    pub fn body_name(space_name: &str, module_name: &str, request_name: &str) -> String {
        format!("{}_{}_{}", space_name, module_name, request_name)
    }

    /// Variables of `space`: the shared `env` overlaid by the space file
    pub fn load_env(&self, space_name: &str) -> Result<Mapping, WapiError> {
        let mut env = self.env.clone();
        let env_path = self.get_env_path(space_name);
        debug!("env_path {}", env_path.display());
        if env_path.exists() {
            merge_mapping(&mut env, read_mapping(&env_path)?);
        }
        Ok(env)
    }

    /// Raw `requests` of a module file, without any merging
    pub fn get_requests(&self, module_name: &str) -> Result<Vec<Mapping>, WapiError> {
        let definition = read_mapping(&self.get_module_path(module_name))?;
        Ok(requests_of(&definition).into_iter().cloned().collect())
    }

    /// Load a module with env and parent merged in
    pub fn get_module(&self, module_name: &str, space_name: &str) -> Result<Module, WapiError> {
        info!("Module: {}", module_name);
        let mut definition = self.read_module(module_name)?;

        let module_env = match definition.remove("env") {
            Some(Value::Mapping(env)) => env,
            _ => Mapping::new(),
        };
        let mut env = module_env;
        merge_mapping(&mut env, self.load_env(space_name)?);
        definition.insert(Value::from("env"), Value::Mapping(env));

        let parent = definition
            .get("parent")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(parent) = parent {
            if parent == module_name {
                return Err(ConfigError::Invalid(format!(
                    "module '{}' names itself as parent",
                    module_name
                ))
                .into());
            }
            let mut parent_definition = read_mapping(&self.get_module_path(&parent))?;
            merge_mapping(&mut parent_definition, definition);
            definition = parent_definition;
        }

        Ok(Module {
            name: module_name.to_string(),
            definition,
        })
    }

    fn read_module(&self, module_name: &str) -> Result<Mapping, WapiError> {
        let inline = self
            .modules
            .iter()
            .find(|m| m.get("module").and_then(Value::as_str) == Some(module_name));
        if let Some(definition) = inline {
            return Ok(definition.clone());
        }

        let path = self.get_module_path(module_name);
        info!("Module path: {}", path.display());
        if !path.exists() {
            return Err(ConfigError::ModuleNotFound(module_name.to_string()).into());
        }
        read_mapping(&path)
    }
}

/// Deep-merge `overlay` into `base`; overlay wins on conflicting scalars
pub fn merge_mapping(base: &mut Mapping, overlay: Mapping) {
    for (key, value) in overlay {
        match value {
            Value::Mapping(incoming) => match base.get_mut(&key) {
                Some(Value::Mapping(existing)) => merge_mapping(existing, incoming),
                _ => {
                    base.insert(key, Value::Mapping(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
