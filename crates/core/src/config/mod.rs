/*
 * Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

//! Configuration of the ETL job.
//!
//! Configs are read from an INI-style file (`dl.cfg` by default) and addressed
//! by [EtlConfig] keys of the form `SECTION.KEY`.
use std::any::type_name;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use strum::IntoEnumIterator;

use crate::config::error::ConfigError;
use crate::config::etl::EtlConfig;
use crate::config::util::{empty_options, parse_ini_data, split_config_key};
use crate::error::CoreError;
use crate::storage::Storage;
use crate::Result;

pub mod error;
pub mod etl;
pub mod util;

/// Environment variable that overrides the path of the config file.
pub const ETL_CONF_ENV: &str = "SPARKIFY_ETL_CONF";

/// Config file used when [ETL_CONF_ENV] is not set.
pub const DEFAULT_CONF_FILE: &str = "dl.cfg";

/// Section whose entries are handed to the object stores as storage options.
pub const CREDENTIALS_SECTION: &str = "KEYS";

pub trait ConfigParser: AsRef<str> {
    type Output;

    fn default_value(&self) -> Option<Self::Output>;

    fn is_required(&self) -> bool {
        false
    }

    fn validate(&self, configs: &HashMap<String, String>) -> Result<()> {
        match self.parse_value(configs) {
            Ok(_) => Ok(()),
            Err(CoreError::Config(ConfigError::NotFound(_))) if !self.is_required() => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn parse_value(&self, configs: &HashMap<String, String>) -> Result<Self::Output>;

    fn parse_value_or_default(&self, configs: &HashMap<String, String>) -> Result<Self::Output> {
        match self.parse_value(configs) {
            Err(CoreError::Config(ConfigError::NotFound(key))) => self
                .default_value()
                .ok_or_else(|| ConfigError::NotFound(key).into()),
            other => other,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EtlConfigValue {
    Boolean(bool),
    UInteger(usize),
    String(String),
}

impl From<EtlConfigValue> for bool {
    fn from(value: EtlConfigValue) -> Self {
        match value {
            EtlConfigValue::Boolean(v) => v,
            _ => panic!("Cannot cast {:?} to {}", value, type_name::<Self>()),
        }
    }
}

impl From<EtlConfigValue> for usize {
    fn from(value: EtlConfigValue) -> Self {
        match value {
            EtlConfigValue::UInteger(v) => v,
            _ => panic!("Cannot cast {:?} to {}", value, type_name::<Self>()),
        }
    }
}

impl From<EtlConfigValue> for String {
    fn from(value: EtlConfigValue) -> Self {
        match value {
            EtlConfigValue::Boolean(v) => v.to_string(),
            EtlConfigValue::UInteger(v) => v.to_string(),
            EtlConfigValue::String(v) => v,
        }
    }
}

/// Raw `SECTION.KEY -> value` configs of one ETL run.
#[derive(Clone, Debug)]
pub struct EtlConfigs {
    raw_configs: Arc<HashMap<String, String>>,
}

impl EtlConfigs {
    pub fn new<I, K, V>(raw_configs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let raw_configs = raw_configs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.into()))
            .collect();
        Self {
            raw_configs: Arc::new(raw_configs),
        }
    }

    pub fn empty() -> Self {
        Self::new(empty_options())
    }

    pub fn from_ini_str(data: &str) -> Result<Self> {
        Ok(Self::new(parse_ini_data(data)?))
    }

    /// Read and validate configs from an INI file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
        let configs = Self::from_ini_str(&data)?;
        configs.validate_all()?;
        debug!(
            "Loaded {} configs from {}",
            configs.raw_configs.len(),
            path.display()
        );
        Ok(configs)
    }

    /// Load configs from the file named by [ETL_CONF_ENV], falling back to
    /// [DEFAULT_CONF_FILE] in the working directory.
    pub fn load() -> Result<Self> {
        Self::from_file(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        env::var(ETL_CONF_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONF_FILE))
    }

    pub fn validate(&self, parser: impl ConfigParser<Output = EtlConfigValue>) -> Result<()> {
        parser.validate(&self.raw_configs)
    }

    pub fn validate_all(&self) -> Result<()> {
        EtlConfig::iter().try_for_each(|c| self.validate(c))
    }

    pub fn get(&self, parser: impl ConfigParser<Output = EtlConfigValue>) -> Result<EtlConfigValue> {
        parser.parse_value(&self.raw_configs)
    }

    pub fn get_or_default(
        &self,
        parser: impl ConfigParser<Output = EtlConfigValue>,
    ) -> Result<EtlConfigValue> {
        parser.parse_value_or_default(&self.raw_configs)
    }

    /// Storage options for the object stores, taken from the
    /// [CREDENTIALS_SECTION] and the process environment.
    pub fn storage_options(&self) -> HashMap<String, String> {
        self.resolve_storage_options(env::vars())
    }

    /// Every credential entry becomes a storage option with a lower-cased key,
    /// which is the form `object_store` parses (e.g. `aws_access_key_id`).
    /// Cloud env vars fill in keys the config file does not set.
    pub fn resolve_storage_options<I>(&self, env_vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut storage_options: HashMap<String, String> = self
            .raw_configs
            .iter()
            .filter_map(|(k, v)| match split_config_key(k) {
                (CREDENTIALS_SECTION, name) if !v.is_empty() => {
                    Some((name.to_ascii_lowercase(), v.clone()))
                }
                _ => None,
            })
            .collect();

        for (key, value) in env_vars {
            if Storage::CLOUD_STORAGE_PREFIXES
                .iter()
                .any(|prefix| key.starts_with(prefix))
            {
                storage_options
                    .entry(key.to_ascii_lowercase())
                    .or_insert(value);
            }
        }
        storage_options
    }
}
