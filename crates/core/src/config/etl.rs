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

use std::collections::HashMap;
use std::str::FromStr;

use strum_macros::EnumIter;

use crate::config::error::ConfigError;
use crate::config::{ConfigParser, EtlConfigValue};
use crate::Result;

/// Configurations understood by the ETL job.
///
/// **Example**
///
/// ```rust
/// use sparkify_core::config::etl::EtlConfig::SongDataPattern;
/// use sparkify_core::config::EtlConfigs;
///
/// let configs = EtlConfigs::empty();
/// let pattern: String = configs.get_or_default(SongDataPattern).unwrap().into();
/// assert_eq!(pattern, "song_data/*/*/*/*.json");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum EtlConfig {
    /// Access key id handed to the object store.
    AwsAccessKeyId,

    /// Secret access key handed to the object store.
    AwsSecretAccessKey,

    /// Base URI of the raw song and log data.
    InputData,

    /// Base URI under which the star-schema tables are written.
    OutputData,

    /// Glob, relative to [EtlConfig::InputData], selecting song JSON files.
    SongDataPattern,

    /// Glob, relative to [EtlConfig::InputData], selecting event log JSON files.
    LogDataPattern,

    /// Number of partitions the query engine plans with. 0 leaves the engine default.
    TargetPartitions,

    /// Whether existing table output is replaced (true) or appended to (false).
    Overwrite,
}

impl AsRef<str> for EtlConfig {
    fn as_ref(&self) -> &str {
        match self {
            Self::AwsAccessKeyId => "KEYS.AWS_ACCESS_KEY_ID",
            Self::AwsSecretAccessKey => "KEYS.AWS_SECRET_ACCESS_KEY",
            Self::InputData => "S3.INPUT_DATA",
            Self::OutputData => "S3.OUTPUT_DATA",
            Self::SongDataPattern => "ETL.SONG_DATA_PATTERN",
            Self::LogDataPattern => "ETL.LOG_DATA_PATTERN",
            Self::TargetPartitions => "ETL.TARGET_PARTITIONS",
            Self::Overwrite => "ETL.OVERWRITE",
        }
    }
}

impl ConfigParser for EtlConfig {
    type Output = EtlConfigValue;

    fn default_value(&self) -> Option<EtlConfigValue> {
        match self {
            Self::SongDataPattern => Some(EtlConfigValue::String(
                "song_data/*/*/*/*.json".to_string(),
            )),
            Self::LogDataPattern => Some(EtlConfigValue::String("log_data/*/*/*.json".to_string())),
            Self::TargetPartitions => Some(EtlConfigValue::UInteger(0usize)),
            Self::Overwrite => Some(EtlConfigValue::Boolean(true)),
            _ => None,
        }
    }

    fn is_required(&self) -> bool {
        matches!(self, Self::InputData | Self::OutputData)
    }

    fn parse_value(&self, configs: &HashMap<String, String>) -> Result<Self::Output> {
        let get_result = configs
            .get(self.as_ref())
            .map(|v| v.as_str())
            .ok_or(ConfigError::NotFound(self.as_ref().to_string()));

        match self {
            Self::AwsAccessKeyId | Self::AwsSecretAccessKey => get_result
                .map(|v| EtlConfigValue::String(v.to_string()))
                .map_err(Into::into),
            Self::InputData | Self::OutputData | Self::SongDataPattern | Self::LogDataPattern => {
                let v = get_result?;
                if v.is_empty() {
                    return Err(ConfigError::InvalidValue(
                        self.as_ref().to_string(),
                        "value must not be empty".to_string(),
                    )
                    .into());
                }
                Ok(EtlConfigValue::String(v.to_string()))
            }
            Self::TargetPartitions => get_result
                .and_then(|v| {
                    usize::from_str(v).map_err(|e| {
                        ConfigError::ParseInt(self.as_ref().to_string(), v.to_string(), e)
                    })
                })
                .map(EtlConfigValue::UInteger)
                .map_err(Into::into),
            Self::Overwrite => get_result
                .and_then(|v| {
                    bool::from_str(&v.to_ascii_lowercase()).map_err(|e| {
                        ConfigError::ParseBool(self.as_ref().to_string(), v.to_string(), e)
                    })
                })
                .map(EtlConfigValue::Boolean)
                .map_err(Into::into),
        }
    }
}
