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

use crate::config::error::ConfigError;
use crate::Result;

pub fn empty_options<'a>() -> std::iter::Empty<(&'a str, &'a str)> {
    std::iter::empty::<(&str, &str)>()
}

/// Parse INI-style config data into `SECTION.KEY -> value` pairs.
///
/// Section names are kept as written and option names are upper-cased, so
/// `[S3] input_data = ...` is addressed as `S3.INPUT_DATA`. A line is split at
/// the first `=` or `:`. Lines starting with `#` or `;` are comments.
pub fn parse_ini_data(data: &str) -> Result<HashMap<String, String>> {
    let mut options = HashMap::new();
    let mut section: Option<String> = None;
    for (i, raw_line) in data.lines().enumerate() {
        let line_no = i + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest.strip_suffix(']').map(str::trim).ok_or_else(|| {
                ConfigError::MalformedLine(line_no, format!("unterminated section header '{line}'"))
            })?;
            if name.is_empty() {
                return Err(
                    ConfigError::MalformedLine(line_no, "empty section name".to_string()).into(),
                );
            }
            section = Some(name.to_string());
            continue;
        }

        let Some(section_name) = section.as_deref() else {
            return Err(ConfigError::MalformedLine(
                line_no,
                format!("'{line}' appears before any section header"),
            )
            .into());
        };

        let Some(delim_pos) = line.find(['=', ':']) else {
            return Err(ConfigError::MalformedLine(
                line_no,
                format!("expected 'KEY=VALUE' but got '{line}'"),
            )
            .into());
        };
        let key = line[..delim_pos].trim();
        if key.is_empty() {
            return Err(ConfigError::MalformedLine(line_no, "empty key".to_string()).into());
        }
        let value = line[delim_pos + 1..].trim();
        options.insert(
            format!("{}.{}", section_name, key.to_ascii_uppercase()),
            value.to_string(),
        );
    }
    Ok(options)
}

/// Split a `SECTION.KEY` config key into its section and option name.
pub fn split_config_key(key: &str) -> (&str, &str) {
    key.split_once('.').unwrap_or(("", key))
}
