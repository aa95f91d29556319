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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config '{0}' not found")]
    NotFound(String),

    #[error("Invalid value for config '{0}': {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse '{1}' for config '{0}': {2}")]
    ParseInt(String, String, std::num::ParseIntError),

    #[error("Failed to parse '{1}' for config '{0}': {2}")]
    ParseBool(String, String, std::str::ParseBoolError),

    #[error("Malformed config at line {0}: {1}")]
    MalformedLine(usize, String),

    #[error("Failed to read config file '{0}': {1}")]
    ReadFile(String, std::io::Error),
}
