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

//! Matching of relative object paths against glob patterns such as
//! `song_data/*/*/*/*.json`.
//!
//! Patterns follow [glob::Pattern]: `*`, `?` and `[...]` never cross a `/`,
//! while a `**` segment matches any number of directories.
use glob::{MatchOptions, Pattern};

use crate::error::CoreError::InvalidPattern;
use crate::Result;

const GLOB_START_CHARS: [char; 3] = ['?', '*', '['];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Clone, Debug)]
pub struct PathGlob {
    prefix: String,
    pattern: Pattern,
}

impl PathGlob {
    pub fn new(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim_matches('/');
        if trimmed.is_empty() {
            return Err(InvalidPattern(format!("'{pattern}' is empty")));
        }
        if trimmed.split('/').any(|s| s.is_empty()) {
            return Err(InvalidPattern(format!(
                "'{pattern}' contains an empty segment"
            )));
        }
        let compiled =
            Pattern::new(trimmed).map_err(|e| InvalidPattern(format!("'{pattern}': {e}")))?;
        Ok(Self {
            prefix: split_glob_prefix(trimmed).to_string(),
            pattern: compiled,
        })
    }

    /// Directory to list from: the leading segments without glob characters,
    /// never including the last segment.
    pub fn literal_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        self.pattern
            .matches_with(relative_path.trim_matches('/'), MATCH_OPTIONS)
    }
}

/// The part of `pattern` before the first segment containing a glob
/// expression, or the parent directory when there is none.
fn split_glob_prefix(pattern: &str) -> &str {
    let mut last_separator = 0;
    for (byte_idx, c) in pattern.char_indices() {
        if GLOB_START_CHARS.contains(&c) {
            break;
        }
        if c == '/' {
            last_separator = byte_idx;
        }
    }
    &pattern[..last_separator]
}
