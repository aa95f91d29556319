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
//! Utility functions for storage.
use std::env;
use std::path::Path;

use url::Url;

use crate::error::CoreError::InvalidPath;
use crate::Result;

/// Parses a URI string or a local path into a URL without a trailing slash.
///
/// Relative local paths are resolved against the current working directory.
pub fn parse_uri(uri: &str) -> Result<Url> {
    let mut url = match Url::parse(uri) {
        Ok(url) => url,
        Err(e) => {
            let path = Path::new(uri);
            let abs_path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                env::current_dir()?.join(path)
            };
            Url::from_directory_path(&abs_path).map_err(|_| {
                InvalidPath(format!("Failed to parse uri '{}': {}", uri, e))
            })?
        }
    };

    if url.path().ends_with('/') {
        let err = InvalidPath(format!("Url {:?} cannot be a base", url));
        url.path_segments_mut().map_err(|_| err)?.pop();
    }

    Ok(url)
}

/// Returns the scheme and authority of a URL in the form of `scheme://authority`.
pub fn get_scheme_authority(url: &Url) -> String {
    format!("{}://{}", url.scheme(), url.authority())
}

/// Joins a base URL with a list of segments.
pub fn join_url_segments(base_url: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base_url.clone();
    let err = || InvalidPath(format!("Url {:?} cannot be a base", base_url));

    if url.path().ends_with('/') {
        url.path_segments_mut().map_err(|_| err())?.pop();
    }

    for &seg in segments {
        let segs: Vec<_> = seg.split('/').filter(|&s| !s.is_empty()).collect();
        url.path_segments_mut().map_err(|_| err())?.extend(segs);
    }

    Ok(url)
}

/// Renders a URL as a directory location, i.e. with exactly one trailing slash.
///
/// The query engine treats locations ending in `/` as directories to write
/// many files into.
pub fn as_dir_location(url: &Url) -> String {
    format!("{}/", url.as_str().trim_end_matches('/'))
}
