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

//! Object-store access for the raw logs and the star-schema output.
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use arrow_schema::SchemaRef;
use async_recursion::async_recursion;
use futures::TryStreamExt;
use log::debug;
use object_store::path::Path as ObjPath;
use object_store::{parse_url_opts, ObjectStore};
use parquet::arrow::async_reader::ParquetObjectReader;
use parquet::arrow::ParquetRecordBatchStreamBuilder;
use url::Url;

use crate::error::CoreError::InvalidPath;
use crate::storage::file_info::FileInfo;
use crate::storage::glob::PathGlob;
use crate::storage::util::{get_scheme_authority, join_url_segments};
use crate::Result;

pub mod file_info;
pub mod glob;
pub mod util;

#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) base_url: Arc<Url>,
    pub(crate) object_store: Arc<dyn ObjectStore>,
}

impl Storage {
    pub const CLOUD_STORAGE_PREFIXES: [&'static str; 3] = ["AWS_", "AZURE_", "GOOGLE_"];

    pub fn new(base_url: Arc<Url>, options: Arc<HashMap<String, String>>) -> Result<Arc<Storage>> {
        let (object_store, _) = parse_url_opts(&base_url, options.iter())?;
        Ok(Arc::new(Storage {
            base_url,
            object_store: Arc::from(object_store),
        }))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn object_store(&self) -> Arc<dyn ObjectStore> {
        self.object_store.clone()
    }

    /// The `scheme://authority` under which the object store serves paths.
    pub fn object_store_url(&self) -> Result<Url> {
        Ok(Url::parse(&get_scheme_authority(&self.base_url))?)
    }

    fn obj_path(&self, relative_path: &str) -> Result<ObjPath> {
        let obj_url = join_url_segments(&self.base_url, &[relative_path])?;
        Ok(ObjPath::from_url_path(obj_url.path())?)
    }

    /// URL of a location relative to the base URL.
    pub fn url_of(&self, relative_path: &str) -> Result<Url> {
        join_url_segments(&self.base_url, &[relative_path])
    }

    /// List all files whose path relative to the base URL matches `pattern`,
    /// sorted by URI.
    pub async fn list_files_matching(&self, pattern: &str) -> Result<Vec<FileInfo>> {
        let glob = PathGlob::new(pattern)?;
        let base_path = self.obj_path("")?;
        let prefix_path = self.obj_path(&glob.literal_prefix())?;
        let scheme_authority = get_scheme_authority(&self.base_url);

        let mut files = Vec::new();
        let mut listing = self.object_store.list(Some(&prefix_path));
        while let Some(obj_meta) = listing.try_next().await? {
            let Some(parts) = obj_meta.location.prefix_match(&base_path) else {
                continue;
            };
            let relative_path = parts
                .map(|p| p.as_ref().to_string())
                .collect::<Vec<_>>()
                .join("/");
            if !glob.matches(&relative_path) {
                continue;
            }
            let name = obj_meta
                .location
                .filename()
                .ok_or_else(|| InvalidPath(format!("No file name in {}", obj_meta.location)))?
                .to_string();
            files.push(FileInfo {
                uri: format!("{}/{}", scheme_authority, obj_meta.location),
                name,
                size: obj_meta.size,
            });
        }
        files.sort_unstable_by(|a, b| a.uri.cmp(&b.uri));
        debug!(
            "Found {} files matching '{}' under {}",
            files.len(),
            pattern,
            self.base_url
        );
        Ok(files)
    }

    /// Delete every object under `subdir` and return how many were deleted.
    ///
    /// On local file systems the emptied directory tree is removed as well, so
    /// stale partition directories do not survive an overwrite.
    pub async fn delete_prefix(&self, subdir: &str) -> Result<usize> {
        if subdir.trim_matches('/').is_empty() {
            return Err(InvalidPath(format!(
                "Refusing to delete the base location {}",
                self.base_url
            )));
        }
        let prefix_path = self.obj_path(subdir)?;
        let locations: Vec<ObjPath> = self
            .object_store
            .list(Some(&prefix_path))
            .map_ok(|m| m.location)
            .try_collect()
            .await?;
        for location in &locations {
            self.object_store.delete(location).await?;
        }

        if self.base_url.scheme() == "file" {
            let dir = self.local_path(subdir)?;
            if dir.is_dir() {
                fs::remove_dir_all(&dir)?;
            }
        }

        debug!("Deleted {} objects under {}", locations.len(), prefix_path);
        Ok(locations.len())
    }

    fn local_path(&self, relative_path: &str) -> Result<PathBuf> {
        let url = self.url_of(relative_path)?;
        url.to_file_path()
            .map_err(|_| InvalidPath(format!("{url} is not a local path")))
    }

    pub async fn list_dirs(&self, subdir: Option<&str>) -> Result<Vec<String>> {
        let dir_paths = self.list_dirs_as_obj_paths(subdir).await?;
        let mut dirs = Vec::new();
        for dir in dir_paths {
            dirs.push(
                dir.filename()
                    .ok_or_else(|| InvalidPath(format!("Failed to get file name from {dir:?}")))?
                    .to_string(),
            )
        }
        dirs.sort_unstable();
        Ok(dirs)
    }

    async fn list_dirs_as_obj_paths(&self, subdir: Option<&str>) -> Result<Vec<ObjPath>> {
        let prefix_path = self.obj_path(subdir.unwrap_or_default())?;
        let list_res = self
            .object_store
            .list_with_delimiter(Some(&prefix_path))
            .await?;
        Ok(list_res.common_prefixes)
    }

    pub async fn list_files(&self, subdir: Option<&str>) -> Result<Vec<FileInfo>> {
        let prefix_url = join_url_segments(&self.base_url, &[subdir.unwrap_or_default()])?;
        let prefix_path = ObjPath::from_url_path(prefix_url.path())?;
        let list_res = self
            .object_store
            .list_with_delimiter(Some(&prefix_path))
            .await?;
        let mut file_info = Vec::new();
        for obj_meta in list_res.objects {
            let name = obj_meta
                .location
                .filename()
                .ok_or_else(|| {
                    InvalidPath(format!(
                        "Failed to get file name from {:?}",
                        obj_meta.location
                    ))
                })?
                .to_string();
            let uri = join_url_segments(&prefix_url, &[&name])?.to_string();
            file_info.push(FileInfo {
                uri,
                name,
                size: obj_meta.size,
            });
        }
        file_info.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Ok(file_info)
    }

    /// Read the Arrow schema stored in a Parquet file.
    pub async fn get_parquet_file_schema(&self, relative_path: &str) -> Result<SchemaRef> {
        let obj_path = self.obj_path(relative_path)?;
        let obj_store = self.object_store.clone();
        let meta = obj_store.head(&obj_path).await?;
        let reader = ParquetObjectReader::new(obj_store, meta);
        let builder = ParquetRecordBatchStreamBuilder::new(reader).await?;
        Ok(builder.schema().clone())
    }
}

/// Get relative paths of leaf directories under a given directory.
///
/// A directory without sub-directories is its own leaf.
#[async_recursion]
pub async fn get_leaf_dirs(storage: &Storage, subdir: Option<&str>) -> Result<Vec<String>> {
    let mut leaf_dirs = Vec::new();
    let child_dirs = storage.list_dirs(subdir).await?;
    if child_dirs.is_empty() {
        if let Some(dir) = subdir {
            leaf_dirs.push(dir.to_owned());
        }
    } else {
        for child_dir in child_dirs {
            let next_subdir = match subdir {
                Some(curr) => format!("{}/{}", curr.trim_end_matches('/'), child_dir),
                None => child_dir,
            };
            let curr_leaf_dir = get_leaf_dirs(storage, Some(&next_subdir)).await?;
            leaf_dirs.extend(curr_leaf_dir);
        }
    }
    Ok(leaf_dirs)
}
