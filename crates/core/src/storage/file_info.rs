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

/// An object found while listing a [crate::storage::Storage].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileInfo {
    /// Fully qualified location, e.g. `s3a://bucket/song_data/A/A/A/x.json`
    pub uri: String,

    /// File name
    pub name: String,

    /// Size in bytes on storage
    pub size: usize,
}
