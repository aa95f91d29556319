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

//! The DataFusion session an ETL run executes in.
use std::sync::Arc;

use arrow_schema::SchemaRef;
use datafusion::dataframe::DataFrame;
use datafusion::error::Result;
use datafusion::prelude::{NdJsonReadOptions, SessionConfig, SessionContext};
use log::{debug, info};

use sparkify_core::config::etl::EtlConfig::{
    InputData, LogDataPattern, OutputData, SongDataPattern, TargetPartitions,
};
use sparkify_core::config::EtlConfigs;
use sparkify_core::error::CoreError;
use sparkify_core::schema::{log_data_schema, song_data_schema};
use sparkify_core::storage::util::parse_uri;
use sparkify_core::storage::Storage;

use crate::util::expr::core_error;
use crate::writer::TableWriter;

/// A [SessionContext] wired to the input and output locations of one run.
///
/// Both locations get their object stores registered with the context, so
/// DataFusion can read from and write to them directly.
#[derive(Clone)]
pub struct EtlSession {
    ctx: SessionContext,
    configs: Arc<EtlConfigs>,
    input: Arc<Storage>,
    output: Arc<Storage>,
}

impl EtlSession {
    pub fn new(configs: EtlConfigs) -> Result<Self> {
        let storage_options = Arc::new(configs.storage_options());
        let input_uri: String = configs.get(InputData).map_err(core_error)?.into();
        let output_uri: String = configs.get(OutputData).map_err(core_error)?.into();
        let input_url = Arc::new(parse_uri(&input_uri).map_err(core_error)?);
        let output_url = Arc::new(parse_uri(&output_uri).map_err(core_error)?);
        let input = Storage::new(input_url, storage_options.clone()).map_err(core_error)?;
        let output = Storage::new(output_url, storage_options).map_err(core_error)?;

        let target_partitions: usize = configs
            .get_or_default(TargetPartitions)
            .map_err(core_error)?
            .into();
        let mut session_config = SessionConfig::new();
        if target_partitions > 0 {
            session_config = session_config.with_target_partitions(target_partitions);
        }
        let ctx = SessionContext::new_with_config(session_config);

        for storage in [&input, &output] {
            let store_url = storage.object_store_url().map_err(core_error)?;
            debug!("Registering object store for {}", store_url);
            ctx.register_object_store(&store_url, storage.object_store());
        }

        info!(
            "Created ETL session reading from {} and writing to {}",
            input.base_url(),
            output.base_url()
        );
        Ok(Self {
            ctx,
            configs: Arc::new(configs),
            input,
            output,
        })
    }

    pub fn ctx(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn configs(&self) -> &EtlConfigs {
        &self.configs
    }

    pub fn input(&self) -> Arc<Storage> {
        self.input.clone()
    }

    pub fn output(&self) -> Arc<Storage> {
        self.output.clone()
    }

    /// Load every newline-delimited JSON file under `storage` whose relative
    /// path matches `pattern` as one [DataFrame] with the given schema.
    ///
    /// Files are picked by `pattern` alone, whatever their extension. It is an
    /// error when no file matches.
    pub async fn read_json(
        &self,
        storage: &Storage,
        pattern: &str,
        schema: SchemaRef,
    ) -> Result<DataFrame> {
        let files = storage
            .list_files_matching(pattern)
            .await
            .map_err(core_error)?;
        if files.is_empty() {
            return Err(core_error(CoreError::InvalidPath(format!(
                "No files match '{}' under {}",
                pattern,
                storage.base_url()
            ))));
        }

        info!(
            "Reading {} JSON files matching '{}' under {}",
            files.len(),
            pattern,
            storage.base_url()
        );
        let uris: Vec<String> = files.into_iter().map(|f| f.uri).collect();
        let options = NdJsonReadOptions::default()
            .schema(schema.as_ref())
            .file_extension("");
        self.ctx.read_json(uris, options).await
    }

    /// Song records selected by the song data pattern.
    pub async fn read_song_data(&self) -> Result<DataFrame> {
        let pattern: String = self
            .configs
            .get_or_default(SongDataPattern)
            .map_err(core_error)?
            .into();
        self.read_json(&self.input, &pattern, song_data_schema())
            .await
    }

    /// Event records selected by the log data pattern.
    pub async fn read_log_data(&self) -> Result<DataFrame> {
        let pattern: String = self
            .configs
            .get_or_default(LogDataPattern)
            .map_err(core_error)?
            .into();
        self.read_json(&self.input, &pattern, log_data_schema())
            .await
    }

    pub fn table_writer(&self) -> Result<TableWriter> {
        TableWriter::new(self.output.clone(), &self.configs)
    }
}
