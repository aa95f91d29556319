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

use std::fmt::{Display, Formatter};
use std::path::Path;

use datafusion::error::Result;
use log::info;

use sparkify_core::config::EtlConfigs;
use sparkify_core::table::StarTable;

use crate::session::EtlSession;
use crate::stage::log_data::process_log_data;
use crate::stage::song_data::process_song_data;
use crate::util::expr::core_error;
use crate::writer::WriteSummary;

/// Tables written by one run, in write order.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub tables: Vec<WriteSummary>,
}

impl RunSummary {
    pub fn get(&self, table: StarTable) -> Option<&WriteSummary> {
        self.tables.iter().find(|s| s.table == table)
    }

    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|s| s.num_rows).sum()
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} tables, {} rows in total",
            self.tables.len(),
            self.total_rows()
        )
    }
}

pub struct EtlPipeline {
    session: EtlSession,
}

impl EtlPipeline {
    pub fn new(configs: EtlConfigs) -> Result<Self> {
        Ok(Self {
            session: EtlSession::new(configs)?,
        })
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(EtlConfigs::from_file(path).map_err(core_error)?)
    }

    pub fn session(&self) -> &EtlSession {
        &self.session
    }

    /// Run the song data stage, then the log data stage.
    ///
    /// Stops at the first failure; tables written before it stay in place.
    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        summary.tables.extend(process_song_data(&self.session).await?);
        summary.tables.extend(process_log_data(&self.session).await?);
        info!("{}", summary);
        Ok(summary)
    }
}
