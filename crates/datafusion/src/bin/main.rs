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

use datafusion::error::Result;
use datafusion_common::DataFusionError;
use env_logger::Env;
use log::info;

use sparkify_core::config::EtlConfigs;
use sparkify_datafusion::EtlPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!(
        "Loading configs from {}",
        EtlConfigs::config_path().display()
    );
    let configs = EtlConfigs::load().map_err(|e| DataFusionError::External(Box::new(e)))?;

    let summary = EtlPipeline::new(configs)?.run().await?;
    for table in &summary.tables {
        info!("{}", table);
    }
    Ok(())
}
