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

//! Sparkify star-schema ETL on Apache Arrow DataFusion.
//!
//! Reads the song and event JSON logs, derives the `songs`, `artists`,
//! `users`, `time` and `songplays` tables and writes them as Hive-style
//! partitioned Parquet.
//!
//! # Examples
//!
//! ```no_run
//! use datafusion::error::Result;
//! use sparkify_core::config::EtlConfigs;
//! use sparkify_datafusion::EtlPipeline;
//!
//! # async fn run() -> Result<()> {
//! let configs = EtlConfigs::from_ini_str(
//!     "[S3]\nINPUT_DATA=/tmp/sparkify/input\nOUTPUT_DATA=/tmp/sparkify/output\n",
//! )
//! .unwrap();
//! let summary = EtlPipeline::new(configs)?.run().await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
pub mod session;
pub mod stage;
pub(crate) mod util;
pub mod writer;

pub use pipeline::{EtlPipeline, RunSummary};
pub use session::EtlSession;
pub use writer::{TableWriter, WriteSummary};
