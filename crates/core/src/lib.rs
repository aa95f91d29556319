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

//! Engine-independent building blocks of the Sparkify ETL.
//!
//! This crate knows how to read the job configuration, how to talk to the
//! object stores that hold the raw logs and the star-schema output, and what
//! the source records and derived tables look like. The query engine lives in
//! `sparkify-datafusion`.
//!
//! **Example**
//! ```rust
//! use sparkify_core::config::etl::EtlConfig::InputData;
//! use sparkify_core::config::EtlConfigs;
//!
//! let configs = EtlConfigs::from_ini_str("[S3]\nINPUT_DATA=s3a://udacity-dend/\n").unwrap();
//! let input: String = configs.get(InputData).unwrap().into();
//! assert_eq!(input, "s3a://udacity-dend/");
//! ```

pub mod config;
pub mod error;
pub mod schema;
pub mod storage;
pub mod table;

use error::CoreError;

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
