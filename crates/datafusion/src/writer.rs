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

//! Writes star-schema tables as Hive-style partitioned Parquet.
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use arrow_array::{Array, RecordBatch, UInt64Array};
use datafusion::dataframe::{DataFrame, DataFrameWriteOptions};
use datafusion::error::Result;
use datafusion::logical_expr::{col, Expr};
use log::info;

use sparkify_core::config::etl::EtlConfig::Overwrite;
use sparkify_core::config::EtlConfigs;
use sparkify_core::storage::util::as_dir_location;
use sparkify_core::storage::{get_leaf_dirs, Storage};
use sparkify_core::table::StarTable;

use crate::util::expr::{core_error, partition_value};

/// Outcome of writing one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteSummary {
    pub table: StarTable,
    pub location: String,
    pub num_rows: u64,
    /// Data files found under `location` after the write.
    pub num_files: usize,
    /// Partition directories relative to `location`, e.g. `year=2018/month=11`.
    pub partitions: Vec<String>,
}

impl Display for WriteSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} rows written to {} ({} files)",
            self.table, self.num_rows, self.location, self.num_files
        )?;
        if !self.partitions.is_empty() {
            write!(f, " in {} partitions", self.partitions.len())?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct TableWriter {
    storage: Arc<Storage>,
    overwrite: bool,
}

impl TableWriter {
    pub fn new(storage: Arc<Storage>, configs: &EtlConfigs) -> Result<Self> {
        let overwrite: bool = configs
            .get_or_default(Overwrite)
            .map_err(core_error)?
            .into();
        Ok(Self { storage, overwrite })
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Directory URL the table is written to, with a trailing slash.
    pub fn location(&self, table: StarTable) -> Result<String> {
        let url = self
            .storage
            .url_of(&table.output_dir())
            .map_err(core_error)?;
        Ok(as_dir_location(&url))
    }

    /// Write `df` as `table`.
    ///
    /// `df` must provide every column of the table. Partition columns are
    /// stored as strings in directory names, with nulls mapped to
    /// [crate::util::expr::DEFAULT_PARTITION_VALUE].
    pub async fn write(&self, df: DataFrame, table: StarTable) -> Result<WriteSummary> {
        let output_dir = table.output_dir();
        let location = self.location(table)?;
        if self.overwrite {
            let deleted = self
                .storage
                .delete_prefix(&output_dir)
                .await
                .map_err(core_error)?;
            if deleted > 0 {
                info!("Overwriting {}: deleted {} existing files", location, deleted);
            }
        }

        let partition_columns = table.partition_columns();
        let exprs: Vec<Expr> = table
            .columns()
            .iter()
            .map(|c| {
                if partition_columns.contains(c) {
                    partition_value(c)
                } else {
                    col(*c)
                }
            })
            .collect();
        let write_options = DataFrameWriteOptions::new().with_partition_by(
            partition_columns.iter().map(|c| c.to_string()).collect(),
        );

        info!("Writing {} to {}", table, location);
        let results = df
            .select(exprs)?
            .write_parquet(&location, write_options, None)
            .await?;
        let num_rows = rows_written(&results);

        let partitions = if table.is_partitioned() {
            self.list_partitions(&output_dir).await?
        } else {
            Vec::new()
        };
        let num_files = self.count_files(&output_dir, &partitions).await?;

        let summary = WriteSummary {
            table,
            location,
            num_rows,
            num_files,
            partitions,
        };
        info!("{}", summary);
        Ok(summary)
    }

    async fn list_partitions(&self, output_dir: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", output_dir);
        let mut partitions: Vec<String> = get_leaf_dirs(&self.storage, Some(output_dir))
            .await
            .map_err(core_error)?
            .into_iter()
            .filter_map(|dir| dir.strip_prefix(&prefix).map(String::from))
            .collect();
        partitions.sort_unstable();
        Ok(partitions)
    }

    async fn count_files(&self, output_dir: &str, partitions: &[String]) -> Result<usize> {
        let dirs: Vec<String> = if partitions.is_empty() {
            vec![output_dir.to_string()]
        } else {
            partitions
                .iter()
                .map(|p| format!("{}/{}", output_dir, p))
                .collect()
        };
        let mut num_files = 0;
        for dir in dirs {
            num_files += self
                .storage
                .list_files(Some(&dir))
                .await
                .map_err(core_error)?
                .len();
        }
        Ok(num_files)
    }
}

/// Sum of the `count` column DataFusion returns from a write.
fn rows_written(results: &[RecordBatch]) -> u64 {
    results
        .iter()
        .filter_map(|batch| batch.column_by_name("count"))
        .filter_map(|counts| counts.as_any().downcast_ref::<UInt64Array>())
        .flat_map(|counts| counts.iter().flatten())
        .sum()
}
