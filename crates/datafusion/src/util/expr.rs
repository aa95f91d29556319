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

use arrow_schema::DataType;
use datafusion::functions::expr_fn::{coalesce, date_part};
use datafusion::logical_expr::{cast, col, ident, lit, Expr};
use datafusion_common::DataFusionError;

use sparkify_core::error::CoreError;

/// Directory value Hive uses for a null partition value.
pub const DEFAULT_PARTITION_VALUE: &str = "__HIVE_DEFAULT_PARTITION__";

pub(crate) fn core_error(e: CoreError) -> DataFusionError {
    DataFusionError::External(Box::new(e))
}

/// Extracts `part` (`hour`, `day`, `week`, `month`, `year`, `dow`, ...) of a
/// timestamp column as Int32.
///
/// `week` is the ISO week number and `dow` counts from 0 for Sunday.
pub fn time_part(part: &str, column: &str) -> Expr {
    cast(date_part(lit(part), col(column)), DataType::Int32)
}

/// Day of week of a timestamp column, 1 for Sunday through 7 for Saturday.
pub fn weekday(column: &str) -> Expr {
    cast(date_part(lit("dow"), col(column)) + lit(1), DataType::Int32)
}

/// Renders a column as a Hive partition value: its string form, or
/// [DEFAULT_PARTITION_VALUE] when null. Keeps the column name.
pub fn partition_value(column: &str) -> Expr {
    coalesce(vec![
        cast(col(column), DataType::Utf8),
        lit(DEFAULT_PARTITION_VALUE),
    ])
    .alias(column)
}

/// True when a string column is neither null nor empty. `column` is taken
/// as is, so camelCase source names keep their case.
pub fn is_present(column: &str) -> Expr {
    ident(column)
        .is_not_null()
        .and(ident(column).not_eq(lit("")))
}
