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

//! The tables of the Sparkify star schema.
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Fact and dimension tables produced by the ETL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum StarTable {
    Songs,
    Artists,
    Users,
    Time,
    Songplays,
}

impl StarTable {
    /// Directory, relative to the output location, that holds the table.
    pub fn output_dir(&self) -> String {
        format!("{}-parquet", self.as_ref())
    }

    /// Columns of the table in output order, partition columns included.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Songs => &["song_id", "title", "artist_id", "year", "duration"],
            Self::Artists => &["artist_id", "name", "location", "latitude", "longitude"],
            Self::Users => &["user_id", "first_name", "last_name", "gender", "level"],
            Self::Time => &[
                "start_time",
                "hour",
                "day",
                "week",
                "month",
                "year",
                "weekday",
            ],
            Self::Songplays => &[
                "songplay_id",
                "start_time",
                "year",
                "month",
                "user_id",
                "level",
                "song_id",
                "artist_id",
                "session_id",
                "location",
                "user_agent",
            ],
        }
    }

    /// Columns encoded as Hive-style `col=value` directories.
    pub fn partition_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Songs => &["year", "artist_id"],
            Self::Time | Self::Songplays => &["year", "month"],
            Self::Artists | Self::Users => &[],
        }
    }

    /// Columns stored inside the data files.
    pub fn data_columns(&self) -> Vec<&'static str> {
        let partition_columns = self.partition_columns();
        self.columns()
            .iter()
            .filter(|c| !partition_columns.contains(c))
            .copied()
            .collect()
    }

    pub fn is_partitioned(&self) -> bool {
        !self.partition_columns().is_empty()
    }
}
