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

//! Arrow schemas of the raw song and event records.
//!
//! Sources are read with these schemas instead of inferring one from the
//! first few lines, so column types do not drift between runs.
use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema, SchemaRef};

/// Value of `page` that marks a song play event.
pub const PLAY_EVENT_PAGE: &str = "NextSong";

fn nullable(name: &str, data_type: DataType) -> Field {
    Field::new(name, data_type, true)
}

/// Schema of one record of the song dataset.
pub fn song_data_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        nullable("num_songs", DataType::Int64),
        nullable("artist_id", DataType::Utf8),
        nullable("artist_latitude", DataType::Float64),
        nullable("artist_longitude", DataType::Float64),
        nullable("artist_location", DataType::Utf8),
        nullable("artist_name", DataType::Utf8),
        nullable("song_id", DataType::Utf8),
        nullable("title", DataType::Utf8),
        nullable("duration", DataType::Float64),
        nullable("year", DataType::Int32),
    ]))
}

/// Schema of one record of the event log dataset.
pub fn log_data_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        nullable("artist", DataType::Utf8),
        nullable("auth", DataType::Utf8),
        nullable("firstName", DataType::Utf8),
        nullable("gender", DataType::Utf8),
        nullable("itemInSession", DataType::Int64),
        nullable("lastName", DataType::Utf8),
        nullable("length", DataType::Float64),
        nullable("level", DataType::Utf8),
        nullable("location", DataType::Utf8),
        nullable("method", DataType::Utf8),
        nullable("page", DataType::Utf8),
        nullable("registration", DataType::Float64),
        nullable("sessionId", DataType::Int64),
        nullable("song", DataType::Utf8),
        nullable("status", DataType::Int64),
        nullable("ts", DataType::Int64),
        nullable("userAgent", DataType::Utf8),
        nullable("userId", DataType::Utf8),
    ]))
}
