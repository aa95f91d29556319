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

//! Songs and artists dimension tables from the song dataset.
use datafusion::dataframe::DataFrame;
use datafusion::error::Result;
use datafusion::logical_expr::col;
use log::info;

use sparkify_core::table::StarTable;

use crate::session::EtlSession;
use crate::writer::WriteSummary;

/// One row per `song_id`: `song_id, title, artist_id, year, duration`.
pub fn songs_table(song_data: DataFrame) -> Result<DataFrame> {
    song_data.filter(col("song_id").is_not_null())?.distinct_on(
        vec![col("song_id")],
        vec![
            col("song_id"),
            col("title"),
            col("artist_id"),
            col("year"),
            col("duration"),
        ],
        None,
    )
}

/// One row per `artist_id`: `artist_id, name, location, latitude, longitude`.
pub fn artists_table(song_data: DataFrame) -> Result<DataFrame> {
    song_data.filter(col("artist_id").is_not_null())?.distinct_on(
        vec![col("artist_id")],
        vec![
            col("artist_id"),
            col("artist_name").alias("name"),
            col("artist_location").alias("location"),
            col("artist_latitude").alias("latitude"),
            col("artist_longitude").alias("longitude"),
        ],
        None,
    )
}

/// Load the song dataset, then derive and write the songs and artists tables.
pub async fn process_song_data(session: &EtlSession) -> Result<Vec<WriteSummary>> {
    info!("Processing song data");
    let song_data = session.read_song_data().await?;
    let writer = session.table_writer()?;

    let songs = writer
        .write(songs_table(song_data.clone())?, StarTable::Songs)
        .await?;
    let artists = writer
        .write(artists_table(song_data)?, StarTable::Artists)
        .await?;
    Ok(vec![songs, artists])
}
