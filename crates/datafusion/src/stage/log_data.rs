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

//! Users, time and songplays tables from the event log dataset.
use arrow_schema::{DataType, TimeUnit};
use datafusion::common::JoinType;
use datafusion::dataframe::DataFrame;
use datafusion::error::Result;
use datafusion::functions_window::expr_fn::row_number;
use datafusion::logical_expr::{cast, col, ident, lit, Expr, ExprFunctionExt};
use log::info;

use sparkify_core::schema::PLAY_EVENT_PAGE;
use sparkify_core::table::StarTable;

use crate::session::EtlSession;
use crate::util::expr::{is_present, time_part, weekday};
use crate::writer::WriteSummary;

pub const SONGPLAY_ID: &str = "songplay_id";

/// Keep only song play events.
pub fn filter_play_events(log_data: DataFrame) -> Result<DataFrame> {
    log_data.filter(col("page").eq(lit(PLAY_EVENT_PAGE)))
}

/// Add `start_time`, the event's `ts` as a millisecond timestamp.
///
/// Events without `ts` are dropped.
pub fn with_start_time(events: DataFrame) -> Result<DataFrame> {
    events.filter(col("ts").is_not_null())?.with_column(
        "start_time",
        cast(
            col("ts"),
            DataType::Timestamp(TimeUnit::Millisecond, None),
        ),
    )
}

/// One row per user, taken from the user's latest event so `level` is the
/// most recent subscription level.
pub fn users_table(events: DataFrame) -> Result<DataFrame> {
    events.filter(is_present("userId"))?.distinct_on(
        vec![ident("userId")],
        vec![
            ident("userId").alias("user_id"),
            ident("firstName").alias("first_name"),
            ident("lastName").alias("last_name"),
            col("gender"),
            col("level"),
        ],
        Some(vec![
            ident("userId").sort(true, false),
            col("ts").sort(false, false),
        ]),
    )
}

/// One row per distinct `start_time`, broken down into calendar parts.
pub fn time_table(events: DataFrame) -> Result<DataFrame> {
    events
        .select(vec![
            col("start_time"),
            time_part("hour", "start_time").alias("hour"),
            time_part("day", "start_time").alias("day"),
            time_part("week", "start_time").alias("week"),
            time_part("month", "start_time").alias("month"),
            time_part("year", "start_time").alias("year"),
            weekday("start_time").alias("weekday"),
        ])?
        .distinct()
}

/// Join play events with songs on `song == title`.
///
/// Songs are reduced to one row per title first, so every play event yields
/// exactly one row; events without a matching song keep null `song_id` and
/// `artist_id`. Rows come out ordered by `start_time`, `session_id`, `user_id`.
pub fn songplays_table(events: DataFrame, song_data: DataFrame) -> Result<DataFrame> {
    let plays = events.select(vec![
        col("start_time"),
        time_part("year", "start_time").alias("year"),
        time_part("month", "start_time").alias("month"),
        ident("userId").alias("user_id"),
        col("level"),
        ident("sessionId").alias("session_id"),
        col("location"),
        ident("userAgent").alias("user_agent"),
        col("song"),
    ])?;
    let songs_by_title = song_data.filter(col("title").is_not_null())?.distinct_on(
        vec![col("title")],
        vec![col("title"), col("song_id"), col("artist_id")],
        Some(vec![
            col("title").sort(true, false),
            col("song_id").sort(true, false),
        ]),
    )?;

    plays
        .join(songs_by_title, JoinType::Left, &["song"], &["title"], None)?
        .sort(vec![
            col("start_time").sort(true, false),
            col("session_id").sort(true, false),
            col("user_id").sort(true, false),
        ])?
        .select_columns(&[
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
        ])
}

/// Prepend `songplay_id`, counting up from 0 by `start_time`, `session_id`
/// then `user_id`.
///
/// Ids are unique within one run only.
pub fn assign_songplay_ids(songplays: DataFrame) -> Result<DataFrame> {
    let row_num = row_number()
        .order_by(vec![
            col("start_time").sort(true, false),
            col("session_id").sort(true, false),
            col("user_id").sort(true, false),
        ])
        .build()?;
    let mut exprs = vec![cast(row_num - lit(1u64), DataType::Int64).alias(SONGPLAY_ID)];
    exprs.extend(songplays.schema().columns().into_iter().map(Expr::Column));
    songplays.select(exprs)
}

/// Load the event log and the song dataset, then derive and write the users,
/// time and songplays tables.
///
/// Both inputs are resolved before anything is written.
pub async fn process_log_data(session: &EtlSession) -> Result<Vec<WriteSummary>> {
    info!("Processing log data");
    let log_data = session.read_log_data().await?;
    let song_data = session.read_song_data().await?;
    let plays = filter_play_events(log_data)?;
    let events = with_start_time(plays.clone())?;
    let writer = session.table_writer()?;

    let users = writer.write(users_table(plays)?, StarTable::Users).await?;
    let time = writer
        .write(time_table(events.clone())?, StarTable::Time)
        .await?;

    let songplays = assign_songplay_ids(songplays_table(events, song_data)?)?;
    let songplays = writer.write(songplays, StarTable::Songplays).await?;

    Ok(vec![users, time, songplays])
}
