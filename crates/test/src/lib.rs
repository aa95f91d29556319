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

//! Sample Sparkify dataset for tests.
//!
//! [SampleDataset] lays out a small song and event log dataset plus a
//! `dl.cfg` pointing at it inside a temporary directory. The records are
//! chosen to exercise deduplication, unmatched songs, users changing level
//! and events sharing a timestamp.
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use strum_macros::{AsRefStr, EnumIter, EnumString};
use tempfile::TempDir;
use url::Url;

pub mod util;

/// Asserts that an Arrow schema has exactly the given field names, in order.
#[macro_export]
macro_rules! assert_arrow_field_names_eq {
    ($schema:expr, $expected:expr) => {{
        let schema = $schema;
        let expected_names = $expected;
        let actual: Vec<&str> = schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        let expected: Vec<&str> = expected_names.iter().map(|s| s.as_ref()).collect();
        assert_eq!(actual, expected);
    }};
}

/// Well-known facts about the sample dataset.
pub mod expected {
    pub const NUM_SONG_FILES: usize = 7;
    pub const NUM_EVENT_FILES: usize = 2;
    pub const NUM_SONGS: usize = 6;
    pub const NUM_ARTISTS: usize = 5;
    pub const NUM_USERS: usize = 3;
    pub const NUM_PLAY_EVENTS: usize = 6;
    pub const NUM_DISTINCT_START_TIMES: usize = 5;
    pub const NUM_UNMATCHED_PLAYS: usize = 1;

    pub const SONG_PARTITIONS: [&str; 6] = [
        "year=0/artist_id=ARD7TVE1187B99BFB1",
        "year=0/artist_id=ARKRRTF1187B9984DA",
        "year=1969/artist_id=ARMJAGH1187FB546F3",
        "year=1981/artist_id=AR7G5I41187FB4CE6C",
        "year=1982/artist_id=AR7G5I41187FB4CE6C",
        "year=2007/artist_id=ARXR32B1187FB57099",
    ];

    pub const MONTH_PARTITIONS: [&str; 2] = ["year=2018/month=11", "year=2018/month=12"];

    /// Epoch millis of every play event.
    pub const PLAY_TIMESTAMPS: [i64; 6] = [
        1541106106796,
        1541106352796,
        1541107053796,
        1541190000000,
        1543622400000,
        1543622400000,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SampleUser {
    #[strum(serialize = "8")]
    KayleeSummers,
    #[strum(serialize = "10")]
    SylvieCruz,
    #[strum(serialize = "26")]
    RyanSmith,
}

impl SampleUser {
    pub fn user_id(&self) -> &str {
        self.as_ref()
    }

    /// Subscription level seen on the user's latest event.
    pub fn latest_level(&self) -> &'static str {
        match self {
            Self::KayleeSummers => "paid",
            Self::SylvieCruz | Self::RyanSmith => "free",
        }
    }
}

fn song(
    song_id: &str,
    title: &str,
    artist: (&str, &str, &str, Option<f64>, Option<f64>),
    year: i32,
    duration: f64,
) -> Value {
    let (artist_id, artist_name, artist_location, latitude, longitude) = artist;
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": latitude,
        "artist_longitude": longitude,
        "artist_location": artist_location,
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": year,
    })
}

/// Song files keyed by their path relative to the input location.
pub fn song_records() -> Vec<(&'static str, Value)> {
    let casual = ("ARD7TVE1187B99BFB1", "Casual", "California - LA", None, None);
    let box_tops = (
        "ARMJAGH1187FB546F3",
        "The Box Tops",
        "Memphis, TN",
        Some(35.14968),
        Some(-90.04892),
    );
    let sonora = ("ARKRRTF1187B9984DA", "Sonora Santanera", "", None, None);
    let adam_ant = (
        "AR7G5I41187FB4CE6C",
        "Adam Ant",
        "London, England",
        Some(51.50632),
        Some(-0.12714),
    );
    let gob = ("ARXR32B1187FB57099", "Gob", "", None, None);

    vec![
        (
            "song_data/A/A/A/TRAAAAW128F429D538.json",
            song("SOMZWCG12A8C13C480", "I Didn't Mean To", casual, 0, 218.93179),
        ),
        (
            "song_data/A/A/A/TRAAABD128F429CF47.json",
            song("SOCIWDW12AB018BF2E", "Soul Deep", box_tops, 1969, 148.03546),
        ),
        (
            "song_data/A/A/A/TRAAADZ128F9348C2E.json",
            song("SOXVLOJ12AB0189215", "Amor De Cabaret", sonora, 0, 177.47546),
        ),
        (
            "song_data/A/A/A/TRAAAEF128F4273421.json",
            song("SONHOTT12A8C13493C", "Something Girls", adam_ant, 1982, 233.40363),
        ),
        (
            "song_data/A/A/B/TRAABJL12903CDCF1A.json",
            song("SOFSOCN12A8C143F5D", "Face the Ashes", gob, 2007, 209.60608),
        ),
        (
            "song_data/A/B/C/TRABCEI128F424C983.json",
            song("SOCIWDW12AB018BF2E", "Soul Deep", box_tops, 1969, 148.03546),
        ),
        (
            "song_data/A/B/C/TRABCFL128F149BB0D.json",
            song("SOAOIBZ12AB01815BE", "Stand And Deliver", adam_ant, 1981, 213.2),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn event(
    page: &str,
    user: Option<(&str, &str, &str, &str)>,
    level: &str,
    ts: i64,
    song: Option<(&str, &str, f64)>,
    session_id: i64,
    item_in_session: i64,
    location: &str,
) -> Value {
    let (title, artist, length) = match song {
        Some((t, a, l)) => (Some(t), Some(a), Some(l)),
        None => (None, None, None),
    };
    let method = if page == "NextSong" { "PUT" } else { "GET" };
    match user {
        Some((user_id, first_name, last_name, gender)) => json!({
            "artist": artist,
            "auth": "Logged In",
            "firstName": first_name,
            "gender": gender,
            "itemInSession": item_in_session,
            "lastName": last_name,
            "length": length,
            "level": level,
            "location": location,
            "method": method,
            "page": page,
            "registration": 1540919166796.0,
            "sessionId": session_id,
            "song": title,
            "status": 200,
            "ts": ts,
            "userAgent": "Mozilla/5.0 (Windows NT 6.1; WOW64)",
            "userId": user_id,
        }),
        None => json!({
            "artist": artist,
            "auth": "Logged Out",
            "firstName": null,
            "gender": null,
            "itemInSession": item_in_session,
            "lastName": null,
            "length": length,
            "level": level,
            "location": null,
            "method": method,
            "page": page,
            "registration": null,
            "sessionId": session_id,
            "song": title,
            "status": 200,
            "ts": ts,
            "userAgent": null,
            "userId": "",
        }),
    }
}

/// Event log files keyed by their path relative to the input location.
pub fn event_records() -> Vec<(&'static str, Vec<Value>)> {
    let kaylee = Some(("8", "Kaylee", "Summers", "F"));
    let sylvie = Some(("10", "Sylvie", "Cruz", "F"));
    let ryan = Some(("26", "Ryan", "Smith", "M"));
    let phoenix = "Phoenix-Mesa-Scottsdale, AZ";
    let dc = "Washington-Arlington-Alexandria, DC-VA-MD-WV";
    let san_jose = "San Jose-Sunnyvale-Santa Clara, CA";

    vec![
        (
            "log_data/2018/11/2018-11-01-events.json",
            vec![
                event("Home", kaylee, "free", 1541105830796, None, 139, 0, phoenix),
                event(
                    "NextSong",
                    kaylee,
                    "free",
                    1541106106796,
                    Some(("Soul Deep", "The Box Tops", 148.03546)),
                    139,
                    1,
                    phoenix,
                ),
                event(
                    "NextSong",
                    kaylee,
                    "free",
                    1541106352796,
                    Some(("Unknown Track", "Nobody", 201.0)),
                    139,
                    2,
                    phoenix,
                ),
                event("Home", None, "free", 1541106500796, None, 52, 0, ""),
                event(
                    "NextSong",
                    sylvie,
                    "free",
                    1541107053796,
                    Some(("Something Girls", "Adam Ant", 233.40363)),
                    9,
                    0,
                    dc,
                ),
                event(
                    "NextSong",
                    kaylee,
                    "paid",
                    1541190000000,
                    Some(("I Didn't Mean To", "Casual", 218.93179)),
                    200,
                    0,
                    phoenix,
                ),
            ],
        ),
        (
            "log_data/2018/12/2018-12-01-events.json",
            vec![
                event(
                    "NextSong",
                    ryan,
                    "free",
                    1543622400000,
                    Some(("Face the Ashes", "Gob", 209.60608)),
                    583,
                    0,
                    san_jose,
                ),
                event(
                    "NextSong",
                    sylvie,
                    "free",
                    1543622400000,
                    Some(("Soul Deep", "The Box Tops", 148.03546)),
                    311,
                    4,
                    dc,
                ),
                event("Logout", sylvie, "free", 1543622500000, None, 311, 5, dc),
            ],
        ),
    ]
}

/// The sample dataset materialized in a temporary directory:
/// `input/` with the raw logs, an empty `output/` and `dl.cfg`.
pub struct SampleDataset {
    dir: TempDir,
}

impl SampleDataset {
    pub fn new() -> Self {
        Self::new_with_etl_options(&[])
    }

    /// Like [SampleDataset::new] with extra entries in the `[ETL]` section.
    pub fn new_with_etl_options(etl_options: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Self { dir };
        for (relative_path, record) in song_records() {
            dataset.write_input(relative_path, &[record]);
        }
        for (relative_path, records) in event_records() {
            dataset.write_input(relative_path, &records);
        }
        fs::create_dir_all(dataset.output_dir()).unwrap();
        fs::write(dataset.config_path(), dataset.config_ini(etl_options)).unwrap();
        dataset
    }

    fn write_input(&self, relative_path: &str, records: &[Value]) {
        let lines: Vec<String> = records.iter().map(|r| r.to_string()).collect();
        self.write_input_lines(relative_path, &lines);
    }

    /// Write raw JSON lines to a file under the input location.
    pub fn write_input_lines<S: AsRef<str>>(&self, relative_path: &str, lines: &[S]) {
        let path = self.input_dir().join(relative_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let lines: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
        fs::write(path, lines.join("\n")).unwrap();
    }

    /// Point `dl.cfg` at different settings, e.g. to rerun with other input.
    pub fn rewrite_config(&self, ini: &str) {
        fs::write(self.config_path(), ini).unwrap();
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root().join("input")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("output")
    }

    pub fn output_url(&self) -> Url {
        Url::from_directory_path(self.output_dir()).unwrap()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("dl.cfg")
    }

    pub fn config_ini(&self, etl_options: &[(&str, &str)]) -> String {
        let mut ini = format!(
            "[KEYS]\nAWS_ACCESS_KEY_ID=\nAWS_SECRET_ACCESS_KEY=\n\n[S3]\nINPUT_DATA={}\nOUTPUT_DATA={}\n",
            self.input_dir().display(),
            self.output_dir().display()
        );
        if !etl_options.is_empty() {
            ini.push_str("\n[ETL]\n");
            for (k, v) in etl_options {
                ini.push_str(&format!("{k}={v}\n"));
            }
        }
        ini
    }
}

impl Default for SampleDataset {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_dataset_is_laid_out() {
        let dataset = SampleDataset::new();
        assert!(dataset
            .input_dir()
            .join("song_data/A/B/C/TRABCFL128F149BB0D.json")
            .is_file());
        assert!(dataset
            .input_dir()
            .join("log_data/2018/12/2018-12-01-events.json")
            .is_file());
        assert!(dataset.output_dir().is_dir());

        let cfg = fs::read_to_string(dataset.config_path()).unwrap();
        assert!(cfg.contains("[S3]"));
        assert!(!cfg.contains("[ETL]"));
    }

    #[test]
    fn event_files_are_newline_delimited() {
        let dataset = SampleDataset::new();
        let content = fs::read_to_string(
            dataset
                .input_dir()
                .join("log_data/2018/11/2018-11-01-events.json"),
        )
        .unwrap();
        let records: Vec<Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 6);
        assert_eq!(records[1]["page"], "NextSong");
        assert_eq!(records[3]["userId"], "");
    }

    #[test]
    fn expected_counts_match_records() {
        assert_eq!(song_records().len(), expected::NUM_SONG_FILES);
        assert_eq!(event_records().len(), expected::NUM_EVENT_FILES);
        let plays = event_records()
            .into_iter()
            .flat_map(|(_, records)| records)
            .filter(|r| r["page"] == "NextSong")
            .count();
        assert_eq!(plays, expected::NUM_PLAY_EVENTS);
    }

    #[test]
    fn etl_options_are_written() {
        let dataset = SampleDataset::new_with_etl_options(&[("TARGET_PARTITIONS", "2")]);
        let cfg = fs::read_to_string(dataset.config_path()).unwrap();
        assert!(cfg.ends_with("[ETL]\nTARGET_PARTITIONS=2\n"));
    }
}
