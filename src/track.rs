//! CSV trajectory input and classification output.
//!
//! Input rows carry `lat`, `lon`, `time` and an optional `track` column.
//! Rows are grouped by track id in order of first appearance; rows with no
//! id all belong to one unnamed track.

use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Writer};
use fnv::FnvHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{check_len, Result};
use crate::stops::{find_stops_in, to_one_based, Sample, Thresholds};

#[derive(Debug, Deserialize)]
struct InputRow {
    #[serde(default)]
    track: Option<String>,
    lat: f64,
    lon: f64,
    time: f64,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    track: &'a str,
    index: usize,
    lat: f64,
    lon: f64,
    time: f64,
    stop: Option<usize>,
}

/// The samples of one trajectory, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: Option<String>,
    pub samples: Vec<Sample>,
}

impl Track {
    pub fn name(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

/// A track together with its per-sample classification.
#[derive(Debug, Clone)]
pub struct ClassifiedTrack {
    pub track: Track,
    pub stops: Vec<Option<usize>>,
}

pub fn read_tracks<R: io::Read>(reader: R) -> Result<Vec<Track>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut index: FnvHashMap<Option<String>, usize> = FnvHashMap::default();
    let mut tracks: Vec<Track> = Vec::new();

    for result in rdr.deserialize() {
        let row: InputRow = result?;
        let slot = *index.entry(row.track.clone()).or_insert_with(|| {
            tracks.push(Track {
                id: row.track.clone(),
                samples: Vec::new(),
            });
            tracks.len() - 1
        });
        tracks[slot]
            .samples
            .push(Sample::new(row.lat, row.lon, row.time));
    }

    Ok(tracks)
}

pub fn read_tracks_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Track>> {
    let file = std::fs::File::open(path)?;
    read_tracks(io::BufReader::new(file))
}

/// Run the stop scan on every track independently.
pub fn classify_tracks(tracks: Vec<Track>, thresholds: &Thresholds) -> Vec<ClassifiedTrack> {
    tracks
        .into_iter()
        .map(|track| {
            let stops = find_stops_in(&track.samples, thresholds);
            info!(
                "track '{}': {} samples, {} in stops",
                track.name(),
                track.samples.len(),
                stops.iter().filter(|s| s.is_some()).count()
            );
            ClassifiedTrack { track, stops }
        })
        .collect()
}

/// Write `track,index,lat,lon,time,stop` rows. `stop` is empty outside stops.
pub fn write_classified<W: io::Write>(
    writer: W,
    classified: &[ClassifiedTrack],
    one_based: bool,
) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for c in classified {
        check_len("classification", c.track.samples.len(), c.stops.len())?;
        let stops = if one_based {
            to_one_based(&c.stops)
        } else {
            c.stops.clone()
        };
        for (i, (s, stop)) in c.track.samples.iter().zip(stops).enumerate() {
            wtr.serialize(OutputRow {
                track: c.track.name(),
                index: if one_based { i + 1 } else { i },
                lat: s.lat,
                lon: s.lon,
                time: s.time,
                stop,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
