//! Anchor-based stop detection.
//!
//! A stop is a run of samples that all stay within `distance_m` of the run's
//! first sample (its anchor) and whose departure happens at least `duration`
//! after the anchor. The scan walks forward once, comparing every candidate
//! against the current anchor rather than against its predecessor, so the
//! stop radius is a fixed circle around the anchor.
//!
//! Anchors are zero-based. Use [`to_one_based`] when handing results to a
//! one-based consumer.

use log::{debug, trace};

use crate::error::{check_len, Result};
use crate::geo::Point;

/// One timestamped position. Timestamps are expected to be non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub lat: f64,
    pub lon: f64,
    pub time: f64,
}

impl Sample {
    pub fn new(lat: f64, lon: f64, time: f64) -> Self {
        Self { lat, lon, time }
    }

    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lon)
    }

    fn distance_to(&self, other: &Sample) -> f64 {
        self.point().distance_to(&other.point())
    }
}

/// Distance and dwell-time thresholds for a single scan.
///
/// Neither value is validated. A negative `distance_m` turns every sample
/// into a break point; a non-positive `duration` makes every interval a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Stop radius around the anchor, in meters.
    pub distance_m: f64,
    /// Minimum dwell time, in the same unit as the sample timestamps.
    pub duration: f64,
}

impl Thresholds {
    pub fn new(distance_m: f64, duration: f64) -> Self {
        Self {
            distance_m,
            duration,
        }
    }
}

/// Classify parallel `lat`/`lon`/`time` sequences.
///
/// Returns one slot per sample: `Some(anchor)` for members of a stop,
/// `None` otherwise. Fails only when the sequences differ in length.
pub fn find_stops(
    lat: &[f64],
    lon: &[f64],
    time: &[f64],
    theta_d: f64,
    theta_t: f64,
) -> Result<Vec<Option<usize>>> {
    check_len("lon", lat.len(), lon.len())?;
    check_len("time", lat.len(), time.len())?;

    let samples: Vec<Sample> = lat
        .iter()
        .zip(lon)
        .zip(time)
        .map(|((&lat, &lon), &time)| Sample::new(lat, lon, time))
        .collect();

    Ok(find_stops_in(&samples, &Thresholds::new(theta_d, theta_t)))
}

/// Classify a trajectory. See the module docs for the stop definition.
pub fn find_stops_in(samples: &[Sample], thresholds: &Thresholds) -> Vec<Option<usize>> {
    let n = samples.len();
    let mut stops = vec![None; n];
    if n == 0 {
        return stops;
    }

    let mut anchor = 0;
    while anchor < n - 1 {
        let origin = &samples[anchor];
        let departure =
            (anchor + 1..n).find(|&j| origin.distance_to(&samples[j]) >= thresholds.distance_m);

        let Some(j) = departure else {
            break;
        };
        trace!("break point at {} for anchor {}", j, anchor);
        if samples[j].time - origin.time >= thresholds.duration {
            mark(&mut stops, anchor, j);
        }
        anchor = j;
    }

    // The tail from the last anchor is closed by the final sample. This also
    // runs when the anchor has just moved onto the last sample.
    if samples[n - 1].time - samples[anchor].time >= thresholds.duration {
        mark(&mut stops, anchor, n);
    }

    stops
}

fn mark(stops: &mut [Option<usize>], anchor: usize, end: usize) {
    debug!("stop anchored at {} covers {} samples", anchor, end - anchor);
    stops[anchor..end].fill(Some(anchor));
}

/// Shift anchors to one-based numbering, leaving `None` untouched.
pub fn to_one_based(stops: &[Option<usize>]) -> Vec<Option<usize>> {
    stops.iter().map(|s| s.map(|a| a + 1)).collect()
}

/// A detected stop: samples `anchor..end` of the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub anchor: usize,
    /// Exclusive end index.
    pub end: usize,
    pub start_time: f64,
    /// Timestamp of the last sample in the stop.
    pub end_time: f64,
    /// Mean position of the member samples.
    pub centroid: Point,
}

impl Stop {
    pub fn len(&self) -> usize {
        self.end - self.anchor
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.anchor
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Collapse a classification into one [`Stop`] per run of identical anchors.
///
/// Fails when `stops` and `samples` differ in length.
pub fn summarize(samples: &[Sample], stops: &[Option<usize>]) -> Result<Vec<Stop>> {
    check_len("classification", samples.len(), stops.len())?;

    let mut out = Vec::new();
    let mut i = 0;
    while i < stops.len() {
        let Some(anchor) = stops[i] else {
            i += 1;
            continue;
        };
        let end = stops[i..]
            .iter()
            .position(|s| *s != Some(anchor))
            .map_or(stops.len(), |p| i + p);

        let members = &samples[i..end];
        let count = members.len() as f64;
        let (lat_sum, lon_sum) = members
            .iter()
            .fold((0.0, 0.0), |(la, lo), s| (la + s.lat, lo + s.lon));

        out.push(Stop {
            anchor,
            end,
            start_time: samples[i].time,
            end_time: samples[end - 1].time,
            centroid: Point::new(lat_sum / count, lon_sum / count),
        });
        i = end;
    }
    Ok(out)
}
