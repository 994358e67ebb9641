//! # stopfinder
//!
//! Stop detection for GPS trajectories.
//!
//! A trajectory is a time-ordered list of `(lat, lon, time)` samples. The
//! scanner in [`stops`] marks every sample that belongs to a stop with the
//! index of the sample that anchors it, using haversine distances from
//! [`geo`].
//!
//! ```rust
//! use stopfinder::{find_stops_in, Sample, Thresholds};
//!
//! let track = vec![
//!     Sample::new(52.0900, 5.1200, 0.0),
//!     Sample::new(52.0900, 5.1201, 120.0),
//!     Sample::new(52.1000, 5.1300, 240.0),
//! ];
//! let stops = find_stops_in(&track, &Thresholds::new(50.0, 60.0));
//! assert_eq!(stops, vec![Some(0), Some(0), None]);
//! ```

pub mod error;
pub use error::{Result, StopFinderError};

pub mod geo;
pub use geo::{haversine_meters, haversine_paired, haversine_sequential, Point, EARTH_RADIUS_M};

pub mod stops;
pub use stops::{find_stops, find_stops_in, summarize, to_one_based, Sample, Stop, Thresholds};

pub mod track;
pub use track::{
    classify_tracks, read_tracks, read_tracks_from_path, write_classified, ClassifiedTrack, Track,
};
