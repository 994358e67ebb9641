use crate::error::{check_len, Result};

/// Mean earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &Point) -> f64 {
        haversine_meters(self.lat, self.lon, other.lat, other.lon)
    }
}

// Multiply before dividing. `f64::to_radians` scales by a pre-divided
// constant and rounds differently in the last bit.
fn to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Great-circle distance using the haversine formula.
/// Input lat/lon in degrees. Output in meters.
///
/// Identical coordinates return exactly `0.0`. Coordinates are not range
/// checked, so out-of-range input gives a consistent but meaningless result.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let dlat = to_rad(lat2 - lat1);
    let dlon = to_rad(lon2 - lon1);
    let (phi1, phi2) = (to_rad(lat1), to_rad(lat2));
    let a = (dlat / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding near antipodal points can push `a` just past 1.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Distances between corresponding pairs of points.
pub fn haversine_paired(
    lat1: &[f64],
    lon1: &[f64],
    lat2: &[f64],
    lon2: &[f64],
) -> Result<Vec<f64>> {
    let n = lat1.len();
    check_len("lon1", n, lon1.len())?;
    check_len("lat2", n, lat2.len())?;
    check_len("lon2", n, lon2.len())?;

    Ok((0..n)
        .map(|i| haversine_meters(lat1[i], lon1[i], lat2[i], lon2[i]))
        .collect())
}

/// Distances between consecutive points of a single track, `n - 1` values.
///
/// Fewer than two latitudes yield an empty result before `lon` is looked at.
pub fn haversine_sequential(lat: &[f64], lon: &[f64]) -> Result<Vec<f64>> {
    if lat.len() < 2 {
        return Ok(Vec::new());
    }
    check_len("lon", lat.len(), lon.len())?;

    Ok(lat
        .windows(2)
        .zip(lon.windows(2))
        .map(|(la, lo)| haversine_meters(la[0], lo[0], la[1], lo[1]))
        .collect())
}
