//! Property-based tests for the distance function and the stop scan.

use proptest::prelude::*;
use stopfinder::{find_stops_in, haversine_meters, Sample, Thresholds, EARTH_RADIUS_M};

fn arb_point() -> impl Strategy<Value = (f64, f64)> {
    (-90.0f64..=90.0, -180.0f64..=180.0)
}

/// A trajectory with small random steps and non-decreasing timestamps.
fn arb_track(max_len: usize) -> impl Strategy<Value = Vec<Sample>> {
    proptest::collection::vec((-0.001f64..0.001, -0.001f64..0.001, 0.0f64..120.0), 0..max_len)
        .prop_map(|steps| {
            let (mut lat, mut lon, mut time) = (48.0, 11.0, 0.0);
            steps
                .into_iter()
                .map(|(dlat, dlon, dt)| {
                    lat += dlat;
                    lon += dlon;
                    time += dt;
                    Sample::new(lat, lon, time)
                })
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn distance_is_symmetric((lat1, lon1) in arb_point(), (lat2, lon2) in arb_point()) {
        let ab = haversine_meters(lat1, lon1, lat2, lon2);
        let ba = haversine_meters(lat2, lon2, lat1, lon1);
        prop_assert!((ab - ba).abs() <= 1e-6, "{} vs {}", ab, ba);
    }

    #[test]
    fn distance_is_bounded((lat1, lon1) in arb_point(), (lat2, lon2) in arb_point()) {
        let d = haversine_meters(lat1, lon1, lat2, lon2);
        prop_assert!(d.is_finite());
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1e-6);
    }

    #[test]
    fn distance_to_self_is_zero((lat, lon) in arb_point()) {
        prop_assert_eq!(haversine_meters(lat, lon, lat, lon), 0.0);
    }

    #[test]
    fn classification_matches_input_length(
        track in arb_track(60),
        theta_d in 0.0f64..400.0,
        theta_t in 0.0f64..600.0,
    ) {
        let stops = find_stops_in(&track, &Thresholds::new(theta_d, theta_t));
        prop_assert_eq!(stops.len(), track.len());
    }

    #[test]
    fn each_stop_is_labelled_with_its_first_index(
        track in arb_track(60),
        theta_d in 0.0f64..400.0,
        theta_t in 0.0f64..600.0,
    ) {
        let stops = find_stops_in(&track, &Thresholds::new(theta_d, theta_t));
        let mut last_anchor = None;
        for (i, stop) in stops.iter().enumerate() {
            if let Some(anchor) = *stop {
                // A run of one anchor starts where its label points.
                if i == 0 || stops[i - 1] != Some(anchor) {
                    prop_assert_eq!(anchor, i);
                }
                prop_assert!(last_anchor.map_or(true, |a| a <= anchor));
                last_anchor = Some(anchor);
            }
        }
    }

    #[test]
    fn stop_members_stay_within_radius_of_anchor(
        track in arb_track(60),
        theta_d in 1.0f64..400.0,
        theta_t in 0.0f64..600.0,
    ) {
        let stops = find_stops_in(&track, &Thresholds::new(theta_d, theta_t));
        for (i, stop) in stops.iter().enumerate() {
            if let Some(anchor) = *stop {
                let a = &track[anchor];
                let d = haversine_meters(a.lat, a.lon, track[i].lat, track[i].lon);
                prop_assert!(d < theta_d);
            }
        }
    }

    #[test]
    fn scan_is_deterministic(track in arb_track(40), theta_d in 0.0f64..400.0) {
        let thresholds = Thresholds::new(theta_d, 60.0);
        prop_assert_eq!(
            find_stops_in(&track, &thresholds),
            find_stops_in(&track, &thresholds)
        );
    }
}
