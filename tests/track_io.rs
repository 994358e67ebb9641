//! End-to-end tests: CSV in, classification CSV out

use stopfinder::{classify_tracks, read_tracks, summarize, write_classified, Thresholds};

const TWO_TRACKS: &str = "\
track,lat,lon,time
home,52.0900,5.1200,0
home,52.0900,5.1201,200
home,52.0900,5.1200,400
work,52.0000,4.9000,0
home,52.1000,5.1200,500
work,52.2000,4.9000,10
";

#[test]
fn test_tracks_are_scanned_independently() {
    let tracks = read_tracks(TWO_TRACKS.as_bytes()).unwrap();
    let classified = classify_tracks(tracks, &Thresholds::new(50.0, 300.0));

    assert_eq!(classified.len(), 2);
    assert_eq!(classified[0].track.name(), "home");
    assert_eq!(classified[0].stops, vec![Some(0), Some(0), Some(0), None]);
    assert_eq!(classified[1].track.name(), "work");
    assert_eq!(classified[1].stops, vec![None, None]);

    let summary = summarize(&classified[0].track.samples, &classified[0].stops).unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].duration(), 400.0);
}

#[test]
fn test_written_csv_has_one_row_per_sample() {
    let tracks = read_tracks(TWO_TRACKS.as_bytes()).unwrap();
    let classified = classify_tracks(tracks, &Thresholds::new(50.0, 300.0));

    let mut out = Vec::new();
    write_classified(&mut out, &classified, false).unwrap();
    let text = String::from_utf8(out).unwrap();

    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 6);
    assert_eq!(&rows[0][0], "home");
    assert_eq!(&rows[0][5], "0");
    assert_eq!(&rows[3][5], "");
    assert_eq!(&rows[4][0], "work");
    assert_eq!(&rows[4][1], "0");
}
