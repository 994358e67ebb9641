use anyhow::{Context, Result};
use clap::Parser;
use ordered_float::OrderedFloat;
use std::fs::File;
use std::io::{BufWriter, Write};

use stopfinder::{classify_tracks, read_tracks_from_path, summarize, write_classified, Thresholds};

#[derive(Parser, Debug)]
#[command(name = "stopfinder")]
#[command(about = "Classify GPS samples from a CSV (lat,lon,time[,track]) into stops and movement.", long_about = None)]
struct Cli {
    /// Path to the .csv file
    #[arg(short, long)]
    csv: String,

    /// Stop radius around the anchor sample, in meters
    #[arg(short, long, default_value_t = 50.0)]
    distance: f64,

    /// Minimum dwell time, in the unit of the time column
    #[arg(short = 't', long, default_value_t = 300.0)]
    duration: f64,

    /// Output CSV (track,index,lat,lon,time,stop). If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Report sample indices and stop anchors starting at 1
    #[arg(long, default_value_t = false)]
    one_based: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let tracks = read_tracks_from_path(&cli.csv).with_context(|| format!("reading {}", &cli.csv))?;
    let thresholds = Thresholds::new(cli.distance, cli.duration);

    use std::time::SystemTime;
    let now = SystemTime::now();
    let classified = classify_tracks(tracks, &thresholds);
    if let Ok(elapsed) = now.elapsed() {
        log::info!("scanned {} tracks in {:.3} ms", classified.len(), elapsed.as_secs_f64() * 1000.0);
    }

    if let Some(out_path) = cli.out {
        let file = File::create(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
        write_classified(BufWriter::new(file), &classified, cli.one_based)
            .with_context(|| format!("writing CSV {}", &out_path))?;
        println!("Wrote classification for {} tracks to {}", classified.len(), out_path);
        return Ok(());
    }

    let base = usize::from(cli.one_based);
    for c in &classified {
        let stops = summarize(&c.track.samples, &c.stops)?;
        let name = c.track.id.as_deref().unwrap_or("<unnamed>");
        println!("Track {}: {} samples, {} stops", name, c.track.samples.len(), stops.len());
        for s in &stops {
            println!(
                "  stop @{}: samples {}..{} ({}), t={}..{}, centroid ({:.6}, {:.6})",
                s.anchor + base,
                s.anchor + base,
                s.end + base,
                s.len(),
                s.start_time,
                s.end_time,
                s.centroid.lat,
                s.centroid.lon
            );
        }
        if let Some(longest) = stops.iter().max_by_key(|s| OrderedFloat(s.duration())) {
            println!("  Longest dwell: {} (stop @{})", longest.duration(), longest.anchor + base);
        }
    }

    Ok(())
}
