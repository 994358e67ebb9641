use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, Writer};
use std::io::Write;

use stopfinder::{haversine_paired, haversine_sequential};

#[derive(Parser, Debug)]
#[command(name = "haversine")]
#[command(about = "Compute haversine distances (meters) for the rows of a CSV file.", long_about = None)]
struct Cli {
    /// Path to the .csv file. Paired mode reads lat1,lon1,lat2,lon2; sequential mode reads lat,lon.
    #[arg(short, long)]
    csv: String,

    #[arg(short, long, value_enum, default_value_t = Mode::Sequential)]
    mode: Mode,

    /// Output CSV with a single distance_m column. If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Distance between the two points of each row
    Paired,
    /// Distance between consecutive rows
    Sequential,
}

/// Reads each row into fixed-width columns of floats.
fn parse_columns(path: &str, width: usize) -> Result<Vec<Vec<f64>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true) // important: skip header line
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut columns = vec![Vec::new(); width];
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        for (c, column) in columns.iter_mut().enumerate() {
            let field = record
                .get(c)
                .with_context(|| format!("row {} has fewer than {} fields", line + 1, width))?;
            let value: f64 = field
                .parse()
                .with_context(|| format!("row {}: bad number {:?}", line + 1, field))?;
            column.push(value);
        }
    }
    Ok(columns)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let distances = match cli.mode {
        Mode::Paired => {
            let cols = parse_columns(&cli.csv, 4).with_context(|| format!("reading {}", &cli.csv))?;
            haversine_paired(&cols[0], &cols[1], &cols[2], &cols[3])?
        }
        Mode::Sequential => {
            let cols = parse_columns(&cli.csv, 2).with_context(|| format!("reading {}", &cli.csv))?;
            haversine_sequential(&cols[0], &cols[1])?
        }
    };
    log::debug!("{:?} mode produced {} distances", cli.mode, distances.len());

    if let Some(out_path) = cli.out {
        let mut wtr =
            Writer::from_path(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
        wtr.write_record(["distance_m"])?;
        for d in &distances {
            wtr.write_record(&[format!("{:.6}", d)])?;
        }
        wtr.flush()?;
        println!("Wrote {} distances to {}", distances.len(), out_path);
    } else {
        let total: f64 = distances.iter().sum();
        println!("Distances: {}", distances.len());
        println!("Total (m): {:.2}", total);
        if let Some(max) = distances.iter().copied().reduce(f64::max) {
            println!("Max distance (m): {:.2}", max);
        }
    }

    Ok(())
}
