use transfers::store::CsvStore;
use transfers::summary::{summarize_store, MonthlySummary};

use std::env;
use std::io::stdout;
use std::path::Path;

fn main() -> Result<(), anyhow::Error> {
    let csv_path = parse_args();
    validate_csv_file(&csv_path);

    let store = CsvStore::new(csv_path);
    let summaries = summarize_store(&store)?;
    write_summaries(stdout(), &summaries)?;

    Ok(())
}

fn parse_args() -> String {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => "transfers.csv".to_string(),
        2 => args[1].clone(),
        _ => {
            eprintln!("Usage: {} [csv_file]", args[0]);
            eprintln!("  csv_file: Path to CSV file (default: transfers.csv)");
            std::process::exit(1);
        }
    }
}

fn validate_csv_file(path: &str) {
    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' does not exist", path);
        std::process::exit(1);
    }

    if !path.to_lowercase().ends_with(".csv") {
        eprintln!("Error: File '{}' is not a CSV file", path);
        std::process::exit(1);
    }
}

fn write_summaries<W: std::io::Write>(
    writer: W,
    summaries: &[MonthlySummary],
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for summary in summaries {
        wtr.serialize(summary)?;
    }
    wtr.flush()?;
    Ok(())
}
