pub mod account;
pub mod error;
pub mod ledger;
pub mod store;
pub mod summary;
pub mod transfer;

use crate::transfer::RawTransfer;
use csv::ReaderBuilder;
use std::fs::File;

pub fn stream_transfers(path: &str) -> Result<impl Iterator<Item = RawTransfer>, anyhow::Error> {
    let file = File::open(path)?;
    let rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    // Filter out rows the CSV layer cannot deserialize; the timestamp column
    // is kept as raw text and judged later by the normalization stage
    Ok(rdr
        .into_deserialize::<RawTransfer>()
        .filter_map(|result| match result {
            Ok(transfer) => Some(transfer),
            Err(e) => {
                eprintln!("Skipping invalid CSV line: {}", e);
                None
            }
        }))
}
