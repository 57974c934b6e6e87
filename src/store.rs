use crate::stream_transfers;
use crate::transfer::RawTransfer;

/// Read-only source of transfer rows. The summarizer takes the store as an
/// explicit parameter rather than reading from an ambient connection handle.
pub trait TransferStore {
    fn transfers(&self) -> Result<Vec<RawTransfer>, anyhow::Error>;
}

/// Transfer collection backed by a CSV file with a
/// `from,to,amount,timestamp` header.
pub struct CsvStore {
    path: String,
}

impl CsvStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl TransferStore for CsvStore {
    fn transfers(&self) -> Result<Vec<RawTransfer>, anyhow::Error> {
        Ok(stream_transfers(&self.path)?.collect())
    }
}
