use std::{fs::File, path::Path, result};

use serde::{Deserialize, Serialize};

use crate::error::MerkleTreeError;

pub type Result<T> = result::Result<T, MerkleTreeError>;

/// Represents a single entry in a CSV, one allocation per row.
/// Row order defines the claim index.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CsvEntry {
    /// Hex address of the claimant; only this address can claim the entry
    pub address: String,
    /// amount in base units
    pub amount: u128,
}

impl CsvEntry {
    pub fn new_from_file(path: &Path) -> Result<Vec<Self>> {
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);

        let mut entries = Vec::new();
        for result in rdr.deserialize() {
            let record: CsvEntry = result?;
            entries.push(record);
        }

        Ok(entries)
    }
}
