use kakubi_merkle_verify::AddressParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MerkleTreeError {
    #[error("Merkle Tree Validation Error: {0}")]
    MerkleValidationError(String),
    #[error("Merkle Root Error")]
    MerkleRootError,
    #[error("Arithmetic Error (overflow)")]
    ArithmeticError,
    #[error("Address Parse Error: {0}")]
    AddressParseError(#[from] AddressParseError),
    #[error("io Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serde Error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Csv Error: {0}")]
    CsvError(#[from] csv::Error),
}
