use std::{fs::File, io::BufReader, path::Path};

use kakubi_merkle_verify::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::{ErrorCode, Result},
    state::fee::{FeeParameters, DEFAULT_FEE_DENOMINATOR, DEFAULT_FEE_NUMERATOR},
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serde Error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] ErrorCode),
}

fn default_fee_numerator() -> u64 {
    DEFAULT_FEE_NUMERATOR
}

fn default_fee_denominator() -> u64 {
    DEFAULT_FEE_DENOMINATOR
}

/// Genesis parameters of a token, usually read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// The safe
    pub controller: Address,
    /// Distributor pool; derived from the controller when absent
    #[serde(default)]
    pub pool: Option<Address>,
    #[serde(default)]
    pub beneficiary: Option<Address>,
    #[serde(default)]
    pub swap_address: Option<Address>,
    #[serde(default = "default_fee_numerator")]
    pub fee_numerator: u64,
    #[serde(default = "default_fee_denominator")]
    pub fee_denominator: u64,
    #[serde(default)]
    pub exempt_fee_receiver: bool,
    #[serde(default)]
    pub fee_exempt: Vec<Address>,
}

impl TokenConfig {
    /// Default 1/100 fee, no receiver configured yet.
    pub fn new(controller: Address) -> Self {
        Self {
            controller,
            pool: None,
            beneficiary: None,
            swap_address: None,
            fee_numerator: DEFAULT_FEE_NUMERATOR,
            fee_denominator: DEFAULT_FEE_DENOMINATOR,
            exempt_fee_receiver: false,
            fee_exempt: Vec::new(),
        }
    }

    pub fn new_from_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: TokenConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        FeeParameters::validate(self.fee_numerator, self.fee_denominator)
    }
}
