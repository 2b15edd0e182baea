use std::str::FromStr;

use kakubi_merkle_verify::{leaf_hash, Address};
use serde::{Deserialize, Serialize};

use crate::{csv_entry::CsvEntry, error::MerkleTreeError};

/// Represents the claim information for one allocation index.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Position in the allocation list; the bit tracked by the claim bitmap
    pub index: u64,
    /// Address of the claimant; will be responsible for submitting the claim
    pub claimant: Address,
    /// Amount that claimant can claim
    pub amount: u128,
    /// Claimant's proof of inclusion in the Merkle Tree
    pub proof: Option<Vec<[u8; 32]>>,
}

impl TreeNode {
    pub fn new(index: u64, claimant: Address, amount: u128) -> Self {
        Self {
            index,
            claimant,
            amount,
            proof: None,
        }
    }

    pub fn hash(&self) -> [u8; 32] {
        leaf_hash(self.index, &self.claimant, self.amount)
    }

    /// Return amount for this claimant
    pub fn amount(&self) -> u128 {
        self.amount
    }
}

impl TryFrom<(u64, CsvEntry)> for TreeNode {
    type Error = MerkleTreeError;

    fn try_from((index, entry): (u64, CsvEntry)) -> Result<Self, Self::Error> {
        Ok(Self::new(
            index,
            Address::from_str(entry.address.as_str())?,
            entry.amount,
        ))
    }
}
