pub use approve::*;
pub use burn::*;
pub use claim::*;
pub use clear_claimed_bitmap_word::*;
pub use mint::*;
pub use set_beneficiary::*;
pub use set_fee::*;
pub use set_root::*;
pub use transfer::*;
pub use transfer_from::*;
pub mod approve;
pub mod burn;
pub mod claim;
pub mod clear_claimed_bitmap_word;
pub mod mint;
pub mod set_beneficiary;
pub mod set_fee;
pub mod set_root;
pub mod transfer;
pub mod transfer_from;

use kakubi_merkle_verify::Address;
use serde::{Deserialize, Serialize};

/// Every state-changing call the token accepts. The caller is supplied
/// alongside, never inside, the instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenInstruction {
    Transfer {
        to: Address,
        amount: u128,
    },
    Approve {
        spender: Address,
        amount: u128,
    },
    TransferFrom {
        from: Address,
        to: Address,
        amount: u128,
    },
    Claim {
        index: u64,
        amount: u128,
        proof: Vec<[u8; 32]>,
    },
    SetRoot {
        root: [u8; 32],
    },
    SetFee {
        numerator: u64,
        denominator: u64,
    },
    SetFeeReceiverExemption {
        exempt: bool,
    },
    SetFeeExempt {
        account: Address,
        exempt: bool,
    },
    SetBeneficiary {
        beneficiary: Address,
    },
    SetSwapAddress {
        swap_address: Address,
    },
    Mint {
        amount: u128,
    },
    Burn {
        amount: u128,
    },
    ClearClaimedBitmapWord {
        word_index: u64,
    },
}

impl TokenInstruction {
    /// Whether the instruction sits behind the controller gate.
    pub fn is_administrative(&self) -> bool {
        !matches!(
            self,
            TokenInstruction::Transfer { .. }
                | TokenInstruction::Approve { .. }
                | TokenInstruction::TransferFrom { .. }
                | TokenInstruction::Claim { .. }
        )
    }
}
