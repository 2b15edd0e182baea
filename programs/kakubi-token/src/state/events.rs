use kakubi_merkle_verify::Address;
use serde::{Deserialize, Serialize};

/// Observable record of a state change, returned by every successful instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEvent {
    /// Balance movement. Mints come from and burns go to [Address::ZERO].
    Transfer {
        from: Address,
        to: Address,
        amount: u128,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: u128,
    },
    /// Emitted when an airdrop allocation is claimed.
    Claimed {
        index: u64,
        account: Address,
        amount: u128,
    },
    RootChanged {
        safe: Address,
        root: [u8; 32],
    },
    FeeChanged {
        numerator: u64,
        denominator: u64,
    },
    BeneficiaryChanged {
        beneficiary: Address,
    },
    SwapAddressChanged {
        swap_address: Address,
    },
    FeeExemptionChanged {
        account: Address,
        exempt: bool,
    },
    FeeReceiverExemptionChanged {
        exempt: bool,
    },
    ClaimedBitmapWordCleared {
        word_index: u64,
    },
}
