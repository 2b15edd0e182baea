use std::collections::{BTreeMap, BTreeSet};

use kakubi_merkle_verify::Address;
use serde::{Deserialize, Serialize};
use solana_program::keccak::hashv;

use crate::{
    config::TokenConfig,
    error::{ErrorCode, Result},
    require,
    state::{
        claim_bitmap::ClaimBitmap,
        fee::FeeParameters,
        ledger::Ledger,
    },
};

/// Seed for the account that holds minted, not yet claimed, supply.
pub const POOL_SEED: &[u8] = b"KakubiPool";

/// Derives the distributor pool account of a token controlled by `controller`.
pub fn get_pool_address(controller: &Address) -> Address {
    Address::from_digest(&hashv(&[POOL_SEED, controller.as_ref()]).to_bytes())
}

/// Entire persisted state of the token and its airdrop distributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KakubiToken {
    /// The safe. Sole signer of administrative instructions.
    pub controller: Address,
    /// Account funded by `mint` and drained by claims.
    pub pool: Address,
    /// Root of the current allocation tree.
    pub root: [u8; 32],
    pub claimed_bitmap: ClaimBitmap,
    pub ledger: Ledger,
    pub fee: FeeParameters,
    pub beneficiary: Option<Address>,
    /// Fee intake that swaps collected fees; takes precedence over `beneficiary`.
    pub swap_address: Option<Address>,
    /// Senders whose transfers carry no fee.
    pub fee_exempt: BTreeSet<Address>,
    /// Next nonce each signer must use.
    #[serde(default)]
    pub nonces: BTreeMap<Address, u64>,
}

impl KakubiToken {
    pub fn new(config: &TokenConfig) -> Result<Self> {
        config.validate()?;
        let fee = FeeParameters {
            exempt_fee_receiver: config.exempt_fee_receiver,
            ..FeeParameters::new(config.fee_numerator, config.fee_denominator)?
        };

        Ok(Self {
            controller: config.controller,
            pool: config
                .pool
                .unwrap_or_else(|| get_pool_address(&config.controller)),
            root: [0u8; 32],
            claimed_bitmap: ClaimBitmap::default(),
            ledger: Ledger::default(),
            fee,
            beneficiary: config.beneficiary,
            swap_address: config.swap_address,
            fee_exempt: config.fee_exempt.iter().copied().collect(),
            nonces: BTreeMap::new(),
        })
    }

    /// Checks a deserialised state before it is served: the fee fraction must
    /// be valid and the balances must add up to the recorded supply.
    pub fn validate(&self) -> Result<()> {
        FeeParameters::validate(self.fee.numerator, self.fee.denominator)?;
        let sum = self
            .ledger
            .holders()
            .try_fold(0u128, |sum, (_, balance)| sum.checked_add(*balance))
            .ok_or(ErrorCode::ArithmeticError)?;
        require!(sum == self.total_supply(), ErrorCode::SupplyMismatch);
        Ok(())
    }

    pub fn nonce_of(&self, account: &Address) -> u64 {
        self.nonces.get(account).copied().unwrap_or_default()
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.ledger.balance_of(account)
    }

    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.ledger.allowance(owner, spender)
    }

    pub fn is_claimed(&self, index: u64) -> bool {
        self.claimed_bitmap.is_claimed(index)
    }

    /// Balance still available to claimants.
    pub fn distributor_balance(&self) -> u128 {
        self.ledger.balance_of(&self.pool)
    }

    /// Account credited with transfer fees, if any.
    pub fn fee_receiver(&self) -> Option<Address> {
        self.swap_address.or(self.beneficiary)
    }

    /// Fee owed on a transfer of `amount` sent by `from`, and where it goes.
    pub fn fee_for(&self, from: &Address, amount: u128) -> Result<Option<(Address, u128)>> {
        let receiver = match self.fee_receiver() {
            Some(receiver) if self.fee.is_active() => receiver,
            _ => return Ok(None),
        };
        if self.fee_exempt.contains(from) || (self.fee.exempt_fee_receiver && *from == receiver)
        {
            return Ok(None);
        }

        let fee = self.fee.compute_fee(amount)?;
        Ok((fee > 0).then_some((receiver, fee)))
    }
}
