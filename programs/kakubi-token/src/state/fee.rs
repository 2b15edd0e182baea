use serde::{Deserialize, Serialize};

use crate::{
    error::{ErrorCode, Result},
    require,
};

pub const DEFAULT_FEE_NUMERATOR: u64 = 1;
pub const DEFAULT_FEE_DENOMINATOR: u64 = 100;

/// Fraction of every transfer routed to the fee receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeParameters {
    pub numerator: u64,
    pub denominator: u64,
    /// Transfers sent by the fee receiver itself carry no fee.
    #[serde(default)]
    pub exempt_fee_receiver: bool,
}

impl Default for FeeParameters {
    fn default() -> Self {
        Self {
            numerator: DEFAULT_FEE_NUMERATOR,
            denominator: DEFAULT_FEE_DENOMINATOR,
            exempt_fee_receiver: false,
        }
    }
}

impl FeeParameters {
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        Self::validate(numerator, denominator)?;
        Ok(Self {
            numerator,
            denominator,
            exempt_fee_receiver: false,
        })
    }

    /// `numerator <= denominator`, and a zero denominator only with a zero numerator.
    pub fn validate(numerator: u64, denominator: u64) -> Result<()> {
        require!(
            numerator <= denominator && (denominator > 0 || numerator == 0),
            ErrorCode::InvalidFee
        );
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    /// `floor(amount * numerator / denominator)`, evaluated as
    /// `(amount / d) * n + (amount % d) * n / d` so no intermediate exceeds u128.
    /// Any remainder stays with the recipient.
    pub fn compute_fee(&self, amount: u128) -> Result<u128> {
        if !self.is_active() {
            return Ok(0);
        }
        let numerator = self.numerator as u128;
        let denominator = self.denominator as u128;

        let whole = (amount / denominator)
            .checked_mul(numerator)
            .ok_or(ErrorCode::ArithmeticError)?;
        // remainder < 2^64 and numerator < 2^64
        let partial = (amount % denominator) * numerator / denominator;
        let fee = whole
            .checked_add(partial)
            .ok_or(ErrorCode::ArithmeticError)?;

        require!(fee <= amount, ErrorCode::InvalidFee);
        Ok(fee)
    }
}
