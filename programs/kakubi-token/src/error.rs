use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ErrorCode>;

/// Error codes. Every error leaves the token state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[error("Called by account other than safe")]
    Unauthorized,
    #[error("Transfer amount exceeds balance")]
    InsufficientBalance,
    #[error("Drop already claimed")]
    AlreadyClaimed,
    #[error("Invalid proof")]
    InvalidProof,
    #[error("Distributor balance is lower than the claimed amount")]
    InsufficientDistributorFunds,
    #[error("Transfer amount exceeds allowance")]
    InsufficientAllowance,
    #[error("Fee numerator must not exceed a non-zero denominator")]
    InvalidFee,
    #[error("Swap address is not set")]
    SwapAddressNotSet,
    #[error("Nothing to swap")]
    NothingToSwap,
    #[error("Swap router failed: {0}")]
    SwapFailed(String),
    #[error("Arithmetic Error (overflow/underflow)")]
    ArithmeticError,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid nonce {received}, expected {expected}")]
    InvalidNonce { expected: u64, received: u64 },
    #[error("Balances do not add up to total supply")]
    SupplyMismatch,
}

/// Returns early with `$err` unless `$cond` holds.
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
