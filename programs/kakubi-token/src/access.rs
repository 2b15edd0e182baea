use kakubi_merkle_verify::Address;
use tracing::warn;

use crate::{
    error::{ErrorCode, Result},
    state::token::KakubiToken,
};

/// Gate in front of every administrative instruction: only the safe passes.
pub fn require_controller(token: &KakubiToken, caller: &Address) -> Result<()> {
    if *caller != token.controller {
        warn!("rejected administrative call from {}", caller);
        return Err(ErrorCode::Unauthorized);
    }
    Ok(())
}
