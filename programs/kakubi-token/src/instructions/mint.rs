use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    access::require_controller,
    error::Result,
    state::{events::TokenEvent, ledger::Batch, token::KakubiToken},
};

/// Tops up the distributor pool with `amount` newly created tokens.
/// Minted supply lands in the pool, never in the safe.
pub fn handle_mint(
    token: &mut KakubiToken,
    caller: &Address,
    amount: u128,
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;

    let pool = token.pool;
    token
        .ledger
        .apply(&Batch::new().mint(amount).credit(pool, amount))?;

    info!(
        "minted {} into pool {}, total supply {}",
        amount,
        pool,
        token.total_supply()
    );

    Ok(vec![TokenEvent::Transfer {
        from: Address::ZERO,
        to: pool,
        amount,
    }])
}
