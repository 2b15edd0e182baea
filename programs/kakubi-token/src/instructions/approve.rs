use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    error::Result,
    state::{events::TokenEvent, token::KakubiToken},
};

/// Lets `spender` move up to `amount` of the caller's balance.
/// Overwrites any previous allowance.
pub fn handle_approve(
    token: &mut KakubiToken,
    caller: &Address,
    spender: Address,
    amount: u128,
) -> Result<Vec<TokenEvent>> {
    token.ledger.set_allowance(*caller, spender, amount);

    info!("{} approved {} to spend {}", caller, spender, amount);

    Ok(vec![TokenEvent::Approval {
        owner: *caller,
        spender,
        amount,
    }])
}
