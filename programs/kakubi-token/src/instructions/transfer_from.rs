use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    error::{ErrorCode, Result},
    instructions::transfer::TransferPlan,
    require,
    state::{events::TokenEvent, token::KakubiToken},
};

/// Moves `amount` from `from` to `to` on behalf of the caller, skimming the
/// transfer fee exactly as a direct transfer by `from` would.
/// CHECK:
///     1. The caller's allowance from `from` covers `amount`
///     2. `from` holds at least `amount`
pub fn handle_transfer_from(
    token: &mut KakubiToken,
    caller: &Address,
    from: Address,
    to: Address,
    amount: u128,
) -> Result<Vec<TokenEvent>> {
    let allowance = token.allowance(&from, caller);
    require!(allowance >= amount, ErrorCode::InsufficientAllowance);

    let plan = TransferPlan::new(token, from, to, amount)?;
    token.ledger.apply(&plan.batch)?;

    let remaining = allowance - amount;
    token.ledger.set_allowance(from, *caller, remaining);

    info!(
        "{} moved {} from {} to {} (fee {})",
        caller,
        amount,
        from,
        to,
        plan.fee_amount()
    );

    let mut events = plan.events();
    events.push(TokenEvent::Approval {
        owner: from,
        spender: *caller,
        amount: remaining,
    });
    Ok(events)
}
