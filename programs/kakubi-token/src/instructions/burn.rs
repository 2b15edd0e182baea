use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    access::require_controller,
    error::Result,
    state::{events::TokenEvent, ledger::Batch, token::KakubiToken},
};

/// Destroys `amount` from the safe's own balance.
/// CHECK:
///     1. The safe holds at least `amount`
pub fn handle_burn(
    token: &mut KakubiToken,
    caller: &Address,
    amount: u128,
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;

    token
        .ledger
        .apply(&Batch::new().debit(*caller, amount).burn(amount))?;

    info!(
        "burned {} from {}, total supply {}",
        amount,
        caller,
        token.total_supply()
    );

    Ok(vec![TokenEvent::Transfer {
        from: *caller,
        to: Address::ZERO,
        amount,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, instructions::test_utils::*};

    #[test]
    fn test_burn_from_safe() {
        let mut token = new_token();
        fund(&mut token, SAFE, 1000);

        let events = handle_burn(&mut token, &SAFE, 100).unwrap();

        assert_eq!(token.balance_of(&SAFE), 900);
        assert_eq!(token.total_supply(), 900);
        assert_eq!(
            events,
            vec![TokenEvent::Transfer {
                from: SAFE,
                to: Address::ZERO,
                amount: 100
            }]
        );
        assert_supply_invariant(&token);
    }

    #[test]
    fn test_burn_rejected() {
        let mut token = new_token();
        let holder = address(1);
        fund(&mut token, holder, 1000);
        fund(&mut token, SAFE, 10);
        let before = token.clone();

        // holders cannot burn, even their own balance
        assert_eq!(
            handle_burn(&mut token, &holder, 100),
            Err(ErrorCode::Unauthorized)
        );
        assert_eq!(
            handle_burn(&mut token, &SAFE, 11),
            Err(ErrorCode::InsufficientBalance)
        );
        assert_eq!(token, before);
    }
}
