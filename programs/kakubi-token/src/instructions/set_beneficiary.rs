use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    access::require_controller,
    error::Result,
    state::{events::TokenEvent, token::KakubiToken},
};

/// Sets the account credited with transfer fees while no swap address is set.
pub fn handle_set_beneficiary(
    token: &mut KakubiToken,
    caller: &Address,
    beneficiary: Address,
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;

    token.beneficiary = Some(beneficiary);

    info!("set new beneficiary to {}", beneficiary);

    Ok(vec![TokenEvent::BeneficiaryChanged { beneficiary }])
}

/// Routes transfer fees to a swap intake account instead of the beneficiary.
pub fn handle_set_swap_address(
    token: &mut KakubiToken,
    caller: &Address,
    swap_address: Address,
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;

    token.swap_address = Some(swap_address);

    info!("set new swap address to {}", swap_address);

    Ok(vec![TokenEvent::SwapAddressChanged { swap_address }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorCode,
        instructions::{test_utils::*, transfer::handle_transfer},
    };

    #[test]
    fn test_fees_follow_receiver() {
        let mut token = new_token();
        let (a, b, c) = (address(1), address(2), address(3));
        fund(&mut token, a, 3000);

        handle_set_beneficiary(&mut token, &SAFE, c).unwrap();
        handle_transfer(&mut token, &a, b, 1000).unwrap();
        assert_eq!(token.balance_of(&c), 10);

        let swap = address(4);
        handle_set_swap_address(&mut token, &SAFE, swap).unwrap();
        handle_transfer(&mut token, &a, b, 1000).unwrap();
        assert_eq!(token.balance_of(&c), 10);
        assert_eq!(token.balance_of(&swap), 10);
        assert_supply_invariant(&token);
    }

    #[test]
    fn test_unauthorized() {
        let mut token = new_token();
        let before = token.clone();
        assert_eq!(
            handle_set_beneficiary(&mut token, &address(1), address(1)),
            Err(ErrorCode::Unauthorized)
        );
        assert_eq!(
            handle_set_swap_address(&mut token, &address(1), address(1)),
            Err(ErrorCode::Unauthorized)
        );
        assert_eq!(token, before);
    }
}
