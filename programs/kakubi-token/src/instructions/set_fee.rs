use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    access::require_controller,
    error::Result,
    state::{events::TokenEvent, fee::FeeParameters, token::KakubiToken},
};

/// Sets the transfer fee to `numerator / denominator`.
/// CHECK:
///     1. `numerator <= denominator`, and `denominator > 0` unless the fee is switched off
pub fn handle_set_fee(
    token: &mut KakubiToken,
    caller: &Address,
    numerator: u64,
    denominator: u64,
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;
    FeeParameters::validate(numerator, denominator)?;

    token.fee.numerator = numerator;
    token.fee.denominator = denominator;

    info!("set transfer fee to {}/{}", numerator, denominator);

    Ok(vec![TokenEvent::FeeChanged {
        numerator,
        denominator,
    }])
}

/// Chooses whether transfers sent by the fee receiver itself pay the fee.
pub fn handle_set_fee_receiver_exemption(
    token: &mut KakubiToken,
    caller: &Address,
    exempt: bool,
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;

    token.fee.exempt_fee_receiver = exempt;

    info!("set fee receiver exemption to {}", exempt);

    Ok(vec![TokenEvent::FeeReceiverExemptionChanged { exempt }])
}

/// Adds `account` to, or removes it from, the fee-free senders.
pub fn handle_set_fee_exempt(
    token: &mut KakubiToken,
    caller: &Address,
    account: Address,
    exempt: bool,
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;

    if exempt {
        token.fee_exempt.insert(account);
    } else {
        token.fee_exempt.remove(&account);
    }

    info!("set fee exemption of {} to {}", account, exempt);

    Ok(vec![TokenEvent::FeeExemptionChanged { account, exempt }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorCode,
        instructions::{test_utils::*, transfer::handle_transfer},
    };

    #[test]
    fn test_set_fee() {
        let mut token = new_token();
        handle_set_fee(&mut token, &SAFE, 0, 100).unwrap();
        assert_eq!(token.fee.numerator, 0);
        assert_eq!(token.fee.denominator, 100);

        assert_eq!(
            handle_set_fee(&mut token, &SAFE, 3, 2),
            Err(ErrorCode::InvalidFee)
        );
        assert_eq!(
            handle_set_fee(&mut token, &address(1), 1, 2),
            Err(ErrorCode::Unauthorized)
        );
        assert_eq!(token.fee.numerator, 0);
    }

    #[test]
    fn test_zero_fee_then_transfer() {
        let mut token = new_token();
        let (a, b) = (address(1), address(2));
        fund(&mut token, a, 1000);
        handle_set_fee(&mut token, &SAFE, 0, 100).unwrap();

        handle_transfer(&mut token, &a, b, 1000).unwrap();
        assert_eq!(token.balance_of(&b), 1000);
        assert_eq!(token.balance_of(&BENEFICIARY), 0);
    }

    #[test]
    fn test_fee_exempt_sender() {
        let mut token = new_token();
        let (a, b) = (address(1), address(2));
        fund(&mut token, a, 2000);
        handle_set_fee_exempt(&mut token, &SAFE, a, true).unwrap();

        handle_transfer(&mut token, &a, b, 1000).unwrap();
        assert_eq!(token.balance_of(&b), 1000);

        handle_set_fee_exempt(&mut token, &SAFE, a, false).unwrap();
        handle_transfer(&mut token, &a, b, 1000).unwrap();
        assert_eq!(token.balance_of(&b), 1990);
    }

    #[test]
    fn test_set_fee_receiver_exemption() {
        let mut token = new_token();
        handle_set_fee_receiver_exemption(&mut token, &SAFE, true).unwrap();
        assert!(token.fee.exempt_fee_receiver);
        assert_eq!(
            handle_set_fee_receiver_exemption(&mut token, &address(3), false),
            Err(ErrorCode::Unauthorized)
        );
        assert!(token.fee.exempt_fee_receiver);
    }
}
