use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    error::{ErrorCode, Result},
    require,
    state::{events::TokenEvent, ledger::Batch, token::KakubiToken},
};

/// Validated balance movements of one fee-on-transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
    /// Receiver and size of the fee, when one applies
    pub fee: Option<(Address, u128)>,
    pub batch: Batch,
}

impl TransferPlan {
    /// `from` loses `amount`; `to` gains `amount - fee`; the fee receiver gains `fee`.
    pub fn new(token: &KakubiToken, from: Address, to: Address, amount: u128) -> Result<Self> {
        require!(
            token.balance_of(&from) >= amount,
            ErrorCode::InsufficientBalance
        );

        let fee = token.fee_for(&from, amount)?;
        let net = amount
            .checked_sub(fee.map_or(0, |(_, fee)| fee))
            .ok_or(ErrorCode::ArithmeticError)?;

        let mut batch = Batch::new().debit(from, amount).credit(to, net);
        if let Some((receiver, fee)) = fee {
            batch = batch.credit(receiver, fee);
        }

        Ok(Self {
            from,
            to,
            amount,
            fee,
            batch,
        })
    }

    pub fn fee_amount(&self) -> u128 {
        self.fee.map_or(0, |(_, fee)| fee)
    }

    /// Amount that reaches `to`.
    pub fn net_amount(&self) -> u128 {
        self.amount - self.fee_amount()
    }

    /// One transfer record for the recipient, and one for the fee receiver when a fee applied.
    pub fn events(&self) -> Vec<TokenEvent> {
        let mut events = vec![TokenEvent::Transfer {
            from: self.from,
            to: self.to,
            amount: self.net_amount(),
        }];
        if let Some((receiver, fee)) = self.fee {
            events.push(TokenEvent::Transfer {
                from: self.from,
                to: receiver,
                amount: fee,
            });
        }
        events
    }
}

/// Moves `amount` from the caller to `to`, skimming the transfer fee.
/// CHECK:
///     1. The caller holds at least `amount`
pub fn handle_transfer(
    token: &mut KakubiToken,
    caller: &Address,
    to: Address,
    amount: u128,
) -> Result<Vec<TokenEvent>> {
    let plan = TransferPlan::new(token, *caller, to, amount)?;
    token.ledger.apply(&plan.batch)?;

    info!(
        "transfer {} from {} to {} (fee {})",
        amount,
        caller,
        to,
        plan.fee_amount()
    );

    Ok(plan.events())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_utils::*;

    #[test]
    fn test_transfer_skims_one_percent() {
        let mut token = new_token();
        let (a, b) = (address(1), address(2));
        fund(&mut token, a, 1_000_000);

        let events = handle_transfer(&mut token, &a, b, 1_000_000).unwrap();

        assert_eq!(token.balance_of(&a), 0);
        assert_eq!(token.balance_of(&b), 990_000);
        assert_eq!(token.balance_of(&BENEFICIARY), 10_000);
        assert_eq!(token.total_supply(), 1_000_000);
        assert_eq!(
            events,
            vec![
                TokenEvent::Transfer {
                    from: a,
                    to: b,
                    amount: 990_000
                },
                TokenEvent::Transfer {
                    from: a,
                    to: BENEFICIARY,
                    amount: 10_000
                },
            ]
        );
        assert_supply_invariant(&token);
    }

    #[test]
    fn test_remainder_favours_recipient() {
        let mut token = new_token();
        let (a, b) = (address(1), address(2));
        fund(&mut token, a, 199);

        let events = handle_transfer(&mut token, &a, b, 199).unwrap();
        assert_eq!(token.balance_of(&b), 198);
        assert_eq!(token.balance_of(&BENEFICIARY), 1);
        assert_eq!(events.len(), 2);

        // below one fee unit nothing is skimmed, and no fee record is emitted
        let events = handle_transfer(&mut token, &b, a, 99).unwrap();
        assert_eq!(token.balance_of(&a), 99);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_insufficient_balance_changes_nothing() {
        let mut token = new_token();
        let (a, b) = (address(1), address(2));
        fund(&mut token, a, 100);
        let before = token.clone();

        assert_eq!(
            handle_transfer(&mut token, &a, b, 101),
            Err(ErrorCode::InsufficientBalance)
        );
        assert_eq!(token, before);
    }

    #[test]
    fn test_self_transfer_still_pays_fee() {
        let mut token = new_token();
        let a = address(1);
        fund(&mut token, a, 1000);

        handle_transfer(&mut token, &a, a, 1000).unwrap();
        assert_eq!(token.balance_of(&a), 990);
        assert_eq!(token.balance_of(&BENEFICIARY), 10);
        assert_supply_invariant(&token);
    }

    #[test]
    fn test_fee_receiver_forwarding() {
        let mut token = new_token();
        let b = address(2);
        fund(&mut token, BENEFICIARY, 1000);

        // without the exemption the receiver pays itself
        handle_transfer(&mut token, &BENEFICIARY, b, 500).unwrap();
        assert_eq!(token.balance_of(&b), 495);
        assert_eq!(token.balance_of(&BENEFICIARY), 505);

        token.fee.exempt_fee_receiver = true;
        handle_transfer(&mut token, &BENEFICIARY, b, 505).unwrap();
        assert_eq!(token.balance_of(&b), 1000);
        assert_eq!(token.balance_of(&BENEFICIARY), 0);
        assert_supply_invariant(&token);
    }

    #[test]
    fn test_zero_fee_moves_everything() {
        let mut token = new_token();
        token.fee.numerator = 0;
        let (a, b) = (address(1), address(2));
        fund(&mut token, a, 1000);

        let events = handle_transfer(&mut token, &a, b, 1000).unwrap();
        assert_eq!(token.balance_of(&b), 1000);
        assert_eq!(token.balance_of(&BENEFICIARY), 0);
        assert_eq!(events.len(), 1);
    }
}
