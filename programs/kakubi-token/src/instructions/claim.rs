use kakubi_merkle_verify::{leaf_hash, verify, Address};
use tracing::info;

use crate::{
    error::{ErrorCode, Result},
    require,
    state::{events::TokenEvent, ledger::Batch, token::KakubiToken},
};

/// Claims allocation `index` for the caller and pays it out of the pool.
/// The leaf is rebuilt from the caller's own address, so a proof only works
/// for the account it was issued to. Claims carry no transfer fee.
/// CHECK:
///     1. `index` has not been claimed yet
///     2. The merkle proof of `(index, caller, amount)` resolves to the current root
///     3. The pool holds at least `amount`
pub fn handle_claim(
    token: &mut KakubiToken,
    caller: &Address,
    index: u64,
    amount: u128,
    proof: &[[u8; 32]],
) -> Result<Vec<TokenEvent>> {
    require!(!token.is_claimed(index), ErrorCode::AlreadyClaimed);

    // Verify the merkle proof.
    let node = leaf_hash(index, caller, amount);
    require!(verify(proof, token.root, node), ErrorCode::InvalidProof);

    require!(
        token.distributor_balance() >= amount,
        ErrorCode::InsufficientDistributorFunds
    );

    let pool = token.pool;
    token
        .ledger
        .apply(&Batch::new().debit(pool, amount).credit(*caller, amount))?;
    token.claimed_bitmap.set_claimed(index);

    info!("{} claimed index {} for {}", caller, index, amount);

    Ok(vec![
        TokenEvent::Transfer {
            from: pool,
            to: *caller,
            amount,
        },
        TokenEvent::Claimed {
            index,
            account: *caller,
            amount,
        },
    ])
}

#[cfg(test)]
mod tests {
    use kakubi_merkle_verify::hash_pair;

    use super::*;
    use crate::instructions::test_utils::*;

    /// Two-leaf tree over `[(a, 1000), (b, 1000)]`, pool funded with 2000.
    fn setup() -> (KakubiToken, [[u8; 32]; 2]) {
        let mut token = new_token();
        let leaves = [
            leaf_hash(0, &address(1), 1000),
            leaf_hash(1, &address(2), 1000),
        ];
        token.root = hash_pair(&leaves[0], &leaves[1]);
        let pool = token.pool;
        fund(&mut token, pool, 2000);
        (token, leaves)
    }

    #[test]
    fn test_claim_pays_without_fee() {
        let (mut token, leaves) = setup();

        let events = handle_claim(&mut token, &address(1), 0, 1000, &[leaves[1]]).unwrap();

        assert_eq!(token.balance_of(&address(1)), 1000);
        assert_eq!(token.balance_of(&BENEFICIARY), 0);
        assert_eq!(token.distributor_balance(), 1000);
        assert!(token.is_claimed(0));
        assert!(!token.is_claimed(1));
        assert_eq!(
            events[1],
            TokenEvent::Claimed {
                index: 0,
                account: address(1),
                amount: 1000
            }
        );
        assert_supply_invariant(&token);
    }

    #[test]
    fn test_second_claim_is_rejected() {
        let (mut token, leaves) = setup();
        handle_claim(&mut token, &address(1), 0, 1000, &[leaves[1]]).unwrap();
        let before = token.clone();

        assert_eq!(
            handle_claim(&mut token, &address(1), 0, 1000, &[leaves[1]]),
            Err(ErrorCode::AlreadyClaimed)
        );
        // even with garbage from another caller
        assert_eq!(
            handle_claim(&mut token, &address(9), 0, 1, &[]),
            Err(ErrorCode::AlreadyClaimed)
        );
        assert_eq!(token, before);
    }

    #[test]
    fn test_claim_by_other_address_is_invalid() {
        let (mut token, leaves) = setup();
        let before = token.clone();

        assert_eq!(
            handle_claim(&mut token, &address(2), 0, 1000, &[leaves[1]]),
            Err(ErrorCode::InvalidProof)
        );
        assert_eq!(
            handle_claim(&mut token, &address(1), 0, 1001, &[leaves[1]]),
            Err(ErrorCode::InvalidProof)
        );
        assert_eq!(token, before);
    }

    #[test]
    fn test_claim_needs_funded_pool() {
        let (mut token, leaves) = setup();
        let pool = token.pool;
        token
            .ledger
            .apply(&Batch::new().debit(pool, 1500).burn(1500))
            .unwrap();
        let before = token.clone();

        assert_eq!(
            handle_claim(&mut token, &address(1), 0, 1000, &[leaves[1]]),
            Err(ErrorCode::InsufficientDistributorFunds)
        );
        assert_eq!(token, before);
        assert!(!token.is_claimed(0));
    }
}
