//! Keeper side of the fee swap intake.
//!
//! When a swap address is configured, transfer fees pile up there. Anyone may
//! trigger a sweep: the whole intake balance is sold through an external AMM
//! router and the proceeds, denominated in the router's quote asset, are split
//! between the triggering caller (a small tip) and the owner of the intake.
//!
//! The quote asset never enters this ledger. Both shares are paid through
//! [SwapRouter::pay_out] before the sale is committed, so a keeper embedding
//! [process_swap] only has to supply a router bound to its AMM.

use kakubi_merkle_verify::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{ErrorCode, Result},
    instructions::transfer::TransferPlan,
    require,
    state::{events::TokenEvent, token::KakubiToken},
};

/// Share of the swap proceeds paid to the caller, as `out / SWAP_TIP_DIVISOR`.
pub const SWAP_TIP_DIVISOR: u128 = 100;

/// External automated-market-maker router.
pub trait SwapRouter {
    /// Ledger account that receives the tokens being sold.
    fn address(&self) -> Address;

    /// Sells `amount_in` tokens, already credited to [SwapRouter::address],
    /// and returns the proceeds in the quote asset.
    fn swap_exact_tokens_for_tokens(&mut self, amount_in: u128) -> Result<u128>;

    /// Sends `amount` of the quote asset received from a sale to `to`.
    fn pay_out(&mut self, to: &Address, amount: u128) -> Result<()>;
}

/// How the proceeds of one sweep were split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Tokens taken out of the intake
    pub amount_in: u128,
    /// Tokens that reached the router, after any transfer fee
    pub amount_sold: u128,
    /// Quote asset returned by the router
    pub amount_out: u128,
    /// Quote asset owed to the caller
    pub tip: u128,
    /// Quote asset owed to the intake owner
    pub owner_amount: u128,
    pub caller: Address,
    pub owner: Address,
}

impl SwapOutcome {
    /// Quote asset owed per recipient: the caller's tip, then the owner's share.
    pub fn payouts(&self) -> [(Address, u128); 2] {
        [(self.caller, self.tip), (self.owner, self.owner_amount)]
    }
}

/// Sells the full swap intake balance through `router` and pays the proceeds
/// out to `caller` and `owner`.
/// The router only runs once the ledger transfer has been validated, and a
/// router failure, on the sale or on either payout, leaves the ledger untouched.
/// CHECK:
///     1. A swap address is configured
///     2. The intake holds a non-zero balance
pub fn process_swap<R: SwapRouter>(
    token: &mut KakubiToken,
    router: &mut R,
    caller: &Address,
    owner: &Address,
) -> Result<(SwapOutcome, Vec<TokenEvent>)> {
    let swap_address = token.swap_address.ok_or(ErrorCode::SwapAddressNotSet)?;
    let amount_in = token.balance_of(&swap_address);
    require!(amount_in > 0, ErrorCode::NothingToSwap);

    let plan = TransferPlan::new(token, swap_address, router.address(), amount_in)?;
    let prepared = token.ledger.prepare(&plan.batch)?;

    let amount_sold = plan.net_amount();
    let amount_out = router.swap_exact_tokens_for_tokens(amount_sold)?;

    let tip = amount_out / SWAP_TIP_DIVISOR;
    let outcome = SwapOutcome {
        amount_in,
        amount_sold,
        amount_out,
        tip,
        owner_amount: amount_out - tip,
        caller: *caller,
        owner: *owner,
    };
    for (to, amount) in outcome.payouts() {
        if amount > 0 {
            router.pay_out(&to, amount)?;
        }
    }
    token.ledger.commit(prepared);

    info!(
        "swapped {} fee tokens for {} (tip {} to {}, {} to {})",
        amount_sold, amount_out, outcome.tip, caller, outcome.owner_amount, owner
    );

    Ok((outcome, plan.events()))
}
