//! A fee-on-transfer token with a built-in, one-time airdrop distributor.
//!
//! This program is largely based off of [Uniswap's Merkle Distributor](https://github.com/Uniswap/merkle-distributor),
//! folded into the token ledger itself.
//!
//! # Rationale
//!
//! Sending tokens to thousands of wallets one by one is expensive to run and to operate. Instead the safe
//! publishes a single 256-bit root summarising the whole allocation list, mints the total into the token's
//! pool, and each holder claims their own allocation with a merkle proof. Claimed indices are tracked in a
//! packed bitmap, 256 indices per word, which the safe can clear word by word if a root has to be corrected.
//!
//! Every later transfer skims a configurable fraction to a fee receiver: either the beneficiary, or a swap
//! intake that converts collected fees through an external router (see [swap]).
//!
//! # Execution model
//!
//! Instructions take `&mut KakubiToken` and either apply completely or return an [error::ErrorCode] with the
//! state untouched. Callers sharing a token between threads must serialise instructions behind one lock.
//!
//! [process_instruction] trusts the caller it is given. Anything reachable from outside the process goes
//! through [process_signed_instruction], which takes the caller from an ed25519 signature and a per-signer
//! nonce (see [signed_instruction]).

pub mod access;
pub mod config;
pub mod error;
pub mod instructions;
pub mod signed_instruction;
pub mod state;
pub mod swap;

use instructions::*;
use kakubi_merkle_verify::Address;

pub use crate::{
    config::TokenConfig,
    error::{ErrorCode, Result},
    instructions::TokenInstruction,
    signed_instruction::{process_signed_instruction, SignedInstruction},
    state::{events::TokenEvent, token::KakubiToken},
};

/// Routes `instruction`, signed by `caller`, to its handler.
///
/// `transfer`, `approve`, `transfer_from` and `claim` are open to anyone; every
/// other instruction is gated on the caller being the safe.
pub fn process_instruction(
    token: &mut KakubiToken,
    caller: &Address,
    instruction: TokenInstruction,
) -> Result<Vec<TokenEvent>> {
    match instruction {
        TokenInstruction::Transfer { to, amount } => handle_transfer(token, caller, to, amount),
        TokenInstruction::Approve { spender, amount } => {
            handle_approve(token, caller, spender, amount)
        }
        TokenInstruction::TransferFrom { from, to, amount } => {
            handle_transfer_from(token, caller, from, to, amount)
        }
        TokenInstruction::Claim {
            index,
            amount,
            proof,
        } => handle_claim(token, caller, index, amount, &proof),
        TokenInstruction::SetRoot { root } => handle_set_root(token, caller, root),
        TokenInstruction::SetFee {
            numerator,
            denominator,
        } => handle_set_fee(token, caller, numerator, denominator),
        TokenInstruction::SetFeeReceiverExemption { exempt } => {
            handle_set_fee_receiver_exemption(token, caller, exempt)
        }
        TokenInstruction::SetFeeExempt { account, exempt } => {
            handle_set_fee_exempt(token, caller, account, exempt)
        }
        TokenInstruction::SetBeneficiary { beneficiary } => {
            handle_set_beneficiary(token, caller, beneficiary)
        }
        TokenInstruction::SetSwapAddress { swap_address } => {
            handle_set_swap_address(token, caller, swap_address)
        }
        TokenInstruction::Mint { amount } => handle_mint(token, caller, amount),
        TokenInstruction::Burn { amount } => handle_burn(token, caller, amount),
        TokenInstruction::ClearClaimedBitmapWord { word_index } => {
            handle_clear_claimed_bitmap_word(token, caller, word_index)
        }
    }
}
