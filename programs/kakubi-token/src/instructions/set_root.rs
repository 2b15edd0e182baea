use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    access::require_controller,
    error::Result,
    state::{events::TokenEvent, token::KakubiToken},
};

/// Replaces the merkle root. Proofs against the old tree stop working, but
/// indices already claimed stay claimed.
pub fn handle_set_root(
    token: &mut KakubiToken,
    caller: &Address,
    root: [u8; 32],
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;

    token.root = root;

    info!("set new merkle root to {}", hex::encode(root));

    Ok(vec![TokenEvent::RootChanged {
        safe: *caller,
        root,
    }])
}
