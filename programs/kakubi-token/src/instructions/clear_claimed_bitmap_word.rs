use kakubi_merkle_verify::Address;
use tracing::info;

use crate::{
    access::require_controller,
    error::Result,
    state::{events::TokenEvent, token::KakubiToken},
};

/// Zeroes claim bitmap word `word_index`, so indices
/// `word_index * 256 .. word_index * 256 + 256` can be claimed again.
pub fn handle_clear_claimed_bitmap_word(
    token: &mut KakubiToken,
    caller: &Address,
    word_index: u64,
) -> Result<Vec<TokenEvent>> {
    require_controller(token, caller)?;

    let had_claims = token.claimed_bitmap.clear_word(word_index);

    info!(
        "cleared claimed bitmap word {} (had claims: {})",
        word_index, had_claims
    );

    Ok(vec![TokenEvent::ClaimedBitmapWordCleared { word_index }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, instructions::test_utils::*};

    #[test]
    fn test_clear_word() {
        let mut token = new_token();
        token.claimed_bitmap.set_claimed(0);
        token.claimed_bitmap.set_claimed(1);
        token.claimed_bitmap.set_claimed(300);

        assert_eq!(
            handle_clear_claimed_bitmap_word(&mut token, &address(1), 0),
            Err(ErrorCode::Unauthorized)
        );
        assert!(token.is_claimed(0));

        handle_clear_claimed_bitmap_word(&mut token, &SAFE, 0).unwrap();
        assert!(!token.is_claimed(0));
        assert!(!token.is_claimed(1));
        assert!(token.is_claimed(300));

        // never-set word
        handle_clear_claimed_bitmap_word(&mut token, &SAFE, 77).unwrap();
        assert!(token.is_claimed(300));
    }
}
