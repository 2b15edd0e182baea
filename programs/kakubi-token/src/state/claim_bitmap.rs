use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of claim flags packed into one bitmap word.
pub const WORD_BITS: u64 = 256;

const LIMB_BITS: u64 = 64;
const LIMBS_PER_WORD: usize = (WORD_BITS / LIMB_BITS) as usize;

/// A 256-bit word, least significant limb first.
pub type BitmapWord = [u64; LIMBS_PER_WORD];

/// Packed set of claimed allocation indices.
///
/// Bit `index % 256` of word `index / 256` is set once `index` has been claimed.
/// Absent words read as all zero, and a word that becomes zero is dropped, so
/// storage stays proportional to the words actually in use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimBitmap {
    words: BTreeMap<u64, BitmapWord>,
}

/// Word index, limb within the word and mask within the limb for `index`.
fn locate(index: u64) -> (u64, usize, u64) {
    let word_index = index / WORD_BITS;
    let bit = index % WORD_BITS;
    let limb = (bit / LIMB_BITS) as usize;
    (word_index, limb, 1u64 << (bit % LIMB_BITS))
}

impl ClaimBitmap {
    pub fn is_claimed(&self, index: u64) -> bool {
        let (word_index, limb, mask) = locate(index);
        self.words
            .get(&word_index)
            .map_or(false, |word| word[limb] & mask != 0)
    }

    /// Sets the flag for `index`. Idempotent, so callers must check
    /// [ClaimBitmap::is_claimed] first to reject a second claim.
    pub fn set_claimed(&mut self, index: u64) {
        let (word_index, limb, mask) = locate(index);
        self.words.entry(word_index).or_default()[limb] |= mask;
    }

    /// Zeroes word `word_index`, reopening up to 256 indices for claiming.
    /// Returns whether any flag was set in it.
    pub fn clear_word(&mut self, word_index: u64) -> bool {
        self.words
            .remove(&word_index)
            .map_or(false, |word| word.iter().any(|limb| *limb != 0))
    }

    pub fn word(&self, word_index: u64) -> BitmapWord {
        self.words.get(&word_index).copied().unwrap_or_default()
    }

    /// Number of indices currently flagged as claimed.
    pub fn claimed_count(&self) -> u64 {
        self.words
            .values()
            .flat_map(|word| word.iter())
            .map(|limb| limb.count_ones() as u64)
            .sum()
    }
}
