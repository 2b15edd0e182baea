use solana_program::keccak::hashv;

use crate::Address;

/// Packed size of a leaf pre-image: uint256 index, 20 byte address, uint256 amount.
pub const LEAF_LEN: usize = 32 + 20 + 32;

/// Left-pads a value to a 256-bit big-endian word.
fn to_be_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Tightly packs `(index, address, amount)` the same way the tree builder does:
/// `index (32 bytes BE) || address (20 bytes) || amount (32 bytes BE)`.
pub fn encode_leaf(index: u64, address: &Address, amount: u128) -> [u8; LEAF_LEN] {
    let mut out = [0u8; LEAF_LEN];
    out[..32].copy_from_slice(&to_be_word(index as u128));
    out[32..52].copy_from_slice(address.as_ref());
    out[52..].copy_from_slice(&to_be_word(amount));
    out
}

/// Keccak-256 of the packed leaf.
pub fn leaf_hash(index: u64, address: &Address, amount: u128) -> [u8; 32] {
    hashv(&[&encode_leaf(index, address, amount)]).to_bytes()
}
