pub mod address;
pub mod leaf;

pub use address::{Address, AddressParseError};
pub use leaf::{encode_leaf, leaf_hash};
use solana_program::keccak::hashv;

/// Hashes two nodes of the tree. The pair is sorted before hashing so a proof
/// never needs to carry left/right position information.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[&a[..], &b[..]]).to_bytes()
    } else {
        hashv(&[&b[..], &a[..]]).to_bytes()
    }
}

/// This function deals with verification of Merkle trees (hash trees).
/// Modelled on OpenZeppelin's `MerkleProof.verify`.
/// Returns true if a `leaf` can be proved to be a part of a Merkle tree
/// defined by `root`. For this, a `proof` must be provided, containing
/// sibling hashes on the branch from the leaf to the root of the tree. Each
/// pair of leaves and each pair of pre-images are assumed to be sorted.
///
/// An empty proof only verifies a single-leaf tree, where the leaf is the root.
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let computed_hash = proof
        .iter()
        .fold(leaf, |computed_hash, proof_element| {
            hash_pair(&computed_hash, proof_element)
        });
    // Check if the computed hash (root) is equal to the provided root
    computed_hash == root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(n: u8) -> [u8; 32] {
        hashv(&[&[n]]).to_bytes()
    }

    #[test]
    fn test_hash_pair_is_order_independent() {
        let (a, b) = (leaf(1), leaf(2));
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
        assert_ne!(hash_pair(&a, &b), hash_pair(&a, &a));
    }

    #[test]
    fn test_empty_proof_only_matches_single_leaf() {
        let a = leaf(7);
        assert!(verify(&[], a, a));
        assert!(!verify(&[], leaf(8), a));
    }

    #[test]
    fn test_verify_two_level_tree() {
        let leaves = [leaf(1), leaf(2), leaf(3), leaf(4)];
        let left = hash_pair(&leaves[0], &leaves[1]);
        let right = hash_pair(&leaves[2], &leaves[3]);
        let root = hash_pair(&left, &right);

        assert!(verify(&[leaves[1], right], root, leaves[0]));
        assert!(verify(&[leaves[2], left], root, leaves[3]));
        // siblings out of order resolve to a different root
        assert!(!verify(&[right, leaves[1]], root, leaves[0]));
        // wrong leaf
        assert!(!verify(&[leaves[1], right], root, leaves[2]));
    }

    #[test]
    fn test_single_bit_flip_in_proof_fails() {
        let (a, b) = (leaf(1), leaf(2));
        let root = hash_pair(&a, &b);
        let mut proof = [b];
        proof[0][31] ^= 1;
        assert!(!verify(&proof, root, a));
    }
}
