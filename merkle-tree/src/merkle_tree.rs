use kakubi_merkle_verify::hash_pair;

/// Sorted-pair merkle tree over pre-hashed leaves.
///
/// Each level hashes adjacent pairs with [hash_pair]; a trailing node without
/// a sibling is carried up to the next level unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` holds the leaves, the last level holds the root.
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn new(leaves: &[[u8; 32]]) -> Self {
        let mut levels = vec![leaves.to_vec()];

        while levels.last().map_or(false, |level| level.len() > 1) {
            let next = levels
                .last()
                .map(|level| {
                    level
                        .chunks(2)
                        .map(|pair| match pair {
                            [left, right] => hash_pair(left, right),
                            [odd] => *odd,
                            _ => unreachable!("chunks(2) yields one or two nodes"),
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            levels.push(next);
        }

        Self { levels }
    }

    pub fn get_root(&self) -> Option<[u8; 32]> {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Sibling hashes from the leaf at `index` up to the root.
    /// Levels where the node has no sibling contribute nothing.
    pub fn get_proof(&self, index: usize) -> Option<Vec<[u8; 32]>> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut proof = Vec::with_capacity(self.levels.len());
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = position ^ 1;
            if let Some(hash) = level.get(sibling) {
                proof.push(*hash);
            }
            position /= 2;
        }
        Some(proof)
    }
}
