use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
    result,
};

use indexmap::IndexMap;
use kakubi_merkle_verify::{verify, Address};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    csv_entry::CsvEntry,
    error::{MerkleTreeError, MerkleTreeError::MerkleValidationError},
    merkle_tree::MerkleTree,
    tree_node::TreeNode,
    utils::get_max_total_claim,
};

/// Merkle Tree which will be used to distribute tokens to claimants.
/// Contains all the information necessary to verify claims against the Merkle Tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropMerkleTree {
    /// The merkle root, which is handed to `set_root`
    pub merkle_root: [u8; 32],
    pub max_num_nodes: u64,
    pub max_total_claim: u128,
    pub tree_nodes: Vec<TreeNode>,
}

pub type Result<T> = result::Result<T, MerkleTreeError>;

impl AirdropMerkleTree {
    /// Builds the tree over `allocations` in list order; entry `i` gets index `i`.
    /// The same address may appear more than once, each at its own index.
    pub fn new(allocations: Vec<(Address, u128)>) -> Result<Self> {
        let mut tree_nodes: Vec<TreeNode> = allocations
            .into_iter()
            .enumerate()
            .map(|(i, (claimant, amount))| TreeNode::new(i as u64, claimant, amount))
            .collect();

        let hashed_nodes = tree_nodes.iter().map(TreeNode::hash).collect::<Vec<_>>();
        let tree = MerkleTree::new(&hashed_nodes[..]);

        for (i, tree_node) in tree_nodes.iter_mut().enumerate() {
            tree_node.proof = tree.get_proof(i);
        }

        let max_total_claim =
            get_max_total_claim(&tree_nodes).ok_or(MerkleTreeError::ArithmeticError)?;
        let tree = AirdropMerkleTree {
            merkle_root: tree.get_root().ok_or(MerkleTreeError::MerkleRootError)?,
            max_num_nodes: tree_nodes.len() as u64,
            max_total_claim,
            tree_nodes,
        };

        info!(
            "created merkle tree with {} nodes and max total claim of {}",
            tree.max_num_nodes, tree.max_total_claim
        );
        tree.validate()?;
        Ok(tree)
    }

    pub fn new_from_entries(entries: Vec<CsvEntry>) -> Result<Self> {
        let allocations = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                TreeNode::try_from((i as u64, entry)).map(|n| (n.claimant, n.amount))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(allocations)
    }

    /// Load a merkle tree from a csv path
    pub fn new_from_csv(path: &Path) -> Result<Self> {
        let csv_entries = CsvEntry::new_from_file(path)?;
        Self::new_from_entries(csv_entries)
    }

    /// Load a serialized merkle tree from file path
    pub fn new_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let tree: AirdropMerkleTree = serde_json::from_reader(reader)?;

        Ok(tree)
    }

    /// Write a merkle tree to a filepath
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self)?;
        let mut file = File::create(path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    /// First node allocated to `claimant`, if any.
    pub fn get_node(&self, claimant: &Address) -> Option<&TreeNode> {
        self.tree_nodes.iter().find(|n| n.claimant == *claimant)
    }

    pub fn get_node_by_index(&self, index: u64) -> Option<&TreeNode> {
        self.tree_nodes.get(usize::try_from(index).ok()?)
    }

    pub fn validate(&self) -> Result<()> {
        // indices are u64 on the wire but the tree itself is capped at height 32
        if self.max_num_nodes > 2u64.pow(32) - 1 {
            return Err(MerkleValidationError(format!(
                "Max num nodes {} is greater than 2^32 - 1",
                self.max_num_nodes
            )));
        }

        // validate that the length is equal to the max_num_nodes
        if self.tree_nodes.len() != self.max_num_nodes as usize {
            return Err(MerkleValidationError(format!(
                "Tree nodes length {} does not match max_num_nodes {}",
                self.tree_nodes.len(),
                self.max_num_nodes
            )));
        }

        // validate that every node sits at its own index
        if let Some((position, node)) = self
            .tree_nodes
            .iter()
            .enumerate()
            .find(|(i, n)| n.index != *i as u64)
        {
            return Err(MerkleValidationError(format!(
                "Tree node at position {} carries index {}",
                position, node.index
            )));
        }

        // validate that sum is equal to max_total_claim
        let sum = get_max_total_claim(&self.tree_nodes).ok_or(MerkleTreeError::ArithmeticError)?;

        if sum != self.max_total_claim {
            return Err(MerkleValidationError(format!(
                "Tree nodes sum {} does not match max_total_claim {}",
                sum, self.max_total_claim
            )));
        }

        self.verify_proof()
    }

    /// verify that the leaves of the merkle tree match the nodes
    pub fn verify_proof(&self) -> Result<()> {
        let root = self.merkle_root;

        // Recreate root given nodes
        let hashed_nodes: Vec<[u8; 32]> = self.tree_nodes.iter().map(TreeNode::hash).collect();
        let mk = MerkleTree::new(&hashed_nodes[..]);

        if mk.get_root() != Some(root) {
            return Err(MerkleValidationError(
                "Merkle root is invalid given nodes".to_string(),
            ));
        }

        // Verify each node against the root, using the proof stored on the node
        for (node, leaf) in self.tree_nodes.iter().zip(hashed_nodes) {
            let proof = node.proof.as_deref().ok_or_else(|| {
                MerkleValidationError(format!("missing proof for index {}", node.index))
            })?;

            if !verify(proof, root, leaf) {
                return Err(MerkleValidationError(format!(
                    "invalid merkle proof for index {}",
                    node.index
                )));
            }
        }

        Ok(())
    }

    /// Groups nodes by claimant for faster key access, keeping list order
    pub fn convert_to_hashmap(&self) -> IndexMap<Address, Vec<TreeNode>> {
        let mut map: IndexMap<Address, Vec<TreeNode>> = IndexMap::new();
        for node in self.tree_nodes.iter() {
            map.entry(node.claimant).or_default().push(node.clone());
        }
        map
    }
}
