use std::{collections::BTreeMap, fs};

use kakubi_merkle_tree::airdrop_merkle_tree::AirdropMerkleTree;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvProof {
    pub index: u64,
    pub amount: u128,
    /// Claimant's proof of inclusion in the Merkle Tree
    pub proof: Vec<[u8; 32]>,
}

pub fn process_generate_proofs(generate_proofs_args: &GenerateProofsArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&generate_proofs_args.merkle_tree_path)?;
    fs::create_dir_all(&generate_proofs_args.output_dir)?;

    let max_entries = generate_proofs_args.max_entries_per_file.max(1);
    let mut proofs: BTreeMap<String, Vec<KvProof>> = BTreeMap::new();
    let mut entries = 0;
    let mut file_index = 0;

    for (claimant, nodes) in merkle_tree.convert_to_hashmap() {
        let kv_proofs = nodes
            .into_iter()
            .filter_map(|node| {
                Some(KvProof {
                    index: node.index,
                    amount: node.amount,
                    proof: node.proof?,
                })
            })
            .collect::<Vec<_>>();
        entries += kv_proofs.len();
        proofs.insert(claimant.to_string(), kv_proofs);

        if entries >= max_entries {
            write_to_file(generate_proofs_args, file_index, &proofs)?;
            file_index += 1;
            entries = 0;
            proofs = BTreeMap::new();
        }
    }
    if !proofs.is_empty() {
        write_to_file(generate_proofs_args, file_index, &proofs)?;
        file_index += 1;
    }

    println!("wrote {} proof files", file_index);
    Ok(())
}

fn write_to_file(
    generate_proofs_args: &GenerateProofsArgs,
    file_index: usize,
    proofs: &BTreeMap<String, Vec<KvProof>>,
) -> Result<()> {
    let path = generate_proofs_args
        .output_dir
        .join(format!("proofs_{}.json", file_index));
    fs::write(&path, serde_json::to_vec(proofs)?)?;
    println!("done {}", path.display());
    Ok(())
}
