use std::{fs::File, io::BufReader};

use anyhow::ensure;
use kakubi_merkle_tree::airdrop_merkle_tree::AirdropMerkleTree;
use kakubi_token::KakubiToken;

use crate::*;

/// Re-validates a tree file and, given a token snapshot, checks that the token
/// was set up for it: same root, and enough in the pool for every open claim.
pub fn process_verify(verify_args: &VerifyArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&verify_args.merkle_tree_path)?;
    merkle_tree.validate()?;
    println!(
        "tree ok: {} nodes, root 0x{}",
        merkle_tree.max_num_nodes,
        hex::encode(merkle_tree.merkle_root)
    );

    let Some(state_path) = &verify_args.state_path else {
        return Ok(());
    };
    let token: KakubiToken = serde_json::from_reader(BufReader::new(File::open(state_path)?))?;
    token.validate()?;

    ensure!(
        token.root == merkle_tree.merkle_root,
        "root mismatch: token has 0x{}",
        hex::encode(token.root)
    );

    let unclaimed: u128 = merkle_tree
        .tree_nodes
        .iter()
        .filter(|node| !token.is_claimed(node.index))
        .map(|node| node.amount)
        .sum();
    ensure!(
        token.distributor_balance() >= unclaimed,
        "distributor holds {} but {} is still claimable",
        token.distributor_balance(),
        unclaimed
    );

    println!(
        "token ok: {} claimed, {} of {} still claimable",
        token.claimed_bitmap.claimed_count(),
        unclaimed,
        merkle_tree.max_total_claim
    );
    Ok(())
}
