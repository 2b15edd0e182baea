use anyhow::{anyhow, ensure};
use kakubi_merkle_tree::airdrop_merkle_tree::AirdropMerkleTree;
use kakubi_token::{signed_instruction::address_of, SignedInstruction, TokenInstruction};

use crate::{instructions::keypair::read_keypair_file, *};

/// Prints one claim per allocation of the address. With a keypair the claims
/// are signed with consecutive nonces, ready for `/execute`.
pub fn process_get_proof(get_proof_args: &GetProofArgs) -> Result<()> {
    let merkle_tree = AirdropMerkleTree::new_from_file(&get_proof_args.merkle_tree_path)?;
    let address = get_proof_args.address;

    let keypair = get_proof_args
        .keypair_path
        .as_deref()
        .map(read_keypair_file)
        .transpose()?;
    if let Some(keypair) = &keypair {
        ensure!(
            address_of(&keypair.public) == address,
            "keypair controls {}, not {}",
            address_of(&keypair.public),
            address
        );
    }

    let nodes = merkle_tree
        .convert_to_hashmap()
        .swap_remove(&address)
        .ok_or_else(|| anyhow!("{} is not in the merkle tree", address))?;

    for (nonce, node) in (get_proof_args.nonce..).zip(nodes) {
        let proof = node
            .proof
            .ok_or_else(|| anyhow!("no proof for index {}", node.index))?;
        let instruction = TokenInstruction::Claim {
            index: node.index,
            amount: node.amount,
            proof,
        };
        let output = match &keypair {
            Some(keypair) => serde_json::to_string_pretty(&SignedInstruction::new(
                keypair,
                nonce,
                instruction,
            )?)?,
            None => serde_json::to_string_pretty(&instruction)?,
        };
        println!("{output}");
    }
    Ok(())
}
