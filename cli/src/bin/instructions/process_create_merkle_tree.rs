use kakubi_merkle_tree::{airdrop_merkle_tree::AirdropMerkleTree, csv_entry::CsvEntry};

use crate::*;

pub fn process_create_merkle_tree(merkle_tree_args: &CreateMerkleTreeArgs) -> Result<()> {
    let csv_entries = CsvEntry::new_from_file(&merkle_tree_args.csv_path)?;
    let merkle_tree = AirdropMerkleTree::new_from_entries(csv_entries)?;
    merkle_tree.write_to_file(&merkle_tree_args.merkle_tree_path)?;

    println!(
        "wrote {} nodes to {}",
        merkle_tree.max_num_nodes,
        merkle_tree_args.merkle_tree_path.display()
    );
    println!("root: 0x{}", hex::encode(merkle_tree.merkle_root));
    println!("mint amount: {}", merkle_tree.max_total_claim);
    Ok(())
}
