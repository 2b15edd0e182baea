pub use process_create_dummy_csv::*;
pub use process_create_keypair::*;
pub use process_create_merkle_tree::*;
pub use process_generate_proofs::*;
pub use process_get_proof::*;
pub use process_sign_instruction::*;
pub use process_verify::*;
pub mod keypair;
pub mod process_create_dummy_csv;
pub mod process_create_keypair;
pub mod process_create_merkle_tree;
pub mod process_generate_proofs;
pub mod process_get_proof;
pub mod process_sign_instruction;
pub mod process_verify;
