mod instructions;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use instructions::*;
use kakubi_merkle_verify::Address;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a Merkle tree, given a CSV of recipients
    CreateMerkleTree(CreateMerkleTreeArgs),
    /// Print claim instructions for one address, signed when given its keypair
    GetProof(GetProofArgs),
    /// Export every proof, keyed by address, into one or more JSON files
    GenerateProofs(GenerateProofsArgs),
    /// Check a tree file, and optionally a token snapshot against it
    Verify(VerifyArgs),
    /// Write a CSV of random recipients
    CreateDummyCsv(CreateDummyCsvArgs),
    /// Generate a signing keypair and print its address
    CreateKeypair(CreateKeypairArgs),
    /// Sign an instruction for the api's `/execute` route
    SignInstruction(SignInstructionArgs),
}

#[derive(Parser, Debug)]
pub struct CreateMerkleTreeArgs {
    /// CSV path
    #[clap(long, env)]
    pub csv_path: PathBuf,

    /// Merkle tree out path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct GetProofArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// Claimant address
    #[clap(long, env)]
    pub address: Address,

    /// Claimant keypair; signs the claims
    #[clap(long, env)]
    pub keypair_path: Option<PathBuf>,

    /// Nonce of the first signed claim
    #[clap(long, env, default_value_t = 0)]
    pub nonce: u64,
}

#[derive(Parser, Debug)]
pub struct GenerateProofsArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// Output directory
    #[clap(long, env)]
    pub output_dir: PathBuf,

    #[clap(long, env, default_value_t = 10_000)]
    pub max_entries_per_file: usize,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// Token state snapshot written by the api
    #[clap(long, env)]
    pub state_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CreateDummyCsvArgs {
    /// CSV path
    #[clap(long, env)]
    pub csv_path: PathBuf,
    #[clap(long, env)]
    pub num_records: u64,
    #[clap(long, env)]
    pub amount: u128,
    /// Seed for reproducible address lists
    #[clap(long, env)]
    pub seed: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct CreateKeypairArgs {
    /// Keypair out path
    #[clap(long, env)]
    pub outfile: PathBuf,

    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct SignInstructionArgs {
    /// Signer keypair
    #[clap(long, env)]
    pub keypair_path: PathBuf,

    /// Signer's current nonce, as served by `/nonce/:address`
    #[clap(long, env)]
    pub nonce: u64,

    /// Instruction as JSON, e.g. '{"mint":{"amount":100}}'
    #[clap(long)]
    pub instruction: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match &args.command {
        Commands::CreateMerkleTree(merkle_tree_args) => {
            process_create_merkle_tree(merkle_tree_args)
        }
        Commands::GetProof(get_proof_args) => process_get_proof(get_proof_args),
        Commands::GenerateProofs(generate_proofs_args) => {
            process_generate_proofs(generate_proofs_args)
        }
        Commands::Verify(verify_args) => process_verify(verify_args),
        Commands::CreateDummyCsv(dummy_csv_args) => process_create_dummy_csv(dummy_csv_args),
        Commands::CreateKeypair(keypair_args) => process_create_keypair(keypair_args),
        Commands::SignInstruction(sign_args) => process_sign_instruction(sign_args),
    }
}
