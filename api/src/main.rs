mod error;
mod router;

use std::{fs::File, io::BufReader, net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use kakubi_merkle_tree::airdrop_merkle_tree::AirdropMerkleTree;
use kakubi_token::{KakubiToken, TokenConfig};
use router::RouterState;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ApiError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Bind address for the server
    #[clap(long, env, default_value = "0.0.0.0:7001")]
    bind_addr: SocketAddr,

    /// Path of the token genesis config
    #[clap(long, env)]
    config_path: PathBuf,

    /// Path of merkle tree; enables the proof endpoint
    #[clap(long, env)]
    merkle_tree_path: Option<PathBuf>,

    /// Token state snapshot, loaded at start when present and rewritten after every instruction
    #[clap(long, env)]
    state_path: Option<PathBuf>,
}

/// Resumes from the snapshot if there is one, otherwise starts from genesis.
/// A snapshot whose balances or fee do not check out is refused.
fn load_token(args: &Args) -> Result<KakubiToken> {
    if let Some(path) = args.state_path.as_ref().filter(|p| p.exists()) {
        info!("resuming from snapshot {}", path.display());
        let file = File::open(path)?;
        let token: KakubiToken = serde_json::from_reader(BufReader::new(file))?;
        token.validate()?;
        return Ok(token);
    }

    let config = TokenConfig::new_from_file(&args.config_path)?;
    info!("starting from genesis config {:?}", config);
    Ok(KakubiToken::new(&config)?)
}

#[tokio::main]
#[instrument]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("args: {:?}", args);

    let token = load_token(&args)?;

    let tree = match &args.merkle_tree_path {
        Some(path) => {
            let tree = AirdropMerkleTree::new_from_file(path)?;
            if tree.merkle_root != token.root {
                warn!(
                    "merkle tree root 0x{} does not match token root 0x{}",
                    hex::encode(tree.merkle_root),
                    hex::encode(token.root)
                );
            }
            Some(tree.convert_to_hashmap())
        }
        None => None,
    };

    let state = Arc::new(RouterState::new(token, tree, args.state_path.clone()));
    let app = router::get_routes(state);

    info!("starting server at {}", args.bind_addr);

    axum::Server::bind(&args.bind_addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}
