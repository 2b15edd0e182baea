use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use ed25519_dalek::Keypair;

use crate::*;

/// Reads a keypair stored as a JSON array of its 64 bytes, secret then public.
pub fn read_keypair_file(path: &Path) -> Result<Keypair> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading keypair {}", path.display()))?;
    let bytes: Vec<u8> = serde_json::from_str(&contents)?;
    Keypair::from_bytes(&bytes).map_err(|e| anyhow!("invalid keypair {}: {e}", path.display()))
}

pub fn write_keypair_file(keypair: &Keypair, path: &Path) -> Result<()> {
    let bytes = keypair.to_bytes().to_vec();
    fs::write(path, serde_json::to_string(&bytes)?)?;
    Ok(())
}
