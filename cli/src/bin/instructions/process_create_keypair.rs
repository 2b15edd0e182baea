use anyhow::ensure;
use kakubi_token::signed_instruction::{address_of, keypair_from_secret};
use rand::{rngs::OsRng, RngCore};

use crate::{instructions::keypair::write_keypair_file, *};

pub fn process_create_keypair(args: &CreateKeypairArgs) -> Result<()> {
    ensure!(
        args.force || !args.outfile.exists(),
        "{} already exists, pass --force to overwrite",
        args.outfile.display()
    );

    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    let keypair = keypair_from_secret(&secret)?;
    write_keypair_file(&keypair, &args.outfile)?;

    println!(
        "wrote keypair for {} to {}",
        address_of(&keypair.public),
        args.outfile.display()
    );
    Ok(())
}
