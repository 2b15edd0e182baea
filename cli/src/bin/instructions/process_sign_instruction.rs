use kakubi_token::{SignedInstruction, TokenInstruction};

use crate::{instructions::keypair::read_keypair_file, *};

/// Prints a body ready for the api's `/execute` route.
pub fn process_sign_instruction(args: &SignInstructionArgs) -> Result<()> {
    let keypair = read_keypair_file(&args.keypair_path)?;
    let instruction: TokenInstruction = serde_json::from_str(&args.instruction)?;

    let signed = SignedInstruction::new(&keypair, args.nonce, instruction)?;
    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}
