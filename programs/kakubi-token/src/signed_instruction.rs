//! Authenticated instructions.
//!
//! Signers hold an ed25519 key. Their [Address] is the last 20 bytes of the
//! Keccak-256 digest of the public key. A signature covers the signer's next
//! nonce together with the canonical JSON encoding of the instruction, so a
//! signed instruction runs at most once and cannot be rewritten in flight.

use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signature, Signer};
use kakubi_merkle_verify::Address;
use serde::{Deserialize, Serialize};
use solana_program::keccak::hashv;
use tracing::debug;

use crate::{
    error::{ErrorCode, Result},
    process_instruction, require, KakubiToken, TokenEvent, TokenInstruction,
};

/// Domain separator prepended to every signed message.
pub const SIGNING_DOMAIN: &[u8] = b"KakubiInstruction";

/// Address controlled by `public_key`.
pub fn address_of(public_key: &PublicKey) -> Address {
    Address::from_digest(&hashv(&[public_key.as_bytes()]).to_bytes())
}

/// Rebuilds a keypair from its 32-byte secret.
pub fn keypair_from_secret(secret: &[u8]) -> Result<Keypair> {
    let secret = SecretKey::from_bytes(secret).map_err(|_| ErrorCode::InvalidSignature)?;
    let public = PublicKey::from(&secret);
    Ok(Keypair { secret, public })
}

/// Digest signed for `instruction` at `nonce`.
pub fn signing_message(nonce: u64, instruction: &TokenInstruction) -> Result<[u8; 32]> {
    let encoded = serde_json::to_vec(instruction).map_err(|_| ErrorCode::InvalidSignature)?;
    Ok(hashv(&[SIGNING_DOMAIN, &nonce.to_be_bytes(), &encoded]).to_bytes())
}

/// An instruction together with the key and signature that authorise it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedInstruction {
    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,
    pub nonce: u64,
    pub instruction: TokenInstruction,
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
}

impl SignedInstruction {
    pub fn new(keypair: &Keypair, nonce: u64, instruction: TokenInstruction) -> Result<Self> {
        let message = signing_message(nonce, &instruction)?;
        Ok(Self {
            public_key: keypair.public.to_bytes().to_vec(),
            nonce,
            instruction,
            signature: keypair.sign(&message).to_bytes().to_vec(),
        })
    }

    /// Verifies the signature and returns the signer's address.
    pub fn signer(&self) -> Result<Address> {
        let public_key =
            PublicKey::from_bytes(&self.public_key).map_err(|_| ErrorCode::InvalidSignature)?;
        let signature = Signature::try_from(self.signature.as_slice())
            .map_err(|_| ErrorCode::InvalidSignature)?;
        let message = signing_message(self.nonce, &self.instruction)?;
        public_key
            .verify_strict(&message, &signature)
            .map_err(|_| ErrorCode::InvalidSignature)?;
        Ok(address_of(&public_key))
    }
}

/// Runs `signed` as its signer. The signer's nonce advances only when the
/// instruction succeeds.
pub fn process_signed_instruction(
    token: &mut KakubiToken,
    signed: &SignedInstruction,
) -> Result<Vec<TokenEvent>> {
    let caller = signed.signer()?;
    let expected = token.nonce_of(&caller);
    require!(
        signed.nonce == expected,
        ErrorCode::InvalidNonce {
            expected,
            received: signed.nonce,
        }
    );
    let next = expected.checked_add(1).ok_or(ErrorCode::ArithmeticError)?;

    let events = process_instruction(token, &caller, signed.instruction.clone())?;
    token.nonces.insert(caller, next);
    debug!("{caller} executed nonce {expected}");
    Ok(events)
}
