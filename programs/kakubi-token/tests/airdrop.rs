use kakubi_merkle_tree::airdrop_merkle_tree::AirdropMerkleTree;
use kakubi_merkle_verify::Address;
use kakubi_token::{
    process_instruction, ErrorCode, KakubiToken, TokenConfig, TokenEvent, TokenInstruction,
};

const SAFE: Address = Address::new([0x5a; 20]);
const BENEFICIARY: Address = Address::new([0xbe; 20]);
const A: Address = Address::new([0xa1; 20]);
const B: Address = Address::new([0xb2; 20]);
const C: Address = Address::new([0xc3; 20]);

fn new_token() -> KakubiToken {
    let mut config = TokenConfig::new(SAFE);
    config.beneficiary = Some(BENEFICIARY);
    KakubiToken::new(&config).unwrap()
}

fn claim(index: u64, amount: u128, proof: Vec<[u8; 32]>) -> TokenInstruction {
    TokenInstruction::Claim {
        index,
        amount,
        proof,
    }
}

fn proof_of(tree: &AirdropMerkleTree, index: u64) -> Vec<[u8; 32]> {
    tree.get_node_by_index(index)
        .and_then(|n| n.proof.clone())
        .unwrap()
}

fn assert_supply_invariant(token: &KakubiToken) {
    let sum: u128 = token.ledger.holders().map(|(_, b)| *b).sum();
    assert_eq!(sum, token.total_supply());
}

#[test]
fn test_two_entry_airdrop() {
    let tree = AirdropMerkleTree::new(vec![(A, 1000), (B, 1000)]).unwrap();
    let mut token = new_token();

    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::SetRoot {
            root: tree.merkle_root,
        },
    )
    .unwrap();
    process_instruction(&mut token, &SAFE, TokenInstruction::Mint { amount: 2000 }).unwrap();

    let events = process_instruction(&mut token, &A, claim(0, 1000, proof_of(&tree, 0))).unwrap();
    assert_eq!(token.balance_of(&A), 1000);
    assert!(events.contains(&TokenEvent::Claimed {
        index: 0,
        account: A,
        amount: 1000
    }));

    assert_eq!(
        process_instruction(&mut token, &A, claim(0, 1000, proof_of(&tree, 0))),
        Err(ErrorCode::AlreadyClaimed)
    );
    assert_eq!(
        process_instruction(&mut token, &B, claim(1, 1000, proof_of(&tree, 0))),
        Err(ErrorCode::InvalidProof)
    );

    process_instruction(&mut token, &B, claim(1, 1000, proof_of(&tree, 1))).unwrap();
    assert_eq!(token.distributor_balance(), 0);
    assert_supply_invariant(&token);
}

#[test]
fn test_fee_scenario_after_claim() {
    let tree = AirdropMerkleTree::new(vec![(A, 1_000_000)]).unwrap();
    let mut token = new_token();
    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::SetRoot {
            root: tree.merkle_root,
        },
    )
    .unwrap();
    process_instruction(&mut token, &SAFE, TokenInstruction::Mint { amount: 1_000_000 }).unwrap();
    // single-leaf tree: empty proof
    process_instruction(&mut token, &A, claim(0, 1_000_000, vec![])).unwrap();

    let supply = token.total_supply();
    process_instruction(
        &mut token,
        &A,
        TokenInstruction::Transfer {
            to: B,
            amount: 1_000_000,
        },
    )
    .unwrap();

    assert_eq!(token.balance_of(&B), 990_000);
    assert_eq!(token.balance_of(&BENEFICIARY), 10_000);
    assert_eq!(token.total_supply(), supply);
    assert_supply_invariant(&token);
}

#[test]
fn test_root_change_keeps_claims_and_clear_reopens() {
    let first = AirdropMerkleTree::new(vec![(A, 10), (B, 20), (C, 30)]).unwrap();
    let second = AirdropMerkleTree::new(vec![(A, 15), (B, 20), (C, 30)]).unwrap();
    let mut token = new_token();

    process_instruction(&mut token, &SAFE, TokenInstruction::Mint { amount: 1000 }).unwrap();
    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::SetRoot {
            root: first.merkle_root,
        },
    )
    .unwrap();
    process_instruction(&mut token, &A, claim(0, 10, proof_of(&first, 0))).unwrap();

    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::SetRoot {
            root: second.merkle_root,
        },
    )
    .unwrap();

    // the old proof is stale and index 0 is still taken
    assert_eq!(
        process_instruction(&mut token, &B, claim(1, 20, proof_of(&first, 1))),
        Err(ErrorCode::InvalidProof)
    );
    assert_eq!(
        process_instruction(&mut token, &A, claim(0, 15, proof_of(&second, 0))),
        Err(ErrorCode::AlreadyClaimed)
    );

    // remediation: reopen word 0, then the corrected allocation can be claimed
    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::ClearClaimedBitmapWord { word_index: 0 },
    )
    .unwrap();
    assert!(!token.is_claimed(0));
    process_instruction(&mut token, &A, claim(0, 15, proof_of(&second, 0))).unwrap();
    assert_eq!(token.balance_of(&A), 25);
    assert_supply_invariant(&token);
}

#[test]
fn test_claim_before_mint_fails() {
    let tree = AirdropMerkleTree::new(vec![(A, 1000), (B, 1000)]).unwrap();
    let mut token = new_token();
    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::SetRoot {
            root: tree.merkle_root,
        },
    )
    .unwrap();

    assert_eq!(
        process_instruction(&mut token, &A, claim(0, 1000, proof_of(&tree, 0))),
        Err(ErrorCode::InsufficientDistributorFunds)
    );
    assert!(!token.is_claimed(0));
}

#[test]
fn test_claims_across_bitmap_words() {
    let allocations: Vec<(Address, u128)> = (0..600u32)
        .map(|i| {
            let mut bytes = [0u8; 20];
            bytes[16..].copy_from_slice(&i.to_be_bytes());
            (Address::new(bytes), i as u128 + 1)
        })
        .collect();
    let tree = AirdropMerkleTree::new(allocations.clone()).unwrap();
    let mut token = new_token();
    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::SetRoot {
            root: tree.merkle_root,
        },
    )
    .unwrap();
    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::Mint {
            amount: tree.max_total_claim,
        },
    )
    .unwrap();

    for index in [0u64, 255, 256, 511, 512, 599] {
        let (claimant, amount) = allocations[index as usize];
        process_instruction(&mut token, &claimant, claim(index, amount, proof_of(&tree, index)))
            .unwrap();
    }
    assert_eq!(token.claimed_bitmap.claimed_count(), 6);

    process_instruction(
        &mut token,
        &SAFE,
        TokenInstruction::ClearClaimedBitmapWord { word_index: 1 },
    )
    .unwrap();
    assert!(token.is_claimed(0));
    assert!(token.is_claimed(255));
    assert!(!token.is_claimed(256));
    assert!(!token.is_claimed(511));
    assert!(token.is_claimed(512));
    assert_supply_invariant(&token);
}
