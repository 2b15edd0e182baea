use std::collections::BTreeMap;

use kakubi_merkle_verify::Address;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ErrorCode, Result},
    require,
};

/// One balance or supply change inside a [Batch].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Debit(Address, u128),
    Credit(Address, u128),
    /// Grows total supply; pair with a credit.
    Mint(u128),
    /// Shrinks total supply; pair with a debit.
    Burn(u128),
}

/// Ordered list of movements applied all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    movements: Vec<Movement>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debit(mut self, account: Address, amount: u128) -> Self {
        self.movements.push(Movement::Debit(account, amount));
        self
    }

    pub fn credit(mut self, account: Address, amount: u128) -> Self {
        self.movements.push(Movement::Credit(account, amount));
        self
    }

    pub fn mint(mut self, amount: u128) -> Self {
        self.movements.push(Movement::Mint(amount));
        self
    }

    pub fn burn(mut self, amount: u128) -> Self {
        self.movements.push(Movement::Burn(amount));
        self
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }
}

/// Resulting balances of a validated [Batch], ready to be committed.
///
/// Only valid against the ledger it was prepared from; nothing may touch that
/// ledger between [Ledger::prepare] and [Ledger::commit].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PreparedBatch {
    balances: BTreeMap<Address, u128>,
    total_supply: u128,
}

/// ERC20-style balance sheet. The sum of all balances always equals
/// `total_supply`; zero balances are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balances: BTreeMap<Address, u128>,
    allowances: BTreeMap<Address, BTreeMap<Address, u128>>,
    total_supply: u128,
}

impl Ledger {
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: u128) {
        if amount == 0 {
            if let Some(spenders) = self.allowances.get_mut(&owner) {
                spenders.remove(&spender);
                if spenders.is_empty() {
                    self.allowances.remove(&owner);
                }
            }
        } else {
            self.allowances
                .entry(owner)
                .or_default()
                .insert(spender, amount);
        }
    }

    /// Accounts holding a non-zero balance.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &u128)> {
        self.balances.iter()
    }

    /// Runs every movement of `batch` against an overlay of the current
    /// balances, in order. Fails without side effects on the first movement
    /// that would underflow a balance or overflow the supply.
    pub fn prepare(&self, batch: &Batch) -> Result<PreparedBatch> {
        let mut balances: BTreeMap<Address, u128> = BTreeMap::new();
        let mut total_supply = self.total_supply;

        for movement in batch.movements() {
            match *movement {
                Movement::Debit(account, amount) => {
                    let current = balances
                        .get(&account)
                        .copied()
                        .unwrap_or_else(|| self.balance_of(&account));
                    require!(current >= amount, ErrorCode::InsufficientBalance);
                    balances.insert(account, current - amount);
                }
                Movement::Credit(account, amount) => {
                    let current = balances
                        .get(&account)
                        .copied()
                        .unwrap_or_else(|| self.balance_of(&account));
                    let updated = current
                        .checked_add(amount)
                        .ok_or(ErrorCode::ArithmeticError)?;
                    balances.insert(account, updated);
                }
                Movement::Mint(amount) => {
                    total_supply = total_supply
                        .checked_add(amount)
                        .ok_or(ErrorCode::ArithmeticError)?;
                }
                Movement::Burn(amount) => {
                    total_supply = total_supply
                        .checked_sub(amount)
                        .ok_or(ErrorCode::ArithmeticError)?;
                }
            }
        }

        Ok(PreparedBatch {
            balances,
            total_supply,
        })
    }

    pub fn commit(&mut self, prepared: PreparedBatch) {
        for (account, balance) in prepared.balances {
            if balance == 0 {
                self.balances.remove(&account);
            } else {
                self.balances.insert(account, balance);
            }
        }
        self.total_supply = prepared.total_supply;
    }

    /// [Ledger::prepare] followed by [Ledger::commit].
    pub fn apply(&mut self, batch: &Batch) -> Result<()> {
        let prepared = self.prepare(batch)?;
        self.commit(prepared);
        Ok(())
    }
}
