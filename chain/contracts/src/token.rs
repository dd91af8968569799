//! Fungible token collaborator
//!
//! The ledger never stores token balances itself. It talks to a token
//! contract through [`TokenLedger`], which exposes the ERC-20 style
//! capabilities it needs: balance and allowance queries, a push transfer
//! from the ledger's own holdings, an allowance-backed pull, and the reversal
//! of a pull that has to be compensated.
//!
//! [`FungibleToken`] is an in-memory implementation: the entire supply is
//! minted to the deployer, holders move tokens with `transfer`, and grant
//! spenders an allowance with `approve`.

use std::collections::HashMap;
use types::ids::AccountId;
use types::numeric::{Amount, ETHER_DECIMALS};

use crate::errors::TokenError;

/// Capabilities the exchange ledger consumes from a token contract.
///
/// `sender` and `spender` are the identity issuing the call, i.e. the ledger
/// itself when invoked from an exchange operation.
pub trait TokenLedger {
    /// Address of the token contract.
    fn address(&self) -> AccountId;

    fn balance_of(&self, owner: &AccountId) -> Amount;

    fn allowance_of(&self, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Move `amount` of the sender's own tokens to `to`.
    fn transfer_to(
        &mut self,
        sender: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Move `amount` from `owner` to `to`, consuming the allowance `owner`
    /// granted to `spender`.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Undo a completed `transfer_from` with the same arguments: move
    /// `amount` from `to` back to `owner` and give the consumed allowance
    /// back to `spender`. Nothing changes on error.
    fn revert_transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError>;
}

/// In-memory ERC-20 style token.
#[derive(Debug, Clone)]
pub struct FungibleToken {
    address: AccountId,
    name: String,
    symbol: String,
    decimals: u32,
    total_supply: Amount,
    balances: HashMap<AccountId, Amount>,
    /// (owner, spender) -> remaining allowance
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

impl FungibleToken {
    /// Deploy a token, minting `initial_supply` to `deployer`.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        initial_supply: Amount,
        deployer: AccountId,
    ) -> Self {
        let mut balances = HashMap::new();
        balances.insert(deployer, initial_supply);
        Self {
            address: AccountId::new(),
            name: name.into(),
            symbol: symbol.into(),
            decimals: ETHER_DECIMALS,
            total_supply: initial_supply,
            balances,
            allowances: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Transfer the caller's own tokens.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.move_balance(from, to, amount)
    }

    /// Set the allowance `spender` may pull from `owner`, replacing any
    /// previous value.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Debit then credit, both checked before either is written.
    fn move_balance(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available: from_balance,
            });
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(*from, from_balance - amount);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}

impl TokenLedger for FungibleToken {
    fn address(&self) -> AccountId {
        self.address
    }

    fn balance_of(&self, owner: &AccountId) -> Amount {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn allowance_of(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn transfer_to(
        &mut self,
        sender: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.move_balance(sender, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let allowed = self.allowance_of(owner, spender);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance {
                required: amount,
                allowed,
            });
        }
        self.move_balance(owner, to, amount)?;
        self.allowances.insert((*owner, *spender), allowed - amount);
        Ok(())
    }

    fn revert_transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let restored = self
            .allowance_of(owner, spender)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.move_balance(to, owner, amount)?;
        self.allowances.insert((*owner, *spender), restored);
        Ok(())
    }
}
