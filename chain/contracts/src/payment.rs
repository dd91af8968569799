//! Native currency payment collaborator
//!
//! Inbound currency arrives bundled with a deposit call (see
//! [`crate::portfolio::CallContext`]). Outbound currency leaves through a
//! [`PaymentRail`], which may refuse or fail.

use std::collections::{HashMap, HashSet};
use types::ids::AccountId;
use types::numeric::Amount;

use crate::errors::PaymentError;

/// Outbound native currency transport.
pub trait PaymentRail {
    /// Pay `amount` from `from` to `to`. A failure must leave no trace.
    fn pay(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), PaymentError>;
}

/// In-memory wallet book receiving payouts.
///
/// Recipients can be flagged to refuse payment, and the whole rail can be
/// taken offline to simulate a transient outage.
#[derive(Debug, Clone, Default)]
pub struct NativeBank {
    balances: HashMap<AccountId, Amount>,
    refusing: HashSet<AccountId>,
    offline: bool,
}

impl NativeBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currency received by `account` so far.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Make every future payment to `account` fail.
    pub fn refuse_payments_to(&mut self, account: AccountId) {
        self.refusing.insert(account);
    }

    /// Let `account` receive payments again.
    pub fn accept_payments_to(&mut self, account: &AccountId) {
        self.refusing.remove(account);
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }
}

impl PaymentRail for NativeBank {
    fn pay(&mut self, _from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), PaymentError> {
        if self.offline {
            return Err(PaymentError::Unavailable);
        }
        if self.refusing.contains(to) {
            return Err(PaymentError::Rejected {
                recipient: to.to_string(),
            });
        }
        let balance = self.balances.entry(*to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(PaymentError::Overflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_credits_recipient() {
        let mut bank = NativeBank::new();
        let pool = AccountId::new();
        let user = AccountId::new();

        bank.pay(&pool, &user, 7).unwrap();
        bank.pay(&pool, &user, 3).unwrap();
        assert_eq!(bank.balance_of(&user), 10);
    }

    #[test]
    fn test_refusing_recipient() {
        let mut bank = NativeBank::new();
        let pool = AccountId::new();
        let user = AccountId::new();
        bank.refuse_payments_to(user);

        let result = bank.pay(&pool, &user, 5);
        assert!(matches!(result, Err(PaymentError::Rejected { .. })));
        assert_eq!(bank.balance_of(&user), 0);

        bank.accept_payments_to(&user);
        bank.pay(&pool, &user, 5).unwrap();
        assert_eq!(bank.balance_of(&user), 5);
    }

    #[test]
    fn test_offline_rail() {
        let mut bank = NativeBank::new();
        bank.set_offline(true);
        let result = bank.pay(&AccountId::new(), &AccountId::new(), 1);
        assert_eq!(result, Err(PaymentError::Unavailable));
    }

    #[test]
    fn test_overflow_leaves_balance() {
        let mut bank = NativeBank::new();
        let pool = AccountId::new();
        let user = AccountId::new();
        bank.pay(&pool, &user, u128::MAX).unwrap();

        let result = bank.pay(&pool, &user, 1);
        assert_eq!(result, Err(PaymentError::Overflow));
        assert_eq!(bank.balance_of(&user), u128::MAX);
    }
}
