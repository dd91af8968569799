//! Thread-safe handle to a single portfolio instance.
//!
//! One mutex guards the whole ledger and is held for the duration of each
//! call, so operations from different threads never interleave.

use std::sync::{Arc, Mutex};
use types::ids::AccountId;
use types::numeric::Amount;

use crate::errors::ExchangeError;
use crate::events::{AdministratorDrained, DepositCompleted, RedeemCompleted};
use crate::payment::PaymentRail;
use crate::portfolio::{CallContext, PoolState, Portfolio};
use crate::token::TokenLedger;

/// Cloneable, lock-protected portfolio.
#[derive(Debug)]
pub struct SharedPortfolio<T, P> {
    inner: Arc<Mutex<Portfolio<T, P>>>,
}

impl<T, P> Clone for SharedPortfolio<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: TokenLedger, P: PaymentRail> SharedPortfolio<T, P> {
    pub fn new(portfolio: Portfolio<T, P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(portfolio)),
        }
    }

    pub fn deposit(&self, ctx: CallContext) -> Result<DepositCompleted, ExchangeError> {
        self.with(|portfolio| portfolio.deposit(ctx))
    }

    pub fn redeem(
        &self,
        caller: AccountId,
        token_amount: Amount,
    ) -> Result<RedeemCompleted, ExchangeError> {
        self.with(|portfolio| portfolio.redeem(caller, token_amount))
    }

    pub fn drain(&self, caller: &AccountId) -> Result<AdministratorDrained, ExchangeError> {
        self.with(|portfolio| portfolio.drain(caller))
    }

    pub fn pool(&self) -> Result<PoolState, ExchangeError> {
        self.with(|portfolio| Ok(portfolio.pool()))
    }

    /// Run `op` with exclusive access to the ledger.
    pub fn with<R>(
        &self,
        op: impl FnOnce(&mut Portfolio<T, P>) -> Result<R, ExchangeError>,
    ) -> Result<R, ExchangeError> {
        let mut portfolio = self.inner.lock().map_err(|_| ExchangeError::LockPoisoned)?;
        op(&mut portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortfolioConfig;
    use crate::payment::NativeBank;
    use crate::token::FungibleToken;
    use std::thread;

    fn setup() -> (SharedPortfolio<FungibleToken, NativeBank>, AccountId) {
        let admin = AccountId::new();
        let mut token = FungibleToken::new("Ada Token", "ADA", 1_000_000, admin);
        let config = PortfolioConfig::new(admin, token.address());
        token.transfer(&admin, &config.address, 100_000).unwrap();
        let portfolio = Portfolio::new(config, token, NativeBank::new()).unwrap();
        (SharedPortfolio::new(portfolio), admin)
    }

    #[test]
    fn test_concurrent_deposits_conserve_reserves() {
        let (shared, _) = setup();
        let num_threads = 8;
        let deposits_per_thread = 50;

        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let user = AccountId::new();
                    for _ in 0..deposits_per_thread {
                        shared.deposit(CallContext::new(user, 2)).unwrap();
                    }
                    user
                })
            })
            .collect();

        let users: Vec<AccountId> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let pool = shared.pool().unwrap();
        let total_currency = (num_threads * deposits_per_thread * 2) as Amount;
        assert_eq!(pool.currency_reserve, total_currency);
        assert_eq!(pool.token_reserve, 100_000 - total_currency * 100);

        shared
            .with(|portfolio| {
                for user in &users {
                    assert_eq!(portfolio.token().balance_of(user), 10_000);
                }
                assert_eq!(portfolio.events().len(), num_threads * deposits_per_thread);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_concurrent_deposits_never_overcommit() {
        let (shared, _) = setup();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let user = AccountId::new();
                    (0..100)
                        .filter(|_| shared.deposit(CallContext::new(user, 5)).is_ok())
                        .count()
                })
            })
            .collect();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(accepted, 200);
        assert_eq!(
            shared.pool().unwrap(),
            PoolState {
                token_reserve: 0,
                currency_reserve: 1_000
            }
        );
    }

    #[test]
    fn test_shared_drain() {
        let (shared, admin) = setup();
        shared.deposit(CallContext::new(AccountId::new(), 3)).unwrap();

        let other = shared.clone();
        assert_eq!(other.drain(&admin).unwrap().amount, 3);
        assert_eq!(shared.pool().unwrap().currency_reserve, 0);
    }
}
