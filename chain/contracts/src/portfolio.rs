//! Portfolio — fixed-rate exchange between a token pool and a currency pool
//!
//! Callers deposit currency and receive tokens at the configured rate, or
//! redeem tokens for currency at the inverse rate (truncated toward zero).
//!
//! Every state-changing operation follows the same shape:
//! 1. Checks (amounts, balances, allowances) with no mutation
//! 2. Effects on `PoolState`
//! 3. Interactions with the token and payment collaborators
//! 4. Event emission
//!
//! Operations take `&mut self` and the ledger owns its collaborators, so a
//! collaborator cannot call back into the ledger mid-operation.
//!
//! If an interaction fails, the pool is restored from the snapshot taken
//! before step 2 and any interaction that already succeeded is compensated,
//! so a failed call leaves no observable partial state.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use types::ids::AccountId;
use types::numeric::{Amount, ExchangeRate};

use crate::admin::AdminGate;
use crate::config::PortfolioConfig;
use crate::errors::{ConfigError, ExchangeError};
use crate::events::{ContractEvent, DepositCompleted, RedeemCompleted};
use crate::payment::PaymentRail;
use crate::token::TokenLedger;

/// Identity of the caller and the currency bundled with the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: AccountId,
    pub value: Amount,
}

impl CallContext {
    pub fn new(caller: AccountId, value: Amount) -> Self {
        Self { caller, value }
    }
}

/// Reserves held by the pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Tokens held by the ledger on the token contract.
    pub token_reserve: Amount,
    /// Native currency held by the ledger.
    pub currency_reserve: Amount,
}

/// Custodial exchange ledger.
///
/// Owns its collaborators, so `&mut self` serializes every operation against
/// one instance. Use [`crate::shared::SharedPortfolio`] to share it across
/// threads.
#[derive(Debug)]
pub struct Portfolio<T, P> {
    address: AccountId,
    token_contract: AccountId,
    rate: ExchangeRate,
    pub(crate) admin: AdminGate,
    pub(crate) pool: PoolState,
    token: T,
    pub(crate) payments: P,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl<T: TokenLedger, P: PaymentRail> Portfolio<T, P> {
    /// Create a portfolio wired to `token` and `payments`.
    ///
    /// Tokens already sent to `config.address` count as the opening reserve.
    pub fn new(config: PortfolioConfig, token: T, payments: P) -> Result<Self, ConfigError> {
        let actual = token.address();
        if actual != config.token_contract {
            return Err(ConfigError::TokenMismatch {
                expected: config.token_contract.to_string(),
                actual: actual.to_string(),
            });
        }

        let token_reserve = token.balance_of(&config.address);
        info!(
            address = %config.address,
            administrator = %config.administrator,
            rate = %config.exchange_rate,
            token_reserve,
            "Portfolio initialized"
        );

        Ok(Self {
            address: config.address,
            token_contract: config.token_contract,
            rate: config.exchange_rate,
            admin: AdminGate::new(config.administrator),
            pool: PoolState {
                token_reserve,
                currency_reserve: 0,
            },
            token,
            payments,
            events: Vec::new(),
        })
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Convert the currency attached to `ctx` into tokens.
    ///
    /// Fails with `ZeroAmount`, `Overflow`, or `InsufficientPoolTokens`
    /// before touching state. Emits `DepositCompleted`.
    pub fn deposit(&mut self, ctx: CallContext) -> Result<DepositCompleted, ExchangeError> {
        let CallContext { caller, value } = ctx;

        if value == 0 {
            debug!(caller = %caller, "Deposit rejected: zero value");
            return Err(ExchangeError::ZeroAmount);
        }

        let token_owed = self.rate.tokens_for(value).ok_or(ExchangeError::Overflow)?;

        self.sync_token_reserve();
        let available = self.pool.token_reserve;
        if available < token_owed {
            debug!(
                caller = %caller,
                token_owed,
                available,
                "Deposit rejected: pool token reserve too low"
            );
            return Err(ExchangeError::InsufficientPoolTokens {
                required: token_owed,
                available,
            });
        }

        let currency_reserve = self
            .pool
            .currency_reserve
            .checked_add(value)
            .ok_or(ExchangeError::Overflow)?;

        // Effects
        let snapshot = self.pool;
        self.pool.token_reserve = available - token_owed;
        self.pool.currency_reserve = currency_reserve;

        // Interactions
        let address = self.address;
        if let Err(err) = self.token.transfer_to(&address, &caller, token_owed) {
            self.pool = snapshot;
            warn!(caller = %caller, error = %err, "Deposit rolled back: token transfer failed");
            return Err(err.into());
        }

        let event = DepositCompleted {
            caller,
            currency_paid: value,
            token_received: token_owed,
        };
        self.record(ContractEvent::DepositCompleted(event.clone()));
        info!(caller = %caller, currency = value, tokens = token_owed, "Deposit completed");
        Ok(event)
    }

    // ───────────────────────── Redeem ─────────────────────────

    /// Convert `token_amount` of the caller's tokens back into currency.
    ///
    /// The ledger pulls the tokens through the caller's allowance and pays
    /// `token_amount / rate` currency, truncated toward zero. Amounts below
    /// one rate unit are accepted and pay nothing. Emits `RedeemCompleted`.
    pub fn redeem(
        &mut self,
        caller: AccountId,
        token_amount: Amount,
    ) -> Result<RedeemCompleted, ExchangeError> {
        if token_amount == 0 {
            debug!(caller = %caller, "Redeem rejected: zero amount");
            return Err(ExchangeError::ZeroAmount);
        }

        let caller_balance = self.token.balance_of(&caller);
        if caller_balance < token_amount {
            debug!(caller = %caller, token_amount, caller_balance, "Redeem rejected: caller balance too low");
            return Err(ExchangeError::InsufficientCallerTokenBalance {
                required: token_amount,
                available: caller_balance,
            });
        }

        let currency_owed = self.rate.currency_for(token_amount);
        let currency_available = self.pool.currency_reserve;
        if currency_available < currency_owed {
            debug!(
                caller = %caller,
                currency_owed,
                currency_available,
                "Redeem rejected: pool currency reserve too low"
            );
            return Err(ExchangeError::InsufficientPoolCurrency {
                required: currency_owed,
                available: currency_available,
            });
        }

        let allowed = self.token.allowance_of(&caller, &self.address);
        if allowed < token_amount {
            debug!(caller = %caller, token_amount, allowed, "Redeem rejected: allowance too low");
            return Err(ExchangeError::TransferNotAuthorized {
                required: token_amount,
                allowed,
            });
        }

        self.sync_token_reserve();
        let token_reserve = self
            .pool
            .token_reserve
            .checked_add(token_amount)
            .ok_or(ExchangeError::Overflow)?;

        // Effects
        let snapshot = self.pool;
        self.pool.token_reserve = token_reserve;
        self.pool.currency_reserve = currency_available - currency_owed;

        // Interactions
        let address = self.address;
        if let Err(err) = self
            .token
            .transfer_from(&address, &caller, &address, token_amount)
        {
            self.pool = snapshot;
            warn!(caller = %caller, error = %err, "Redeem rolled back: token pull failed");
            return Err(err.into());
        }

        if currency_owed > 0 {
            if let Err(payment) = self.payments.pay(&address, &caller, currency_owed) {
                if let Err(token) =
                    self.token
                        .revert_transfer_from(&address, &caller, &address, token_amount)
                {
                    // Pulled tokens stay with the ledger, so only the currency
                    // side is restored.
                    self.pool.currency_reserve = snapshot.currency_reserve;
                    error!(
                        caller = %caller,
                        token_amount,
                        payment_error = %payment,
                        token_error = %token,
                        "Redeem rollback failed: pulled tokens could not be returned"
                    );
                    return Err(ExchangeError::RollbackFailed { payment, token });
                }
                self.pool = snapshot;
                warn!(caller = %caller, error = %payment, "Redeem rolled back: currency payment failed");
                return Err(ExchangeError::PaymentFailed(payment));
            }
        }

        let event = RedeemCompleted {
            caller,
            token_paid: token_amount,
            currency_received: currency_owed,
        };
        self.record(ContractEvent::RedeemCompleted(event.clone()));
        info!(caller = %caller, tokens = token_amount, currency = currency_owed, "Redeem completed");
        Ok(event)
    }

    // ───────────────────────── Reserves ─────────────────────────

    /// Adopt the token contract's view of the ledger's holdings.
    ///
    /// Picks up tokens sent to the ledger address outside of an exchange
    /// operation, such as the initial funding.
    fn sync_token_reserve(&mut self) {
        let held = self.token.balance_of(&self.address);
        if held != self.pool.token_reserve {
            debug!(
                tracked = self.pool.token_reserve,
                held,
                "Token reserve resynced from token contract"
            );
            self.pool.token_reserve = held;
        }
    }
}

impl<T, P> Portfolio<T, P> {
    /// The ledger's own address.
    pub fn address(&self) -> AccountId {
        self.address
    }

    pub fn token_contract(&self) -> AccountId {
        self.token_contract
    }

    pub fn exchange_rate(&self) -> ExchangeRate {
        self.rate
    }

    /// Current reserves.
    pub fn pool(&self) -> PoolState {
        self.pool
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    /// Direct access to the token contract, for actors that call it
    /// outside the ledger (funding, approvals).
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn payments_mut(&mut self) -> &mut P {
        &mut self.payments
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn record(&mut self, event: ContractEvent) {
        self.events.push(event);
    }
}
