//! AdminGate — the single administrator identity and the currency drain
//!
//! Exactly one identity holds the administrator role at any time. Only that
//! identity may drain the currency reserve or hand the role to someone else.

use tracing::{debug, info, warn};
use types::ids::AccountId;

use crate::errors::ExchangeError;
use crate::events::{AdministratorDrained, ContractEvent, OwnershipTransferred};
use crate::payment::PaymentRail;
use crate::portfolio::Portfolio;

/// Holder of the administrator role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminGate {
    administrator: AccountId,
}

impl AdminGate {
    pub fn new(administrator: AccountId) -> Self {
        Self { administrator }
    }

    pub fn administrator(&self) -> AccountId {
        self.administrator
    }

    pub fn is_administrator(&self, caller: &AccountId) -> bool {
        self.administrator == *caller
    }

    /// Fail with `NotAdministrator` unless `caller` holds the role.
    pub fn authorize(&self, caller: &AccountId) -> Result<(), ExchangeError> {
        if !self.is_administrator(caller) {
            return Err(ExchangeError::NotAdministrator);
        }
        Ok(())
    }

    /// Hand the role to `new_administrator`, returning the previous holder.
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        new_administrator: AccountId,
    ) -> Result<AccountId, ExchangeError> {
        self.authorize(caller)?;
        Ok(std::mem::replace(&mut self.administrator, new_administrator))
    }
}

impl<T, P: PaymentRail> Portfolio<T, P> {
    /// Pay the entire currency reserve to the administrator.
    ///
    /// Fails with `NotAdministrator` for any other caller and with
    /// `InsufficientBalanceToWithdraw` when the reserve is empty. The token
    /// reserve is never touched. Emits `AdministratorDrained`.
    pub fn drain(&mut self, caller: &AccountId) -> Result<AdministratorDrained, ExchangeError> {
        if let Err(err) = self.admin.authorize(caller) {
            warn!(caller = %caller, "Drain rejected: caller is not the administrator");
            return Err(err);
        }

        let amount = self.pool.currency_reserve;
        if amount == 0 {
            debug!(caller = %caller, "Drain rejected: currency reserve is empty");
            return Err(ExchangeError::InsufficientBalanceToWithdraw);
        }

        // Effects
        self.pool.currency_reserve = 0;

        // Interactions
        let address = self.address();
        if let Err(err) = self.payments.pay(&address, caller, amount) {
            self.pool.currency_reserve = amount;
            warn!(caller = %caller, error = %err, "Drain rolled back: currency payment failed");
            return Err(err.into());
        }

        let event = AdministratorDrained {
            amount,
            recipient: *caller,
        };
        self.record(ContractEvent::AdministratorDrained(event.clone()));
        info!(recipient = %caller, amount, "Currency reserve drained");
        Ok(event)
    }
}

impl<T, P> Portfolio<T, P> {
    /// Current administrator.
    pub fn administrator(&self) -> AccountId {
        self.admin.administrator()
    }

    /// Hand the administrator role to `new_administrator`.
    ///
    /// Only the current administrator may call this. Emits
    /// `OwnershipTransferred`.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_administrator: AccountId,
    ) -> Result<OwnershipTransferred, ExchangeError> {
        let previous = self.admin.transfer(caller, new_administrator)?;
        let event = OwnershipTransferred {
            previous,
            new: new_administrator,
        };
        self.record(ContractEvent::OwnershipTransferred(event.clone()));
        info!(previous = %previous, new = %new_administrator, "Administrator role transferred");
        Ok(event)
    }
}
