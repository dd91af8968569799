//! Contract events
//!
//! Events are immutable records appended to the ledger's notification log
//! after an operation commits. Nothing inside the ledger consumes them.
//!
//! Amounts are `u128`. They survive `serde_json::to_string` / `from_str`
//! at any size, but `serde_json::to_value` rejects amounts above
//! `u64::MAX` because `serde_json::Value` numbers are at most 64 bits wide.

use serde::{Deserialize, Serialize};
use types::ids::AccountId;
use types::numeric::Amount;

/// Currency converted into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositCompleted {
    pub caller: AccountId,
    pub currency_paid: Amount,
    pub token_received: Amount,
}

/// Tokens redeemed back into currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemCompleted {
    pub caller: AccountId,
    pub token_paid: Amount,
    pub currency_received: Amount,
}

/// Administrator withdrew the entire currency reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministratorDrained {
    pub amount: Amount,
    pub recipient: AccountId,
}

/// Administrator role handed to a new identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferred {
    pub previous: AccountId,
    pub new: AccountId,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    DepositCompleted(DepositCompleted),
    RedeemCompleted(RedeemCompleted),
    AdministratorDrained(AdministratorDrained),
    OwnershipTransferred(OwnershipTransferred),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_completed_serialization() {
        let event = DepositCompleted {
            caller: AccountId::new(),
            currency_paid: 1_000_000_000_000_000_000,
            token_received: 100_000_000_000_000_000_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: DepositCompleted = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_contract_event_is_externally_tagged() {
        let recipient = AccountId::new();
        let event = ContractEvent::AdministratorDrained(AdministratorDrained {
            amount: 5,
            recipient,
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["AdministratorDrained"]["amount"], 5);
        assert_eq!(
            value["AdministratorDrained"]["recipient"],
            recipient.to_string()
        );
    }

    #[test]
    fn test_wide_amounts_need_string_encoding() {
        let event = ContractEvent::DepositCompleted(DepositCompleted {
            caller: AccountId::new(),
            currency_paid: u128::MAX / 100,
            token_received: u128::MAX,
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(&u128::MAX.to_string()));
        let deser: ContractEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deser, event);

        assert!(serde_json::to_value(&event).is_err());
    }

    #[test]
    fn test_contract_event_enum_variant() {
        let event = ContractEvent::RedeemCompleted(RedeemCompleted {
            caller: AccountId::new(),
            token_paid: 100,
            currency_received: 1,
        });
        assert!(matches!(event, ContractEvent::RedeemCompleted(_)));
    }
}
