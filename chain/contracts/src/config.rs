//! Construction-time configuration for a portfolio instance.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU128;
use types::ids::AccountId;
use types::numeric::ExchangeRate;

use crate::errors::ConfigError;

/// Token units issued per unit of currency unless configured otherwise.
pub const DEFAULT_TOKENS_PER_UNIT: u128 = 100;

const DEFAULT_RATE: NonZeroU128 = match NonZeroU128::new(DEFAULT_TOKENS_PER_UNIT) {
    Some(rate) => rate,
    None => panic!("default rate must be non-zero"),
};

/// Everything fixed when a portfolio is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortfolioConfig {
    /// The ledger's own address, used as token holder and spender.
    pub address: AccountId,
    /// Address of the token collaborator.
    pub token_contract: AccountId,
    /// Initial administrator.
    pub administrator: AccountId,
    /// Immutable tokens-per-currency rate.
    pub exchange_rate: ExchangeRate,
}

impl PortfolioConfig {
    /// Config with a fresh ledger address and the default rate.
    pub fn new(administrator: AccountId, token_contract: AccountId) -> Self {
        Self {
            address: AccountId::new(),
            token_contract,
            administrator,
            exchange_rate: ExchangeRate::from_nonzero(DEFAULT_RATE),
        }
    }

    pub fn with_exchange_rate(mut self, rate: ExchangeRate) -> Self {
        self.exchange_rate = rate;
        self
    }

    pub fn with_address(mut self, address: AccountId) -> Self {
        self.address = address;
        self
    }

    /// Parse a JSON document. A zero rate is rejected during parsing.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_rate() {
        let config = PortfolioConfig::new(AccountId::new(), AccountId::new());
        assert_eq!(
            config.exchange_rate.tokens_per_unit(),
            DEFAULT_TOKENS_PER_UNIT
        );
    }

    #[test]
    fn test_from_json() {
        let admin = AccountId::new();
        let token = AccountId::new();
        let address = AccountId::new();
        let json = format!(
            r#"{{"address":"{address}","token_contract":"{token}","administrator":"{admin}","exchange_rate":250}}"#
        );

        let config = PortfolioConfig::from_json(&json).unwrap();
        assert_eq!(config.administrator, admin);
        assert_eq!(config.token_contract, token);
        assert_eq!(config.address, address);
        assert_eq!(config.exchange_rate.tokens_per_unit(), 250);
    }

    #[test]
    fn test_from_json_rejects_zero_rate() {
        let json = format!(
            r#"{{"address":"{}","token_contract":"{}","administrator":"{}","exchange_rate":0}}"#,
            AccountId::new(),
            AccountId::new(),
            AccountId::new()
        );
        assert!(matches!(
            PortfolioConfig::from_json(&json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let config = PortfolioConfig::new(AccountId::new(), AccountId::new());
        let mut value = serde_json::to_value(&config).unwrap();
        value["tokens_per_eth"] = serde_json::json!(5);
        assert!(PortfolioConfig::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_builders() {
        let address = AccountId::new();
        let rate = ExchangeRate::new(7).unwrap();
        let config = PortfolioConfig::new(AccountId::new(), AccountId::new())
            .with_exchange_rate(rate)
            .with_address(address);
        assert_eq!(config.exchange_rate, rate);
        assert_eq!(config.address, address);
    }
}
