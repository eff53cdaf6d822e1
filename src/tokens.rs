// src/tokens.rs

use std::collections::HashMap;

use alloy_primitives::{address, Address};

pub const BASE_COIN: &str = "KUSH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub symbol: String,
    pub address: Address,
}

/// Donation tokens a profile may accept, looked up in both directions.
/// Constructed once at start-up and passed to whoever needs it.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    base_coin: String,
    tokens: Vec<Token>,
    by_address: HashMap<Address, String>,
    by_symbol: HashMap<String, Address>,
}

impl TokenRegistry {
    pub fn new(base_coin: impl Into<String>, tokens: Vec<Token>) -> Self {
        let by_address = tokens
            .iter()
            .map(|t| (t.address, t.symbol.clone()))
            .collect();
        let by_symbol = tokens
            .iter()
            .map(|t| (t.symbol.clone(), t.address))
            .collect();
        Self {
            base_coin: base_coin.into(),
            tokens,
            by_address,
            by_symbol,
        }
    }

    pub fn base_coin(&self) -> &str {
        &self.base_coin
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn symbol_by_address(&self, address: &Address) -> Option<&str> {
        self.by_address.get(address).map(String::as_str)
    }

    pub fn address_by_symbol(&self, symbol: &str) -> Option<Address> {
        self.by_symbol.get(symbol).copied()
    }

    /// Symbols for the given addresses; unknown addresses are skipped.
    pub fn symbols_for(&self, addresses: &[Address]) -> Vec<String> {
        addresses
            .iter()
            .filter_map(|a| self.symbol_by_address(a).map(str::to_string))
            .collect()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new(
            BASE_COIN,
            vec![
                Token {
                    symbol: "USDT".to_string(),
                    address: address!("5ead2d2fa49925dbcd6de99a573cda494e3689be"),
                },
                Token {
                    symbol: "USDC".to_string(),
                    address: address!("953b8279d8eb26c42d33ba1aca130d853cb941c8"),
                },
                Token {
                    symbol: "BUSD".to_string(),
                    address: address!("ab1a4d4f1d656d2450692d237fdd6c7f9146e814"),
                },
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_work_both_ways() {
        let registry = TokenRegistry::default();
        assert_eq!(registry.base_coin(), "KUSH");

        let usdc = registry.address_by_symbol("USDC").expect("usdc");
        assert_eq!(registry.symbol_by_address(&usdc), Some("USDC"));
        assert!(registry.address_by_symbol("DOGE").is_none());
    }

    #[test]
    fn unknown_addresses_are_skipped() {
        let registry = TokenRegistry::default();
        let usdt = registry.address_by_symbol("USDT").expect("usdt");
        let symbols = registry.symbols_for(&[usdt, Address::ZERO]);
        assert_eq!(symbols, vec!["USDT".to_string()]);
    }
}
