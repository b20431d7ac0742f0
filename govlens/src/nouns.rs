//! Nouns governance contract address book
//!
//! Static knowledge of mainnet governance contracts and the external tokens
//! that show up in proposals. Lookups are keyed by lowercase hex address.
//! Addresses that resolve here never appear in `addresses_to_resolve`.

use alloy_primitives::{Address, address};
use phf::phf_map;

use crate::types::Category;

/// Treasury / timelock executor (proxy).
pub const TREASURY: Address = address!("b1a32FC9F9D8b2cf86C068Cae13108809547ef71");
/// Governor proxy carrying the DAO's admin settings.
pub const DAO_PROXY: Address = address!("6f3E6272A167e8AcCb32072d08E0957F9c79223d");
/// Nouns ERC-721 token.
pub const TOKEN: Address = address!("9C8fF314C9Bc7F6e59A9d9225Fb22946427eDC03");
/// Auction house proxy.
pub const AUCTION_HOUSE: Address = address!("830BD73E4184ceF73443C15111a1DF14e495C706");
/// Art descriptor.
pub const DESCRIPTOR: Address = address!("6229c811D04501523C6058bfAAc29c91bb586268");
/// Payment stream factory.
pub const STREAM_FACTORY: Address = address!("0fd206FC7A7dBcD5661157eDCb1FFDD0D02A61ff");
/// USDC-for-ETH token buyer.
pub const TOKEN_BUYER: Address = address!("4f2aCdc74f6941390d9b1804faBc3E780388cfe5");
/// USDC payer / debt register.
pub const PAYER: Address = address!("d97Bcd9f47cEe35c0a9ec1dc40C1269afc9E8E1D");
/// Client incentive rewards proxy.
pub const CLIENT_REWARDS: Address = address!("883860178F95d0C82413eDc1D6De530cB4771d55");
/// Pre-migration treasury, still referenced by older proposals.
pub const TREASURY_V1: Address = address!("0BC3807Ec262cB779b38D65b38158acC3bfedE10");

/// Wrapped Ether.
pub const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
/// USD Coin.
pub const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// A governance contract the interpreter knows by name.
#[derive(Debug, Clone, Copy)]
pub struct KnownContract {
    pub name: &'static str,
    pub description: &'static str,
    pub default_category: Category,
}

static KNOWN_CONTRACTS: phf::Map<&'static str, KnownContract> = phf_map! {
    "0xb1a32fc9f9d8b2cf86c068cae13108809547ef71" => KnownContract {
        name: "Nouns Treasury",
        description: "Timelock executor holding the DAO's funds",
        default_category: Category::Treasury,
    },
    "0x6f3e6272a167e8accb32072d08e0957f9c79223d" => KnownContract {
        name: "Nouns DAO",
        description: "Governor proxy carrying voting and admin settings",
        default_category: Category::Governance,
    },
    "0x9c8ff314c9bc7f6e59a9d9225fb22946427edc03" => KnownContract {
        name: "Nouns Token",
        description: "The Nouns ERC-721 membership token",
        default_category: Category::Token,
    },
    "0x830bd73e4184cef73443c15111a1df14e495c706" => KnownContract {
        name: "Nouns Auction House",
        description: "Runs the daily Noun auction",
        default_category: Category::Auction,
    },
    "0x6229c811d04501523c6058bfaac29c91bb586268" => KnownContract {
        name: "Nouns Descriptor",
        description: "Stores and renders the on-chain artwork",
        default_category: Category::Art,
    },
    "0x0fd206fc7a7dbcd5661157edcb1ffdd0d02a61ff" => KnownContract {
        name: "Stream Factory",
        description: "Creates vesting payment streams funded by the treasury",
        default_category: Category::Stream,
    },
    "0x4f2acdc74f6941390d9b1804fabc3e780388cfe5" => KnownContract {
        name: "Token Buyer",
        description: "Swaps treasury ETH into USDC for payments",
        default_category: Category::Treasury,
    },
    "0xd97bcd9f47cee35c0a9ec1dc40c1269afc9e8e1d" => KnownContract {
        name: "Payer",
        description: "Pays USDC invoices and registers debt when short",
        default_category: Category::Payment,
    },
    "0x883860178f95d0c82413edc1d6de530cb4771d55" => KnownContract {
        name: "Client Rewards",
        description: "Distributes incentive rewards to client apps",
        default_category: Category::Rewards,
    },
    "0x0bc3807ec262cb779b38d65b38158acc3bfede10" => KnownContract {
        name: "Nouns Treasury V1",
        description: "Previous timelock, kept for legacy proposals",
        default_category: Category::Treasury,
    },
};

/// An external token recognized without any ABI knowledge.
#[derive(Debug, Clone, Copy)]
pub struct KnownToken {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
}

static KNOWN_TOKENS: phf::Map<&'static str, KnownToken> = phf_map! {
    "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2" => KnownToken {
        symbol: "WETH",
        name: "Wrapped Ether",
        decimals: 18,
    },
    "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48" => KnownToken {
        symbol: "USDC",
        name: "USD Coin",
        decimals: 6,
    },
};

fn key(address: &Address) -> String {
    format!("{address:#x}")
}

/// Looks up a governance contract by address.
pub fn known_contract(address: &Address) -> Option<&'static KnownContract> {
    KNOWN_CONTRACTS.get(key(address).as_str())
}

/// Looks up an external token by address.
pub fn known_token(address: &Address) -> Option<&'static KnownToken> {
    KNOWN_TOKENS.get(key(address).as_str())
}

/// Friendly name for an address when it belongs to a known governance
/// contract or token, falling back to the checksummed address.
pub fn display_name(address: &Address) -> String {
    if let Some(contract) = known_contract(address) {
        return contract.name.to_string();
    }
    if let Some(token) = known_token(address) {
        return token.name.to_string();
    }
    address.to_checksum(None)
}
