//! Core data model for interpreted governance transactions
//!
//! Everything in this module is constructed once per `interpret` call and
//! never mutated afterwards. An [`InterpretedTransaction`] is a pure function
//! of its [`TransactionContext`] plus the static contract knowledge tables.

use alloy_primitives::{Address, Bytes, I256, U256};
use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// Raw on-chain transaction data as proposed to governance.
///
/// `signature` is the textual function signature (e.g.
/// `"sendETH(address,uint256)"`) and may be empty for plain ETH transfers.
/// `calldata` is the ABI-encoded payload, with or without the leading 4-byte
/// selector; the decoder normalizes before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionContext {
    pub target: Address,
    pub value: U256,
    pub signature: String,
    pub calldata: Bytes,
}

impl TransactionContext {
    pub fn new(
        target: Address,
        value: U256,
        signature: impl Into<String>,
        calldata: impl Into<Bytes>,
    ) -> Self {
        Self {
            target,
            value,
            signature: signature.into(),
            calldata: calldata.into(),
        }
    }

    /// Builds a context from the textual form used by proposal payloads:
    /// hex target, decimal (or 0x-prefixed) wei value, signature text, and
    /// hex calldata.
    pub fn from_raw(
        target: &str,
        value: &str,
        signature: &str,
        calldata: &str,
    ) -> Result<Self, ContextError> {
        let target: Address = target
            .parse()
            .map_err(|_| ContextError::InvalidAddress(target.to_string()))?;

        let value = if value.is_empty() {
            U256::ZERO
        } else {
            value
                .parse::<U256>()
                .map_err(|_| ContextError::InvalidValue(value.to_string()))?
        };

        let calldata = hex::decode(calldata.trim_start_matches("0x"))?;

        Ok(Self::new(target, value, signature, calldata))
    }

    /// A plain transfer carries value but no function call.
    pub fn is_plain_transfer(&self) -> bool {
        self.signature.is_empty() && !self.value.is_zero()
    }
}

/// A decoded parameter value in its native representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Address(Address),
    Uint(U256),
    Int(I256),
    Bool(bool),
    Bytes(Bytes),
    String(String),
    Array(Vec<ParamValue>),
}

impl ParamValue {
    pub fn as_address(&self) -> Option<Address> {
        match self {
            ParamValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            ParamValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Raw display form, before any domain-aware formatting is applied.
    pub fn to_display_string(&self) -> String {
        match self {
            ParamValue::Address(a) => a.to_checksum(None),
            ParamValue::Uint(v) => v.to_string(),
            ParamValue::Int(v) => v.to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Bytes(b) => format!("0x{}", hex::encode(b)),
            ParamValue::String(s) => s.clone(),
            ParamValue::Array(items) => {
                let inner: Vec<String> = items.iter().map(|v| v.to_display_string()).collect();
                format!("[{}]", inner.join(", "))
            }
        }
    }
}

/// Semantic display hint for a decoded parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamFormat {
    Address,
    Amount,
    Percentage,
    Duration,
    Text,
    Boolean,
    Bytes,
}

/// One decoded-and-annotated function parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: ParamValue,
    pub display_value: String,
    pub is_recipient: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_role: Option<String>,
    pub format: ParamFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Transaction classification used by the review UI for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Payment,
    Stream,
    Treasury,
    Governance,
    Auction,
    Token,
    Art,
    Rewards,
    Ownership,
    Upgrade,
    Configuration,
    Unknown,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Payment => "payment",
            Category::Stream => "stream",
            Category::Treasury => "treasury",
            Category::Governance => "governance",
            Category::Auction => "auction",
            Category::Token => "token",
            Category::Art => "art",
            Category::Rewards => "rewards",
            Category::Ownership => "ownership",
            Category::Upgrade => "upgrade",
            Category::Configuration => "configuration",
            Category::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Review-attention flag, independent of correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Elevated,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Normal => "normal",
            Severity::Elevated => "elevated",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// The structured, display-ready description of one governance transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedTransaction {
    pub target: Address,
    pub contract_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_description: Option<String>,
    pub is_known_contract: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    pub function_signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_description: Option<String>,

    pub value: U256,
    pub value_formatted: String,

    pub parameters: Vec<InterpretedParameter>,
    pub calldata: Bytes,

    pub summary: String,
    pub category: Category,
    pub severity: Severity,

    pub addresses_to_resolve: Vec<Address>,
}
