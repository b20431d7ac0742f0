//! Generic fallback interpreter
//!
//! Handles every target without a dedicated interpreter. Decision ladder,
//! in order:
//!
//! 1. no signature + nonzero value: a direct ETH transfer
//! 2. recognized external token (WETH, USDC) calling `deposit`, `withdraw`,
//!    `transfer`, or `approve`: fixed-offset hex slicing, no ABI needed
//! 3. caller-supplied ABI for the target: generic decode, first address
//!    parameter assumed to be the recipient
//! 4. raw decoders for `setApprovalForAll(address,bool)` and ENS
//!    `setName(address,string,string,bytes32)`, independent of any ABI
//! 5. unconditional raw fallback with no decoded parameters

use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, U256};

use crate::abi::FunctionSig;
use crate::calldata::WordReader;
use crate::enrich::enrich_parameters;
use crate::interpreter::ResultBuilder;
use crate::nouns::{self, KnownToken};
use crate::types::{
    Category, InterpretedParameter, InterpretedTransaction, ParamFormat, ParamValue,
    TransactionContext,
};
use crate::{abi, fmt};

/// Interpreter for targets outside the fixed governance set.
#[derive(Debug, Clone, Default)]
pub struct GenericInterpreter {
    contract_name: Option<String>,
}

impl GenericInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the display name, used when an external address registry
    /// recognizes the target without a dedicated interpreter existing.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            contract_name: Some(name.into()),
        }
    }

    fn label(&self, ctx: &TransactionContext) -> (String, bool) {
        if let Some(name) = &self.contract_name {
            return (name.clone(), true);
        }
        if let Some(contract) = nouns::known_contract(&ctx.target) {
            return (contract.name.to_string(), true);
        }
        if let Some(token) = nouns::known_token(&ctx.target) {
            return (token.name.to_string(), true);
        }
        ("External Contract".to_string(), false)
    }

    pub fn interpret(
        &self,
        ctx: &TransactionContext,
        target_abi: Option<&JsonAbi>,
    ) -> InterpretedTransaction {
        if ctx.is_plain_transfer() {
            return self.plain_transfer(ctx);
        }
        if let Some(token) = nouns::known_token(&ctx.target) {
            if let Some(result) = self.interpret_token_call(ctx, token) {
                return result;
            }
        }
        if let Some(abi) = target_abi {
            if let Some(result) = self.interpret_with_supplied_abi(ctx, abi) {
                return result;
            }
        }
        if let Some(result) = self.interpret_raw_special(ctx) {
            return result;
        }
        self.raw_fallback(ctx)
    }

    fn plain_transfer(&self, ctx: &TransactionContext) -> InterpretedTransaction {
        let (label, known) = self.label(ctx);
        let destination = if known {
            label.clone()
        } else {
            ctx.target.to_checksum(None)
        };
        ResultBuilder::external(ctx, label, known)
            .summary(format!(
                "Transfer {} to {destination}",
                fmt::format_eth(ctx.value)
            ))
            .category(Category::Payment)
            .build()
    }

    /// Rung 2: well-known token functions sliced straight out of calldata.
    fn interpret_token_call(
        &self,
        ctx: &TransactionContext,
        token: &KnownToken,
    ) -> Option<InterpretedTransaction> {
        let sig = FunctionSig::parse(&ctx.signature).ok()?;
        let reader = WordReader::after_selector(&ctx.calldata);
        let (label, _) = self.label(ctx);

        match sig.name.as_str() {
            "deposit" => Some(
                ResultBuilder::external(ctx, label, true)
                    .function_name("deposit")
                    .summary(format!(
                        "Deposit {} into {}",
                        fmt::format_eth(ctx.value),
                        token.symbol
                    ))
                    .category(Category::Payment)
                    .build(),
            ),
            "withdraw" => {
                let amount = reader.uint(0)?;
                let params = vec![amount_param(
                    "wad",
                    "uint256",
                    amount,
                    token,
                )];
                Some(
                    ResultBuilder::external(ctx, label, true)
                        .function_name("withdraw")
                        .params(params)
                        .summary(format!(
                            "Withdraw {} from {}",
                            fmt::format_token_amount(amount, token.decimals, token.symbol),
                            token.symbol
                        ))
                        .category(Category::Payment)
                        .build(),
                )
            }
            "transfer" => {
                let to = reader.address(0)?;
                let amount = reader.uint(1)?;
                let role = if is_stream_funding_target(&to) {
                    "Stream Funding"
                } else {
                    "Payment Recipient"
                };
                let params = vec![
                    recipient_param("to", to, role),
                    amount_param("amount", "uint256", amount, token),
                ];
                Some(
                    ResultBuilder::external(ctx, label, true)
                        .function_name("transfer")
                        .params(params)
                        .summary(format!(
                            "Transfer {} to {}",
                            fmt::format_token_amount(amount, token.decimals, token.symbol),
                            nouns::display_name(&to)
                        ))
                        .category(Category::Payment)
                        .build(),
                )
            }
            "approve" => {
                let spender = reader.address(0)?;
                let amount = reader.uint(1)?;
                let amount_display = if amount == U256::MAX {
                    "an unlimited amount".to_string()
                } else {
                    fmt::format_token_amount(amount, token.decimals, token.symbol)
                };
                let mut amount_p = amount_param("amount", "uint256", amount, token);
                if amount == U256::MAX {
                    amount_p.display_value = "unlimited".to_string();
                }
                let params = vec![
                    recipient_param("spender", spender, "Approved Spender"),
                    amount_p,
                ];
                Some(
                    ResultBuilder::external(ctx, label, true)
                        .function_name("approve")
                        .params(params)
                        .summary(format!(
                            "Approve {} to spend {amount_display} of {}",
                            nouns::display_name(&spender),
                            token.symbol
                        ))
                        .category(Category::Token)
                        .build(),
                )
            }
            _ => None,
        }
    }

    /// Rung 3: a schema handed in by the caller.
    fn interpret_with_supplied_abi(
        &self,
        ctx: &TransactionContext,
        target_abi: &JsonAbi,
    ) -> Option<InterpretedTransaction> {
        let sig = FunctionSig::parse(&ctx.signature).ok()?;
        let overloads = target_abi.function(&sig.name)?;
        let function = overloads
            .iter()
            .find(|f| f.inputs.len() == sig.inputs.len())
            .or_else(|| overloads.first())?;

        let values = abi::decode_params(&sig, &ctx.calldata).ok()?;
        let names: Vec<String> = function.inputs.iter().map(|p| p.name.clone()).collect();
        let mut params = enrich_parameters(&sig, &names, values);

        // With no contract knowledge, assume the first address parameter is
        // the recipient.
        if !params.iter().any(|p| p.is_recipient) {
            if let Some(p) = params
                .iter_mut()
                .find(|p| p.value.as_address().is_some())
            {
                p.is_recipient = true;
                p.recipient_role = Some("Recipient".to_string());
            }
        }

        let (label, known) = self.label(ctx);
        let summary = format!("Execute `{}` on {label}", sig.name);
        Some(
            ResultBuilder::external(ctx, label, known)
                .function_name(sig.name.clone())
                .params(params)
                .summary(summary)
                .build(),
        )
    }

    /// Rung 4: fixed decoders that work without any ABI at all.
    fn interpret_raw_special(&self, ctx: &TransactionContext) -> Option<InterpretedTransaction> {
        let reader = WordReader::after_selector(&ctx.calldata);
        let (label, known) = self.label(ctx);

        match ctx.signature.as_str() {
            "setApprovalForAll(address,bool)" => {
                let operator = reader.address(0)?;
                let approved = reader.boolean(1)?;
                let verb = if approved { "Grant" } else { "Revoke" };
                let params = vec![
                    recipient_param("operator", operator, "Approved Operator"),
                    InterpretedParameter {
                        name: "approved".to_string(),
                        ty: "bool".to_string(),
                        value: ParamValue::Bool(approved),
                        display_value: approved.to_string(),
                        is_recipient: false,
                        recipient_role: None,
                        format: ParamFormat::Boolean,
                        decimals: None,
                        symbol: None,
                    },
                ];
                Some(
                    ResultBuilder::external(ctx, label, known)
                        .function_name("setApprovalForAll")
                        .params(params)
                        .summary(format!(
                            "{verb} {} operator rights over all tokens",
                            nouns::display_name(&operator)
                        ))
                        .category(Category::Token)
                        .build(),
                )
            }
            "setName(address,string,string,bytes32)" => {
                let addr = reader.address(0)?;
                let name = reader.dynamic_string(1)?;
                let key = reader.dynamic_string(2)?;
                let node = reader.word(3)?;
                let params = vec![
                    InterpretedParameter {
                        name: "addr".to_string(),
                        ty: "address".to_string(),
                        value: ParamValue::Address(addr),
                        display_value: nouns::display_name(&addr),
                        is_recipient: false,
                        recipient_role: None,
                        format: ParamFormat::Address,
                        decimals: None,
                        symbol: None,
                    },
                    text_param("name", name.clone()),
                    text_param("key", key),
                    InterpretedParameter {
                        name: "node".to_string(),
                        ty: "bytes32".to_string(),
                        value: ParamValue::Bytes(node.to_vec().into()),
                        display_value: format!("0x{}", hex::encode(node)),
                        is_recipient: false,
                        recipient_role: None,
                        format: ParamFormat::Bytes,
                        decimals: None,
                        symbol: None,
                    },
                ];
                Some(
                    ResultBuilder::external(ctx, label, known)
                        .function_name("setName")
                        .params(params)
                        .summary(format!("Set the ENS name to \"{name}\""))
                        .category(Category::Configuration)
                        .build(),
                )
            }
            _ => None,
        }
    }

    /// Rung 5: always succeeds.
    fn raw_fallback(&self, ctx: &TransactionContext) -> InterpretedTransaction {
        let (label, known) = self.label(ctx);
        let name = ctx
            .signature
            .split('(')
            .next()
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let summary = match &name {
            Some(n) => format!("Execute `{n}` on {label}"),
            None => format!("Call {label}"),
        };
        let mut builder = ResultBuilder::external(ctx, label, known)
            .summary(summary)
            .category(Category::Unknown);
        if let Some(n) = name {
            builder = builder.function_name(n);
        }
        builder.build()
    }
}

/// Extension point: a transfer recipient that is a predicted stream address
/// would be funding, not payment. Prediction is not wired up yet, so this is
/// always false.
fn is_stream_funding_target(_recipient: &Address) -> bool {
    false
}

fn recipient_param(name: &str, addr: Address, role: &str) -> InterpretedParameter {
    InterpretedParameter {
        name: name.to_string(),
        ty: "address".to_string(),
        value: ParamValue::Address(addr),
        display_value: nouns::display_name(&addr),
        is_recipient: true,
        recipient_role: Some(role.to_string()),
        format: ParamFormat::Address,
        decimals: None,
        symbol: None,
    }
}

fn amount_param(name: &str, ty: &str, amount: U256, token: &KnownToken) -> InterpretedParameter {
    InterpretedParameter {
        name: name.to_string(),
        ty: ty.to_string(),
        value: ParamValue::Uint(amount),
        display_value: fmt::format_token_amount(amount, token.decimals, token.symbol),
        is_recipient: false,
        recipient_role: None,
        format: ParamFormat::Amount,
        decimals: Some(token.decimals),
        symbol: Some(token.symbol.to_string()),
    }
}

fn text_param(name: &str, value: String) -> InterpretedParameter {
    InterpretedParameter {
        name: name.to_string(),
        ty: "string".to_string(),
        value: ParamValue::String(value.clone()),
        display_value: value,
        is_recipient: false,
        recipient_role: None,
        format: ParamFormat::Text,
        decimals: None,
        symbol: None,
    }
}
