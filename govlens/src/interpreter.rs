//! Shared interpreter capability
//!
//! Every contract-specific interpreter builds on the same mechanics: an
//! ownership check against its fixed address, a decode-and-enrich pipeline,
//! and a result builder. Decode failures never escape an interpreter; they
//! degrade to the per-contract generic handler, which itself cannot fail.

use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, U256};

use crate::abi::{self, FunctionAbi, FunctionSig};
use crate::contracts::{
    AuctionHouseInterpreter, DaoAdminInterpreter, DescriptorInterpreter, GenericInterpreter,
    PayerInterpreter, RewardsInterpreter, StreamFactoryInterpreter, TokenBuyerInterpreter,
    TokenInterpreter, TreasuryInterpreter,
};
use crate::enrich::enrich_parameters;
use crate::error::DecodeError;
use crate::types::{
    Category, InterpretedParameter, InterpretedTransaction, ParamFormat, Severity,
    TransactionContext,
};
use crate::{fmt, nouns};

/// Static identity of a contract-specific interpreter. The owning address
/// lives on the [`Interpreter`] enum, which is what dispatch keys on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContractInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
}

/// A successfully decoded-and-enriched function call.
#[derive(Debug, Clone)]
pub(crate) struct DecodedCall {
    pub sig: FunctionSig,
    pub abi: Option<&'static FunctionAbi>,
    pub params: Vec<InterpretedParameter>,
}

/// Decodes against the contract's declared schema.
pub(crate) fn decode_call(
    schema: &'static [FunctionAbi],
    ctx: &TransactionContext,
) -> Result<DecodedCall, DecodeError> {
    let sig = FunctionSig::parse(&ctx.signature)?;
    let abi = abi::select_overload(schema, &sig)
        .ok_or_else(|| DecodeError::UnknownFunction(sig.name.clone()))?;
    let values = abi::decode_params(&sig, &ctx.calldata)?;
    let names: Vec<String> = abi.inputs.iter().map(|p| p.name.to_string()).collect();
    let params = enrich_parameters(&sig, &names, values);
    Ok(DecodedCall {
        sig,
        abi: Some(abi),
        params,
    })
}

/// Decodes from the signature alone, without any schema knowledge.
pub(crate) fn decode_call_signature_only(
    ctx: &TransactionContext,
) -> Result<DecodedCall, DecodeError> {
    let sig = FunctionSig::parse(&ctx.signature)?;
    let values = abi::decode_params(&sig, &ctx.calldata)?;
    let params = enrich_parameters(&sig, &[], values);
    Ok(DecodedCall {
        sig,
        abi: None,
        params,
    })
}

/// Assembles an [`InterpretedTransaction`], deriving `value_formatted` and
/// `addresses_to_resolve` from the pieces handed to it.
pub(crate) struct ResultBuilder<'a> {
    ctx: &'a TransactionContext,
    contract_name: String,
    contract_description: Option<String>,
    is_known_contract: bool,
    function_name: Option<String>,
    function_description: Option<String>,
    params: Vec<InterpretedParameter>,
    summary: String,
    category: Category,
    severity: Severity,
}

impl<'a> ResultBuilder<'a> {
    pub fn for_contract(ctx: &'a TransactionContext, info: &ContractInfo) -> Self {
        Self {
            ctx,
            contract_name: info.name.to_string(),
            contract_description: Some(info.description.to_string()),
            is_known_contract: true,
            function_name: None,
            function_description: None,
            params: Vec::new(),
            summary: String::new(),
            category: info.category,
            severity: Severity::Normal,
        }
    }

    pub fn external(ctx: &'a TransactionContext, name: impl Into<String>, known: bool) -> Self {
        Self {
            ctx,
            contract_name: name.into(),
            contract_description: None,
            is_known_contract: known,
            function_name: None,
            function_description: None,
            params: Vec::new(),
            summary: String::new(),
            category: Category::Unknown,
            severity: Severity::Normal,
        }
    }

    pub fn call(mut self, call: DecodedCall) -> Self {
        self.function_name = Some(call.sig.name.clone());
        self.function_description = call.abi.map(|f| f.description.to_string());
        self.params = call.params;
        self
    }

    pub fn function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    pub fn params(mut self, params: Vec<InterpretedParameter>) -> Self {
        self.params = params;
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn build(self) -> InterpretedTransaction {
        let mut addresses: Vec<Address> = Vec::new();
        let mut push = |addr: Address| {
            let named =
                nouns::known_contract(&addr).is_some() || nouns::known_token(&addr).is_some();
            if !named && !addresses.contains(&addr) {
                addresses.push(addr);
            }
        };
        for param in &self.params {
            if param.is_recipient {
                if let Some(addr) = param.value.as_address() {
                    push(addr);
                }
            }
        }
        if self.ctx.is_plain_transfer() {
            push(self.ctx.target);
        }

        InterpretedTransaction {
            target: self.ctx.target,
            contract_name: self.contract_name,
            contract_description: self.contract_description,
            is_known_contract: self.is_known_contract,
            function_name: self.function_name,
            function_signature: self.ctx.signature.clone(),
            function_description: self.function_description,
            value: self.ctx.value,
            value_formatted: fmt::format_eth(self.ctx.value),
            parameters: self.params,
            calldata: self.ctx.calldata.clone(),
            summary: self.summary,
            category: self.category,
            severity: self.severity,
            addresses_to_resolve: addresses,
        }
    }
}

/// Direct ETH transfer into a known contract.
pub(crate) fn plain_transfer(ctx: &TransactionContext, info: &ContractInfo) -> InterpretedTransaction {
    ResultBuilder::for_contract(ctx, info)
        .summary(format!(
            "Transfer {} to {}",
            fmt::format_eth(ctx.value),
            info.name
        ))
        .category(Category::Payment)
        .build()
}

/// Per-interpreter generic handler: attempts a schema-free decode and falls
/// back to an "Unknown function" result when even that fails.
pub(crate) fn fallthrough(ctx: &TransactionContext, info: &ContractInfo) -> InterpretedTransaction {
    match decode_call_signature_only(ctx) {
        Ok(call) => {
            let summary = format!("Execute `{}` on {}", call.sig.name, info.name);
            ResultBuilder::for_contract(ctx, info)
                .call(call)
                .summary(summary)
                .build()
        }
        Err(err) => {
            tracing::debug!(contract = %ctx.target, signature = %ctx.signature, %err, "degrading to unknown-function result");
            unknown_function(ctx, info)
        }
    }
}

/// The worst-case result: well-formed, empty parameters, unknown category.
pub(crate) fn unknown_function(
    ctx: &TransactionContext,
    info: &ContractInfo,
) -> InterpretedTransaction {
    let name = ctx
        .signature
        .split('(')
        .next()
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    let summary = match &name {
        Some(n) => format!("Unknown function `{}` on {}", n, info.name),
        None => format!("Unknown call to {}", info.name),
    };
    let mut builder = ResultBuilder::for_contract(ctx, info)
        .summary(summary)
        .category(Category::Unknown)
        .severity(Severity::Normal);
    if let Some(n) = name {
        builder = builder.function_name(n);
    }
    builder.build()
}

// Helpers the contract-specific handlers use to re-tag decoded parameters
// with domain formatting.

pub(crate) fn param_uint(params: &[InterpretedParameter], name: &str) -> Option<U256> {
    params.iter().find(|p| p.name == name)?.value.as_uint()
}

pub(crate) fn param_address(params: &[InterpretedParameter], name: &str) -> Option<Address> {
    params.iter().find(|p| p.name == name)?.value.as_address()
}

fn find_param<'p>(
    params: &'p mut [InterpretedParameter],
    name: &str,
) -> Option<&'p mut InterpretedParameter> {
    params.iter_mut().find(|p| p.name == name)
}

/// Flags a parameter as a recipient when the naming rules alone would miss
/// it (e.g. `operator` on approval functions).
pub(crate) fn mark_recipient(params: &mut [InterpretedParameter], name: &str, role: &str) {
    if let Some(p) = find_param(params, name) {
        if p.value.as_address().is_some() {
            p.is_recipient = true;
            p.recipient_role = Some(role.to_string());
        }
    }
}

/// Tags a uint parameter as an ETH amount in wei.
pub(crate) fn tag_eth_amount(params: &mut [InterpretedParameter], name: &str) {
    if let Some(p) = find_param(params, name) {
        if let Some(v) = p.value.as_uint() {
            p.display_value = fmt::format_eth(v);
        }
        p.format = ParamFormat::Amount;
        p.decimals = Some(18);
        p.symbol = Some("ETH".to_string());
    }
}

/// Tags a uint parameter as a token amount with the given scale.
pub(crate) fn tag_token_amount(
    params: &mut [InterpretedParameter],
    name: &str,
    decimals: u8,
    symbol: &str,
) {
    if let Some(p) = find_param(params, name) {
        if let Some(v) = p.value.as_uint() {
            p.display_value = fmt::format_token_amount(v, decimals, symbol);
        }
        p.format = ParamFormat::Amount;
        p.decimals = Some(decimals);
        p.symbol = Some(symbol.to_string());
    }
}

/// Tags a basis-point parameter as a percentage.
pub(crate) fn tag_bps(params: &mut [InterpretedParameter], name: &str) {
    if let Some(p) = find_param(params, name) {
        if let Some(v) = p.value.as_uint() {
            p.display_value = fmt::format_bps(v);
        }
        p.format = ParamFormat::Percentage;
    }
}

/// Tags a block-count parameter as an approximate duration.
pub(crate) fn tag_blocks(params: &mut [InterpretedParameter], name: &str) {
    if let Some(p) = find_param(params, name) {
        if let Some(v) = p.value.as_uint() {
            p.display_value = fmt::format_blocks_as_duration(v);
        }
        p.format = ParamFormat::Duration;
    }
}

/// Tags a seconds parameter, shown in hours.
pub(crate) fn tag_seconds_as_hours(params: &mut [InterpretedParameter], name: &str) {
    if let Some(p) = find_param(params, name) {
        if let Some(v) = p.value.as_uint() {
            p.display_value = fmt::format_seconds_as_hours(v);
        }
        p.format = ParamFormat::Duration;
    }
}

/// Tags a seconds parameter, shown as days/hours/minutes.
pub(crate) fn tag_seconds_as_duration(params: &mut [InterpretedParameter], name: &str) {
    if let Some(p) = find_param(params, name) {
        if let Some(v) = p.value.as_uint() {
            if v <= U256::from(u64::MAX) {
                p.display_value = fmt::format_duration_secs(v.to::<u64>());
            }
        }
        p.format = ParamFormat::Duration;
    }
}

/// One interpreter per known governance contract, plus the open default.
///
/// The closed set keeps dispatch explicit: adding a contract means adding a
/// variant, an interpreter module, and a registry entry.
#[derive(Debug, Clone)]
pub enum Interpreter {
    Treasury(TreasuryInterpreter),
    DaoAdmin(DaoAdminInterpreter),
    AuctionHouse(AuctionHouseInterpreter),
    Token(TokenInterpreter),
    Descriptor(DescriptorInterpreter),
    StreamFactory(StreamFactoryInterpreter),
    TokenBuyer(TokenBuyerInterpreter),
    Payer(PayerInterpreter),
    Rewards(RewardsInterpreter),
    Generic(GenericInterpreter),
}

impl Interpreter {
    /// The fixed contract address this interpreter owns, if any.
    pub fn address(&self) -> Option<Address> {
        match self {
            Interpreter::Treasury(_) => Some(nouns::TREASURY),
            Interpreter::DaoAdmin(_) => Some(nouns::DAO_PROXY),
            Interpreter::AuctionHouse(_) => Some(nouns::AUCTION_HOUSE),
            Interpreter::Token(_) => Some(nouns::TOKEN),
            Interpreter::Descriptor(_) => Some(nouns::DESCRIPTOR),
            Interpreter::StreamFactory(_) => Some(nouns::STREAM_FACTORY),
            Interpreter::TokenBuyer(_) => Some(nouns::TOKEN_BUYER),
            Interpreter::Payer(_) => Some(nouns::PAYER),
            Interpreter::Rewards(_) => Some(nouns::CLIENT_REWARDS),
            Interpreter::Generic(_) => None,
        }
    }

    /// True when this interpreter owns the context's target address.
    pub fn can_handle(&self, ctx: &TransactionContext) -> bool {
        match self.address() {
            Some(addr) => addr == ctx.target,
            None => true,
        }
    }

    pub fn interpret(&self, ctx: &TransactionContext) -> InterpretedTransaction {
        self.interpret_with_abi(ctx, None)
    }

    /// Like [`Interpreter::interpret`], with a caller-supplied ABI for the
    /// generic path. Contract-specific interpreters ignore the ABI; their
    /// schemas are built in.
    pub fn interpret_with_abi(
        &self,
        ctx: &TransactionContext,
        target_abi: Option<&JsonAbi>,
    ) -> InterpretedTransaction {
        match self {
            Interpreter::Treasury(i) => i.interpret(ctx),
            Interpreter::DaoAdmin(i) => i.interpret(ctx),
            Interpreter::AuctionHouse(i) => i.interpret(ctx),
            Interpreter::Token(i) => i.interpret(ctx),
            Interpreter::Descriptor(i) => i.interpret(ctx),
            Interpreter::StreamFactory(i) => i.interpret(ctx),
            Interpreter::TokenBuyer(i) => i.interpret(ctx),
            Interpreter::Payer(i) => i.interpret(ctx),
            Interpreter::Rewards(i) => i.interpret(ctx),
            Interpreter::Generic(i) => i.interpret(ctx, target_abi),
        }
    }

    /// The addresses a full interpretation would flag for name resolution.
    pub fn extract_addresses(&self, ctx: &TransactionContext) -> Vec<Address> {
        self.interpret(ctx).addresses_to_resolve
    }
}
