//! Payment stream factory
//!
//! `createStream` ships in several positional overloads; some lead with an
//! explicit payer, some with the recipient. The layout is sniffed from the
//! signature before indexing into the decoded parameters: when the second
//! parameter type starts with `uint` the recipient sits at index 0,
//! otherwise at index 1. When the sniff is inconclusive the five-parameter,
//! no-payer layout wins. Known fragility: a future overload whose second
//! parameter is a `uint` that is not the amount would be mis-sliced; the
//! heuristic is kept as-is deliberately.

use alloy_primitives::U256;

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, plain_transfer,
};
use crate::types::{
    Category, InterpretedParameter, InterpretedTransaction, ParamFormat, TransactionContext,
};
use crate::{fmt, nouns};

const SECONDS_PER_DAY: u64 = 86_400;

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "createStream",
        inputs: &[
            ParamAbi { name: "recipient", ty: "address" },
            ParamAbi { name: "tokenAmount", ty: "uint256" },
            ParamAbi { name: "tokenAddress", ty: "address" },
            ParamAbi { name: "startTime", ty: "uint256" },
            ParamAbi { name: "stopTime", ty: "uint256" },
        ],
        description: "Create a payment stream",
    },
    FunctionAbi {
        name: "createStream",
        inputs: &[
            ParamAbi { name: "payer", ty: "address" },
            ParamAbi { name: "recipient", ty: "address" },
            ParamAbi { name: "tokenAmount", ty: "uint256" },
            ParamAbi { name: "tokenAddress", ty: "address" },
            ParamAbi { name: "startTime", ty: "uint256" },
            ParamAbi { name: "stopTime", ty: "uint256" },
            ParamAbi { name: "nonce", ty: "uint8" },
        ],
        description: "Create a payment stream funded by an explicit payer",
    },
    FunctionAbi {
        name: "createStream",
        inputs: &[
            ParamAbi { name: "recipient", ty: "address" },
            ParamAbi { name: "tokenAmount", ty: "uint256" },
            ParamAbi { name: "tokenAddress", ty: "address" },
            ParamAbi { name: "startTime", ty: "uint256" },
            ParamAbi { name: "stopTime", ty: "uint256" },
            ParamAbi { name: "nonce", ty: "uint8" },
            ParamAbi { name: "predictedStreamAddress", ty: "address" },
        ],
        description: "Create a payment stream at a precomputed address",
    },
    FunctionAbi {
        name: "createAndFundStream",
        inputs: &[
            ParamAbi { name: "recipient", ty: "address" },
            ParamAbi { name: "tokenAmount", ty: "uint256" },
            ParamAbi { name: "tokenAddress", ty: "address" },
            ParamAbi { name: "startTime", ty: "uint256" },
            ParamAbi { name: "stopTime", ty: "uint256" },
        ],
        description: "Create a payment stream and fund it in the same call",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StreamFactoryInterpreter;

impl StreamFactoryInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Stream Factory",
            description: "Creates vesting payment streams funded by the treasury",
            category: Category::Stream,
        }
    }

    pub fn interpret(&self, ctx: &TransactionContext) -> InterpretedTransaction {
        let info = self.info();
        if ctx.is_plain_transfer() {
            return plain_transfer(ctx, &info);
        }
        match decode_call(SCHEMA, ctx) {
            Ok(call) => self.describe(ctx, call, &info),
            Err(_) => fallthrough(ctx, &info),
        }
    }

    fn describe(
        &self,
        ctx: &TransactionContext,
        mut call: DecodedCall,
        info: &ContractInfo,
    ) -> InterpretedTransaction {
        match call.sig.name.as_str() {
            "createStream" | "createAndFundStream" => {
                let layout = StreamLayout::sniff(&call.sig.inputs);
                let summary = describe_stream(&mut call.params, layout);
                ResultBuilder::for_contract(ctx, info)
                    .summary(summary)
                    .category(Category::Stream)
                    .call(call)
                    .build()
            }
            name => {
                let summary = format!("Execute `{}` on {}", name, info.name);
                ResultBuilder::for_contract(ctx, info)
                    .summary(summary)
                    .call(call)
                    .build()
            }
        }
    }
}

/// Positional layout of a `createStream` overload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StreamLayout {
    recipient: usize,
}

impl StreamLayout {
    /// A `uint` second parameter means the amount follows the recipient
    /// directly (no payer). Anything else, the payer leads.
    fn sniff(input_types: &[String]) -> Self {
        let payer_first = match input_types.get(1) {
            Some(ty) => !ty.starts_with("uint"),
            None => false,
        };
        Self {
            recipient: usize::from(payer_first),
        }
    }

    fn amount(&self) -> usize {
        self.recipient + 1
    }

    fn token(&self) -> usize {
        self.recipient + 2
    }

    fn start(&self) -> usize {
        self.recipient + 3
    }

    fn stop(&self) -> usize {
        self.recipient + 4
    }
}

fn describe_stream(params: &mut [InterpretedParameter], layout: StreamLayout) -> String {
    // Flag the recipient positionally; overload names may be absent when the
    // signature did not match a declared schema entry.
    let recipient_display = match params.get_mut(layout.recipient) {
        Some(p) if p.value.as_address().is_some() => {
            p.is_recipient = true;
            p.recipient_role = Some("Stream Recipient".to_string());
            p.display_value.clone()
        }
        _ => return "Create a payment stream".to_string(),
    };

    let token = params
        .get(layout.token())
        .and_then(|p| p.value.as_address())
        .as_ref()
        .and_then(nouns::known_token);
    let amount = params.get(layout.amount()).and_then(|p| p.value.as_uint());

    let amount_display = match (amount, token) {
        (Some(v), Some(t)) => {
            if let Some(p) = params.get_mut(layout.amount()) {
                p.display_value = fmt::format_token_amount(v, t.decimals, t.symbol);
                p.format = ParamFormat::Amount;
                p.decimals = Some(t.decimals);
                p.symbol = Some(t.symbol.to_string());
            }
            fmt::format_token_amount(v, t.decimals, t.symbol)
        }
        (Some(v), None) => format!("{v} tokens"),
        (None, _) => return format!("Create a payment stream to {recipient_display}"),
    };

    let start = params.get(layout.start()).and_then(|p| p.value.as_uint());
    let stop = params.get(layout.stop()).and_then(|p| p.value.as_uint());

    let mut summary = format!("Stream {amount_display} to {recipient_display}");
    if let (Some(start), Some(stop)) = (start, stop) {
        if stop > start {
            let duration = stop - start;
            let days = duration / U256::from(SECONDS_PER_DAY);
            if !days.is_zero() {
                let rate = amount.unwrap_or_default() / days;
                let rate_display = match token {
                    Some(t) => fmt::format_token_amount(rate, t.decimals, t.symbol),
                    None => format!("{rate} tokens"),
                };
                let days_display = if days == U256::from(1u64) {
                    "1 day".to_string()
                } else {
                    format!("{days} days")
                };
                summary.push_str(&format!(" over {days_display} ({rate_display} per day)"));
            }
        }
    }
    summary
}
