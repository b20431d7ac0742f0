//! Payer
//!
//! Settles USDC invoices out of the buyer's balance, registering debt when
//! the balance falls short. Large payments escalate.

use alloy_primitives::U256;

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, param_uint, plain_transfer,
    tag_token_amount,
};
use crate::types::{Category, InterpretedTransaction, Severity, TransactionContext};
use crate::fmt;

/// USDC payments above this raw amount get flagged for closer review.
fn elevated_usdc_threshold() -> U256 {
    U256::from(50_000u64) * U256::from(1_000_000u64)
}

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "sendOrRegisterDebt",
        inputs: &[
            ParamAbi { name: "account", ty: "address" },
            ParamAbi { name: "amount", ty: "uint256" },
        ],
        description: "Pay USDC now, or register the shortfall as debt",
    },
    FunctionAbi {
        name: "withdrawPaymentToken",
        inputs: &[
            ParamAbi { name: "to", ty: "address" },
            ParamAbi { name: "amount", ty: "uint256" },
        ],
        description: "Pull unspent USDC back out of the payer",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PayerInterpreter;

impl PayerInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Payer",
            description: "Pays USDC invoices and registers debt when short",
            category: Category::Payment,
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
            "sendOrRegisterDebt" => {
                tag_token_amount(&mut call.params, "amount", 6, "USDC");
                let amount = param_uint(&call.params, "amount").unwrap_or_default();
                let account = display_of(&call, "account");
                let severity = if amount > elevated_usdc_threshold() {
                    Severity::Elevated
                } else {
                    Severity::Normal
                };
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!(
                        "Pay {} to {account}, registering debt if short",
                        fmt::format_token_amount(amount, 6, "USDC")
                    ))
                    .category(Category::Payment)
                    .severity(severity)
                    .call(call)
                    .build()
            }
            "withdrawPaymentToken" => {
                tag_token_amount(&mut call.params, "amount", 6, "USDC");
                let amount = param_uint(&call.params, "amount").unwrap_or_default();
                let to = display_of(&call, "to");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!(
                        "Withdraw {} from the payer to {to}",
                        fmt::format_token_amount(amount, 6, "USDC")
                    ))
                    .category(Category::Payment)
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

fn display_of(call: &DecodedCall, name: &str) -> String {
    call.params
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.display_value.clone())
        .unwrap_or_else(|| name.to_string())
}
