//! Token buyer
//!
//! Swaps treasury ETH into USDC so the payer can settle invoices. Large
//! buys escalate; BPs-named setters read back as percentages.

use alloy_primitives::U256;

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, param_uint, plain_transfer,
    tag_bps, tag_eth_amount, tag_token_amount,
};
use crate::types::{Category, InterpretedTransaction, Severity, TransactionContext};
use crate::fmt;

/// USDC buys above this raw amount get flagged for closer review.
fn elevated_usdc_threshold() -> U256 {
    U256::from(100_000u64) * U256::from(1_000_000u64)
}

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "buyETH",
        inputs: &[ParamAbi { name: "tokenAmount", ty: "uint256" }],
        description: "Sell treasury ETH for USDC at the oracle price",
    },
    FunctionAbi {
        name: "buyETH",
        inputs: &[
            ParamAbi { name: "tokenAmount", ty: "uint256" },
            ParamAbi { name: "to", ty: "address" },
            ParamAbi { name: "data", ty: "bytes" },
        ],
        description: "Sell treasury ETH for USDC with a callback receiver",
    },
    FunctionAbi {
        name: "setBotDiscountBPs",
        inputs: &[ParamAbi { name: "newBotDiscountBPs", ty: "uint16" }],
        description: "Discount offered to arbitrage bots",
    },
    FunctionAbi {
        name: "setBaselinePaymentTokenAmount",
        inputs: &[ParamAbi { name: "newBaselinePaymentTokenAmount", ty: "uint256" }],
        description: "USDC buffer the buyer tries to keep on hand",
    },
    FunctionAbi {
        name: "setPayer",
        inputs: &[ParamAbi { name: "newPayer", ty: "address" }],
        description: "Contract receiving the purchased USDC",
    },
    FunctionAbi {
        name: "setAdmin",
        inputs: &[ParamAbi { name: "newAdmin", ty: "address" }],
        description: "Change the token buyer admin",
    },
    FunctionAbi {
        name: "withdrawETH",
        inputs: &[
            ParamAbi { name: "to", ty: "address" },
            ParamAbi { name: "amount", ty: "uint256" },
        ],
        description: "Pull ETH back out of the buyer",
    },
    FunctionAbi {
        name: "pause",
        inputs: &[],
        description: "Pause ETH purchases",
    },
    FunctionAbi {
        name: "unpause",
        inputs: &[],
        description: "Resume ETH purchases",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenBuyerInterpreter;

impl TokenBuyerInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Token Buyer",
            description: "Swaps treasury ETH into USDC for payments",
            category: Category::Treasury,
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
            "buyETH" => {
                tag_token_amount(&mut call.params, "tokenAmount", 6, "USDC");
                let amount = param_uint(&call.params, "tokenAmount").unwrap_or_default();
                let severity = if amount > elevated_usdc_threshold() {
                    Severity::Elevated
                } else {
                    Severity::Normal
                };
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!(
                        "Swap treasury ETH for {}",
                        fmt::format_token_amount(amount, 6, "USDC")
                    ))
                    .severity(severity)
                    .call(call)
                    .build()
            }
            "setBotDiscountBPs" => {
                tag_bps(&mut call.params, "newBotDiscountBPs");
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the bot discount to {display}"))
                    .category(Category::Configuration)
                    .call(call)
                    .build()
            }
            "setBaselinePaymentTokenAmount" => {
                tag_token_amount(&mut call.params, "newBaselinePaymentTokenAmount", 6, "USDC");
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the USDC baseline buffer to {display}"))
                    .category(Category::Configuration)
                    .call(call)
                    .build()
            }
            "setPayer" => {
                let payer = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Point the token buyer at payer {payer}"))
                    .category(Category::Configuration)
                    .call(call)
                    .build()
            }
            "setAdmin" => {
                let admin = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the token buyer admin to {admin}"))
                    .category(Category::Ownership)
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "withdrawETH" => {
                tag_eth_amount(&mut call.params, "amount");
                let amount = param_uint(&call.params, "amount").unwrap_or_default();
                let to = call
                    .params
                    .iter()
                    .find(|p| p.name == "to")
                    .map(|p| p.display_value.clone())
                    .unwrap_or_default();
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!(
                        "Withdraw {} from the token buyer to {to}",
                        fmt::format_eth(amount)
                    ))
                    .category(Category::Payment)
                    .call(call)
                    .build()
            }
            "pause" => ResultBuilder::for_contract(ctx, info)
                .summary("Pause token buyer purchases")
                .severity(Severity::Elevated)
                .category(Category::Configuration)
                .call(call)
                .build(),
            "unpause" => ResultBuilder::for_contract(ctx, info)
                .summary("Resume token buyer purchases")
                .category(Category::Configuration)
                .call(call)
                .build(),
            // Any other BPs-named setter still reads back as a percentage.
            name if name.contains("BPs") => {
                let param = call.params.first().map(|p| p.name.clone()).unwrap_or_default();
                tag_bps(&mut call.params, &param);
                let display = first_display(&call);
                let summary = format!("Set `{name}` to {display}");
                ResultBuilder::for_contract(ctx, info)
                    .summary(summary)
                    .category(Category::Configuration)
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

fn first_display(call: &DecodedCall) -> String {
    call.params
        .first()
        .map(|p| p.display_value.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nouns;
    use crate::contracts::testutil::{Arg, call_ctx, usdc};
    use alloy_primitives::address;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buy_eth_below_threshold() {
        let ctx = call_ctx(
            nouns::TOKEN_BUYER,
            "buyETH(uint256)",
            &[Arg::U(usdc(50_000))],
        );
        let out = TokenBuyerInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Normal);
        assert_eq!(out.category, Category::Treasury);
        assert!(out.summary.contains("$50000.00"));
    }

    #[test]
    fn test_buy_eth_above_threshold_is_elevated() {
        let ctx = call_ctx(
            nouns::TOKEN_BUYER,
            "buyETH(uint256)",
            &[Arg::U(usdc(150_000))],
        );
        let out = TokenBuyerInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Elevated);
    }

    #[test]
    fn test_buy_eth_overload_with_receiver() {
        let to = address!("2121212121212121212121212121212121212121");
        // Static words only: the bytes tail is offset+length.
        let mut args = vec![Arg::U(usdc(200_000)), Arg::Addr(to)];
        args.push(Arg::U(alloy_primitives::U256::from(96u64))); // offset
        let mut calldata = crate::contracts::testutil::encode_call(
            "buyETH(uint256,address,bytes)",
            &args,
        );
        calldata.extend_from_slice(&alloy_primitives::U256::ZERO.to_be_bytes::<32>()); // length 0

        let ctx = TransactionContext::new(
            nouns::TOKEN_BUYER,
            alloy_primitives::U256::ZERO,
            "buyETH(uint256,address,bytes)",
            calldata,
        );
        let out = TokenBuyerInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Elevated);
        assert_eq!(out.parameters.len(), 3);
        // `to` is in the recipient name set.
        assert_eq!(out.addresses_to_resolve, vec![to]);
    }

    #[test]
    fn test_bot_discount_as_percentage() {
        let ctx = call_ctx(
            nouns::TOKEN_BUYER,
            "setBotDiscountBPs(uint16)",
            &[Arg::U(alloy_primitives::U256::from(50u64))],
        );
        let out = TokenBuyerInterpreter.interpret(&ctx);
        assert_eq!(out.summary, "Set the bot discount to 0.50%");
    }

    #[test]
    fn test_set_admin_critical() {
        let admin = address!("2323232323232323232323232323232323232323");
        let ctx = call_ctx(nouns::TOKEN_BUYER, "setAdmin(address)", &[Arg::Addr(admin)]);
        let out = TokenBuyerInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Critical);
        assert_eq!(out.category, Category::Ownership);
    }
}
