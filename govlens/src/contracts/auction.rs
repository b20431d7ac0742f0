//! Auction house
//!
//! Pausing stops the DAO's only revenue stream, so `pause` is critical.
//! Price and timing knobs stay at lower severities.

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, plain_transfer,
    tag_eth_amount, tag_seconds_as_duration,
};
use crate::types::{Category, InterpretedTransaction, ParamFormat, Severity, TransactionContext};

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "pause",
        inputs: &[],
        description: "Stop the daily auction",
    },
    FunctionAbi {
        name: "unpause",
        inputs: &[],
        description: "Resume the daily auction",
    },
    FunctionAbi {
        name: "settleCurrentAndCreateNewAuction",
        inputs: &[],
        description: "Settle the live auction and start the next one",
    },
    FunctionAbi {
        name: "settleAuction",
        inputs: &[],
        description: "Settle the live auction while paused",
    },
    FunctionAbi {
        name: "setReservePrice",
        inputs: &[ParamAbi { name: "reservePrice", ty: "uint192" }],
        description: "Minimum first bid, in wei",
    },
    FunctionAbi {
        name: "setTimeBuffer",
        inputs: &[ParamAbi { name: "timeBuffer", ty: "uint56" }],
        description: "Seconds a late bid extends the auction by",
    },
    FunctionAbi {
        name: "setMinBidIncrementPercentage",
        inputs: &[ParamAbi { name: "minBidIncrementPercentage", ty: "uint8" }],
        description: "Minimum outbid step, in whole percent",
    },
    FunctionAbi {
        name: "setSanctionsOracle",
        inputs: &[ParamAbi { name: "newSanctionsOracle", ty: "address" }],
        description: "Oracle consulted to block sanctioned bidders",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct AuctionHouseInterpreter;

impl AuctionHouseInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Nouns Auction House",
            description: "Runs the daily Noun auction",
            category: Category::Auction,
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
            "pause" => ResultBuilder::for_contract(ctx, info)
                .summary("Pause the daily auction")
                .severity(Severity::Critical)
                .call(call)
                .build(),
            "unpause" => ResultBuilder::for_contract(ctx, info)
                .summary("Resume the daily auction")
                .severity(Severity::Elevated)
                .call(call)
                .build(),
            "settleCurrentAndCreateNewAuction" => ResultBuilder::for_contract(ctx, info)
                .summary("Settle the current auction and start the next")
                .call(call)
                .build(),
            "settleAuction" => ResultBuilder::for_contract(ctx, info)
                .summary("Settle the current auction")
                .call(call)
                .build(),
            "setReservePrice" => {
                tag_eth_amount(&mut call.params, "reservePrice");
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the auction reserve price to {display}"))
                    .severity(Severity::Elevated)
                    .call(call)
                    .build()
            }
            "setTimeBuffer" => {
                tag_seconds_as_duration(&mut call.params, "timeBuffer");
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the auction time buffer to {display}"))
                    .call(call)
                    .build()
            }
            "setMinBidIncrementPercentage" => {
                if let Some(p) = call.params.first_mut() {
                    if let Some(v) = p.value.as_uint() {
                        p.display_value = format!("{v}%");
                    }
                    p.format = ParamFormat::Percentage;
                }
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the minimum bid increment to {display}"))
                    .call(call)
                    .build()
            }
            "setSanctionsOracle" => {
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the sanctions oracle to {display}"))
                    .severity(Severity::Elevated)
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
    use crate::contracts::testutil::{Arg, call_ctx};
    use alloy_primitives::{U256, address};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pause_is_critical() {
        let ctx = call_ctx(nouns::AUCTION_HOUSE, "pause()", &[]);
        let out = AuctionHouseInterpreter.interpret(&ctx);
        assert_eq!(out.category, Category::Auction);
        assert_eq!(out.severity, Severity::Critical);
        assert_eq!(out.summary, "Pause the daily auction");
    }

    #[test]
    fn test_unpause_is_elevated() {
        let ctx = call_ctx(nouns::AUCTION_HOUSE, "unpause()", &[]);
        let out = AuctionHouseInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Elevated);
    }

    #[test]
    fn test_reserve_price_in_eth() {
        let ctx = call_ctx(
            nouns::AUCTION_HOUSE,
            "setReservePrice(uint192)",
            &[Arg::U(U256::from(2_000_000_000_000_000_000u128))],
        );
        let out = AuctionHouseInterpreter.interpret(&ctx);
        assert_eq!(out.summary, "Set the auction reserve price to 2 ETH");
        assert_eq!(out.severity, Severity::Elevated);
    }

    #[test]
    fn test_time_buffer_as_duration() {
        let ctx = call_ctx(
            nouns::AUCTION_HOUSE,
            "setTimeBuffer(uint56)",
            &[Arg::U(U256::from(300u64))],
        );
        let out = AuctionHouseInterpreter.interpret(&ctx);
        assert_eq!(out.summary, "Set the auction time buffer to 5 minutes");
        assert_eq!(out.severity, Severity::Normal);
    }

    #[test]
    fn test_min_bid_increment_whole_percent() {
        let ctx = call_ctx(
            nouns::AUCTION_HOUSE,
            "setMinBidIncrementPercentage(uint8)",
            &[Arg::U(U256::from(5u64))],
        );
        let out = AuctionHouseInterpreter.interpret(&ctx);
        assert_eq!(out.summary, "Set the minimum bid increment to 5%");
        assert_eq!(out.parameters[0].format, ParamFormat::Percentage);
    }

    #[test]
    fn test_sanctions_oracle_elevated() {
        let oracle = address!("4545454545454545454545454545454545454545");
        let ctx = call_ctx(
            nouns::AUCTION_HOUSE,
            "setSanctionsOracle(address)",
            &[Arg::Addr(oracle)],
        );
        let out = AuctionHouseInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Elevated);
        assert!(out.addresses_to_resolve.is_empty());
    }
}
