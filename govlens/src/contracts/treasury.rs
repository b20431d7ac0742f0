//! Treasury / timelock executor
//!
//! Payments out of the treasury plus the timelock's own admin surface.
//! Admin transfers and implementation upgrades are always critical; ETH
//! payments escalate above a review threshold.

use alloy_primitives::U256;

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, param_address, param_uint,
    plain_transfer, tag_eth_amount, tag_seconds_as_hours, tag_token_amount,
};
use crate::types::{Category, InterpretedTransaction, Severity, TransactionContext};
use crate::{fmt, nouns};

/// ETH payments above this many wei get flagged for closer review.
fn elevated_eth_threshold() -> U256 {
    U256::from(10u64) * U256::from(10u64).pow(U256::from(18u64))
}

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "sendETH",
        inputs: &[
            ParamAbi { name: "recipient", ty: "address" },
            ParamAbi { name: "ethToSend", ty: "uint256" },
        ],
        description: "Send ETH out of the treasury",
    },
    FunctionAbi {
        name: "sendERC20",
        inputs: &[
            ParamAbi { name: "recipient", ty: "address" },
            ParamAbi { name: "erc20Token", ty: "address" },
            ParamAbi { name: "tokensToSend", ty: "uint256" },
        ],
        description: "Send an ERC-20 token out of the treasury",
    },
    FunctionAbi {
        name: "setDelay",
        inputs: &[ParamAbi { name: "newDelay", ty: "uint256" }],
        description: "Change the timelock execution delay",
    },
    FunctionAbi {
        name: "setPendingAdmin",
        inputs: &[ParamAbi { name: "pendingAdmin", ty: "address" }],
        description: "Nominate a new treasury admin",
    },
    FunctionAbi {
        name: "acceptAdmin",
        inputs: &[],
        description: "Accept the pending treasury admin role",
    },
    FunctionAbi {
        name: "upgradeTo",
        inputs: &[ParamAbi { name: "newImplementation", ty: "address" }],
        description: "Upgrade the treasury proxy implementation",
    },
    FunctionAbi {
        name: "upgradeToAndCall",
        inputs: &[
            ParamAbi { name: "newImplementation", ty: "address" },
            ParamAbi { name: "data", ty: "bytes" },
        ],
        description: "Upgrade the treasury proxy implementation and call into it",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TreasuryInterpreter;

impl TreasuryInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Nouns Treasury",
            description: "Timelock executor holding the DAO's funds",
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
            "sendETH" => {
                tag_eth_amount(&mut call.params, "ethToSend");
                let amount = param_uint(&call.params, "ethToSend").unwrap_or_default();
                let recipient = display_of(&call, "recipient");
                let severity = if amount > elevated_eth_threshold() {
                    Severity::Elevated
                } else {
                    Severity::Normal
                };
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Send {} to {}", fmt::format_eth(amount), recipient))
                    .category(Category::Payment)
                    .severity(severity)
                    .call(call)
                    .build()
            }
            "sendERC20" => {
                let token = param_address(&call.params, "erc20Token");
                let known = token.as_ref().and_then(nouns::known_token);
                let amount = param_uint(&call.params, "tokensToSend").unwrap_or_default();
                let amount_display = match known {
                    Some(t) => {
                        tag_token_amount(&mut call.params, "tokensToSend", t.decimals, t.symbol);
                        fmt::format_token_amount(amount, t.decimals, t.symbol)
                    }
                    None => format!("{amount} tokens"),
                };
                let recipient = display_of(&call, "recipient");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Send {amount_display} to {recipient}"))
                    .category(Category::Payment)
                    .call(call)
                    .build()
            }
            "setDelay" => {
                tag_seconds_as_hours(&mut call.params, "newDelay");
                let delay = display_of(&call, "newDelay");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the timelock delay to {delay}"))
                    .category(Category::Configuration)
                    .call(call)
                    .build()
            }
            "setPendingAdmin" => {
                let admin = display_of(&call, "pendingAdmin");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Nominate {admin} as treasury admin"))
                    .category(Category::Ownership)
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "acceptAdmin" => ResultBuilder::for_contract(ctx, info)
                .summary("Accept the treasury admin role")
                .category(Category::Ownership)
                .severity(Severity::Critical)
                .call(call)
                .build(),
            "upgradeTo" | "upgradeToAndCall" => {
                let implementation = display_of(&call, "newImplementation");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Upgrade the treasury to {implementation}"))
                    .category(Category::Upgrade)
                    .severity(Severity::Critical)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::testutil::{Arg, call_ctx, encode_call, eth, usdc};
    use crate::types::ParamFormat;
    use alloy_primitives::address;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_send_eth_above_threshold_is_elevated() {
        let recipient = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let ctx = call_ctx(
            nouns::TREASURY,
            "sendETH(address,uint256)",
            &[Arg::Addr(recipient), Arg::U(eth(15))],
        );
        let out = TreasuryInterpreter.interpret(&ctx);

        assert_eq!(out.category, Category::Payment);
        assert_eq!(out.severity, Severity::Elevated);
        assert_eq!(out.summary, format!("Send 15 ETH to {}", recipient.to_checksum(None)));
        assert_eq!(out.addresses_to_resolve, vec![recipient]);
        assert_eq!(out.parameters[1].format, ParamFormat::Amount);
        assert_eq!(out.parameters[1].display_value, "15 ETH");
    }

    #[test]
    fn test_send_eth_at_threshold_is_normal() {
        let recipient = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let ctx = call_ctx(
            nouns::TREASURY,
            "sendETH(address,uint256)",
            &[Arg::Addr(recipient), Arg::U(eth(10))],
        );
        let out = TreasuryInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Normal);
    }

    #[test]
    fn test_send_erc20_formats_known_token() {
        let recipient = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        let ctx = call_ctx(
            nouns::TREASURY,
            "sendERC20(address,address,uint256)",
            &[
                Arg::Addr(recipient),
                Arg::Addr(nouns::USDC),
                Arg::U(usdc(2500)),
            ],
        );
        let out = TreasuryInterpreter.interpret(&ctx);

        assert_eq!(out.category, Category::Payment);
        assert!(out.summary.starts_with("Send $2500.00 to "));
        assert_eq!(out.parameters[2].symbol.as_deref(), Some("USDC"));
        // The token contract itself is known and never needs resolution.
        assert_eq!(out.addresses_to_resolve, vec![recipient]);
    }

    #[test]
    fn test_set_delay_shows_hours() {
        let ctx = call_ctx(
            nouns::TREASURY,
            "setDelay(uint256)",
            &[Arg::U(alloy_primitives::U256::from(172_800u64))],
        );
        let out = TreasuryInterpreter.interpret(&ctx);
        assert_eq!(out.summary, "Set the timelock delay to 48 hours");
        assert_eq!(out.parameters[0].format, ParamFormat::Duration);
        assert_eq!(out.category, Category::Configuration);
    }

    #[test]
    fn test_upgrade_is_critical() {
        let implementation = address!("cccccccccccccccccccccccccccccccccccccccc");
        let ctx = call_ctx(
            nouns::TREASURY,
            "upgradeTo(address)",
            &[Arg::Addr(implementation)],
        );
        let out = TreasuryInterpreter.interpret(&ctx);
        assert_eq!(out.category, Category::Upgrade);
        assert_eq!(out.severity, Severity::Critical);
        // Implementation addresses are not payment recipients.
        assert!(out.addresses_to_resolve.is_empty());
    }

    #[test]
    fn test_admin_transfer_is_critical() {
        let admin = address!("dddddddddddddddddddddddddddddddddddddddd");
        let ctx = call_ctx(
            nouns::TREASURY,
            "setPendingAdmin(address)",
            &[Arg::Addr(admin)],
        );
        let out = TreasuryInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Critical);
        assert_eq!(out.category, Category::Ownership);
    }

    #[test]
    fn test_plain_eth_transfer_into_treasury() {
        let ctx = TransactionContext::new(nouns::TREASURY, eth(1), "", vec![]);
        let out = TreasuryInterpreter.interpret(&ctx);
        assert_eq!(out.category, Category::Payment);
        assert_eq!(out.summary, "Transfer 1 ETH to Nouns Treasury");
        // The treasury is a known contract; nothing to resolve.
        assert!(out.addresses_to_resolve.is_empty());
    }

    #[test]
    fn test_unscheduled_function_falls_through() {
        let ctx = call_ctx(
            nouns::TREASURY,
            "queueTransaction(address,uint256)",
            &[
                Arg::Addr(address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee")),
                Arg::U(alloy_primitives::U256::from(1u64)),
            ],
        );
        let out = TreasuryInterpreter.interpret(&ctx);
        assert!(out.summary.contains("Execute `queueTransaction`"));
        assert_eq!(out.parameters.len(), 2);
    }

    #[test]
    fn test_malformed_calldata_degrades() {
        let mut calldata = encode_call("sendETH(address,uint256)", &[]);
        calldata.extend_from_slice(&[0xff; 7]); // ragged tail
        let ctx = TransactionContext::new(
            nouns::TREASURY,
            alloy_primitives::U256::ZERO,
            "sendETH(address,uint256)",
            calldata,
        );
        let out = TreasuryInterpreter.interpret(&ctx);
        assert_eq!(out.category, Category::Unknown);
        assert!(out.parameters.is_empty());
        assert_eq!(out.severity, Severity::Normal);
    }
}
