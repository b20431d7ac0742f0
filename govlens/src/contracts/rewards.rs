//! Client rewards
//!
//! Incentive payouts to client apps. Balance withdrawals name a recipient;
//! ownership and upgrade moves are critical like everywhere else.

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, param_uint, plain_transfer,
    tag_token_amount,
};
use crate::types::{Category, InterpretedTransaction, Severity, TransactionContext};

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "registerClient",
        inputs: &[
            ParamAbi { name: "name", ty: "string" },
            ParamAbi { name: "description", ty: "string" },
        ],
        description: "Register a client app for rewards",
    },
    FunctionAbi {
        name: "updateRewardsForProposalWritingAndVoting",
        inputs: &[
            ParamAbi { name: "lastProposalId", ty: "uint32" },
            ParamAbi { name: "votingClientIds", ty: "uint32[]" },
        ],
        description: "Accrue rewards for proposal and voting activity",
    },
    FunctionAbi {
        name: "updateRewardsForAuctions",
        inputs: &[ParamAbi { name: "lastNounId", ty: "uint256" }],
        description: "Accrue rewards for auction bids",
    },
    FunctionAbi {
        name: "setClientApproval",
        inputs: &[
            ParamAbi { name: "clientId", ty: "uint32" },
            ParamAbi { name: "approved", ty: "bool" },
        ],
        description: "Approve or suspend a client",
    },
    FunctionAbi {
        name: "withdrawClientBalance",
        inputs: &[
            ParamAbi { name: "clientId", ty: "uint32" },
            ParamAbi { name: "to", ty: "address" },
            ParamAbi { name: "amount", ty: "uint96" },
        ],
        description: "Pay out a client's accrued balance",
    },
    FunctionAbi {
        name: "pause",
        inputs: &[],
        description: "Pause reward accrual and withdrawals",
    },
    FunctionAbi {
        name: "unpause",
        inputs: &[],
        description: "Resume reward accrual and withdrawals",
    },
    FunctionAbi {
        name: "upgradeTo",
        inputs: &[ParamAbi { name: "newImplementation", ty: "address" }],
        description: "Upgrade the rewards proxy implementation",
    },
    FunctionAbi {
        name: "transferOwnership",
        inputs: &[ParamAbi { name: "newOwner", ty: "address" }],
        description: "Hand the rewards contract to a new owner",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RewardsInterpreter;

impl RewardsInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Client Rewards",
            description: "Distributes incentive rewards to client apps",
            category: Category::Rewards,
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
            "registerClient" => {
                let name = display_of(&call, "name");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Register client \"{name}\" for rewards"))
                    .call(call)
                    .build()
            }
            "updateRewardsForProposalWritingAndVoting" => {
                let last = param_uint(&call.params, "lastProposalId")
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!(
                        "Accrue proposal and voting rewards through proposal {last}"
                    ))
                    .call(call)
                    .build()
            }
            "updateRewardsForAuctions" => {
                let last = param_uint(&call.params, "lastNounId")
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Accrue auction rewards through Noun {last}"))
                    .call(call)
                    .build()
            }
            "setClientApproval" => {
                let client = param_uint(&call.params, "clientId")
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let approved = call
                    .params
                    .iter()
                    .find(|p| p.name == "approved")
                    .map(|p| p.display_value == "true")
                    .unwrap_or(false);
                let verb = if approved { "Approve" } else { "Suspend" };
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("{verb} client {client}"))
                    .call(call)
                    .build()
            }
            "withdrawClientBalance" => {
                tag_token_amount(&mut call.params, "amount", 18, "WETH");
                let client = param_uint(&call.params, "clientId")
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let to = display_of(&call, "to");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Withdraw client {client}'s reward balance to {to}"))
                    .category(Category::Payment)
                    .call(call)
                    .build()
            }
            "pause" => ResultBuilder::for_contract(ctx, info)
                .summary("Pause client rewards")
                .severity(Severity::Elevated)
                .category(Category::Configuration)
                .call(call)
                .build(),
            "unpause" => ResultBuilder::for_contract(ctx, info)
                .summary("Resume client rewards")
                .category(Category::Configuration)
                .call(call)
                .build(),
            "upgradeTo" => {
                let implementation = display_of(&call, "newImplementation");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Upgrade the rewards contract to {implementation}"))
                    .category(Category::Upgrade)
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "transferOwnership" => {
                let owner = display_of(&call, "newOwner");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Transfer rewards ownership to {owner}"))
                    .category(Category::Ownership)
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
