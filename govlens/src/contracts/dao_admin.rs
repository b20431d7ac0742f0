//! Governor admin settings
//!
//! Every basis-point setter reads back as a percentage and every block-count
//! setter as an approximate wall-clock duration. Veto and role moves are
//! critical: they change who can stop or steer the DAO.

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, plain_transfer, tag_blocks,
    tag_bps, tag_seconds_as_duration,
};
use crate::types::{Category, InterpretedTransaction, Severity, TransactionContext};

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "setVotingDelay",
        inputs: &[ParamAbi { name: "newVotingDelay", ty: "uint256" }],
        description: "Blocks between proposal creation and voting start",
    },
    FunctionAbi {
        name: "setVotingPeriod",
        inputs: &[ParamAbi { name: "newVotingPeriod", ty: "uint256" }],
        description: "Blocks a proposal stays open for voting",
    },
    FunctionAbi {
        name: "setProposalThresholdBPS",
        inputs: &[ParamAbi { name: "newProposalThresholdBPS", ty: "uint256" }],
        description: "Share of total supply needed to propose",
    },
    FunctionAbi {
        name: "setObjectionPeriodDurationInBlocks",
        inputs: &[ParamAbi { name: "newObjectionPeriodDurationInBlocks", ty: "uint32" }],
        description: "Blocks added for objection-only voting after a late flip",
    },
    FunctionAbi {
        name: "setProposalUpdatablePeriodInBlocks",
        inputs: &[ParamAbi { name: "newProposalUpdatablePeriodInBlocks", ty: "uint32" }],
        description: "Blocks during which a proposer may edit a pending proposal",
    },
    FunctionAbi {
        name: "setQuorumCoefficient",
        inputs: &[ParamAbi { name: "newQuorumCoefficient", ty: "uint32" }],
        description: "Dynamic quorum curve coefficient",
    },
    FunctionAbi {
        name: "setMinQuorumVotesBPS",
        inputs: &[ParamAbi { name: "newMinQuorumVotesBPS", ty: "uint16" }],
        description: "Dynamic quorum lower bound",
    },
    FunctionAbi {
        name: "setMaxQuorumVotesBPS",
        inputs: &[ParamAbi { name: "newMaxQuorumVotesBPS", ty: "uint16" }],
        description: "Dynamic quorum upper bound",
    },
    FunctionAbi {
        name: "setForkPeriod",
        inputs: &[ParamAbi { name: "newForkPeriod", ty: "uint256" }],
        description: "Seconds the fork escrow stays open once forking starts",
    },
    FunctionAbi {
        name: "setForkThresholdBPS",
        inputs: &[ParamAbi { name: "newForkThresholdBPS", ty: "uint256" }],
        description: "Share of total supply required to trigger a fork",
    },
    FunctionAbi {
        name: "setVetoer",
        inputs: &[ParamAbi { name: "newVetoer", ty: "address" }],
        description: "Hand the veto power to another address",
    },
    FunctionAbi {
        name: "burnVetoPower",
        inputs: &[],
        description: "Permanently destroy the veto power",
    },
    FunctionAbi {
        name: "setPendingAdmin",
        inputs: &[ParamAbi { name: "newPendingAdmin", ty: "address" }],
        description: "Nominate a new governor admin",
    },
    FunctionAbi {
        name: "acceptAdmin",
        inputs: &[],
        description: "Accept the pending governor admin role",
    },
    FunctionAbi {
        name: "setTimelocksAndAdmin",
        inputs: &[
            ParamAbi { name: "timelock", ty: "address" },
            ParamAbi { name: "timelockV1", ty: "address" },
            ParamAbi { name: "admin", ty: "address" },
        ],
        description: "Repoint the DAO at new treasury and admin addresses",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DaoAdminInterpreter;

impl DaoAdminInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Nouns DAO",
            description: "Governor proxy carrying voting and admin settings",
            category: Category::Governance,
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
        let name = call.sig.name.clone();
        match name.as_str() {
            "setVotingDelay"
            | "setVotingPeriod"
            | "setObjectionPeriodDurationInBlocks"
            | "setProposalUpdatablePeriodInBlocks" => {
                let param = call.params.first().map(|p| p.name.clone()).unwrap_or_default();
                tag_blocks(&mut call.params, &param);
                let display = first_display(&call);
                let what = match name.as_str() {
                    "setVotingDelay" => "voting delay",
                    "setVotingPeriod" => "voting period",
                    "setObjectionPeriodDurationInBlocks" => "objection period",
                    _ => "proposal updatable period",
                };
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the {what} to {display}"))
                    .category(Category::Governance)
                    .call(call)
                    .build()
            }
            "setProposalThresholdBPS"
            | "setMinQuorumVotesBPS"
            | "setMaxQuorumVotesBPS"
            | "setForkThresholdBPS" => {
                let param = call.params.first().map(|p| p.name.clone()).unwrap_or_default();
                tag_bps(&mut call.params, &param);
                let display = first_display(&call);
                let what = match name.as_str() {
                    "setProposalThresholdBPS" => "proposal threshold",
                    "setMinQuorumVotesBPS" => "minimum quorum",
                    "setMaxQuorumVotesBPS" => "maximum quorum",
                    _ => "fork threshold",
                };
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the {what} to {display}"))
                    .category(Category::Governance)
                    .call(call)
                    .build()
            }
            "setForkPeriod" => {
                tag_seconds_as_duration(&mut call.params, "newForkPeriod");
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the fork escrow period to {display}"))
                    .category(Category::Governance)
                    .call(call)
                    .build()
            }
            "setQuorumCoefficient" => {
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the dynamic quorum coefficient to {display}"))
                    .category(Category::Governance)
                    .call(call)
                    .build()
            }
            "setVetoer" => {
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Hand the veto power to {display}"))
                    .category(Category::Governance)
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "burnVetoPower" => ResultBuilder::for_contract(ctx, info)
                .summary("Permanently burn the veto power")
                .category(Category::Governance)
                .severity(Severity::Critical)
                .call(call)
                .build(),
            "setPendingAdmin" => {
                let display = first_display(&call);
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Nominate {display} as governor admin"))
                    .category(Category::Ownership)
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "acceptAdmin" => ResultBuilder::for_contract(ctx, info)
                .summary("Accept the governor admin role")
                .category(Category::Ownership)
                .severity(Severity::Critical)
                .call(call)
                .build(),
            "setTimelocksAndAdmin" => ResultBuilder::for_contract(ctx, info)
                .summary("Repoint the DAO's treasury and admin addresses")
                .category(Category::Ownership)
                .severity(Severity::Critical)
                .call(call)
                .build(),
            other => {
                let summary = format!("Execute `{}` on {}", other, info.name);
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
