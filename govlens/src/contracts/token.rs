//! Nouns token
//!
//! Transfers and approvals are routine. The minter, descriptor, and seeder
//! setters are critical, and so are their lock functions: once locked they
//! can never be set again.

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, mark_recipient, param_uint,
    plain_transfer,
};
use crate::types::{Category, InterpretedTransaction, Severity, TransactionContext};

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "transferFrom",
        inputs: &[
            ParamAbi { name: "from", ty: "address" },
            ParamAbi { name: "to", ty: "address" },
            ParamAbi { name: "tokenId", ty: "uint256" },
        ],
        description: "Transfer a Noun",
    },
    FunctionAbi {
        name: "safeTransferFrom",
        inputs: &[
            ParamAbi { name: "from", ty: "address" },
            ParamAbi { name: "to", ty: "address" },
            ParamAbi { name: "tokenId", ty: "uint256" },
        ],
        description: "Transfer a Noun with receiver checks",
    },
    FunctionAbi {
        name: "safeTransferFrom",
        inputs: &[
            ParamAbi { name: "from", ty: "address" },
            ParamAbi { name: "to", ty: "address" },
            ParamAbi { name: "tokenId", ty: "uint256" },
            ParamAbi { name: "data", ty: "bytes" },
        ],
        description: "Transfer a Noun with receiver checks and data",
    },
    FunctionAbi {
        name: "approve",
        inputs: &[
            ParamAbi { name: "to", ty: "address" },
            ParamAbi { name: "tokenId", ty: "uint256" },
        ],
        description: "Approve an address for one Noun",
    },
    FunctionAbi {
        name: "setApprovalForAll",
        inputs: &[
            ParamAbi { name: "operator", ty: "address" },
            ParamAbi { name: "approved", ty: "bool" },
        ],
        description: "Grant or revoke an operator over every owned Noun",
    },
    FunctionAbi {
        name: "delegate",
        inputs: &[ParamAbi { name: "delegatee", ty: "address" }],
        description: "Delegate voting power",
    },
    FunctionAbi {
        name: "setMinter",
        inputs: &[ParamAbi { name: "minter", ty: "address" }],
        description: "Change who may mint Nouns",
    },
    FunctionAbi {
        name: "lockMinter",
        inputs: &[],
        description: "Lock the minter forever",
    },
    FunctionAbi {
        name: "setDescriptor",
        inputs: &[ParamAbi { name: "descriptor", ty: "address" }],
        description: "Change the artwork descriptor",
    },
    FunctionAbi {
        name: "lockDescriptor",
        inputs: &[],
        description: "Lock the artwork descriptor forever",
    },
    FunctionAbi {
        name: "setSeeder",
        inputs: &[ParamAbi { name: "seeder", ty: "address" }],
        description: "Change the trait seeder",
    },
    FunctionAbi {
        name: "lockSeeder",
        inputs: &[],
        description: "Lock the trait seeder forever",
    },
    FunctionAbi {
        name: "setContractURIHash",
        inputs: &[ParamAbi { name: "newContractURIHash", ty: "string" }],
        description: "Update the collection metadata hash",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenInterpreter;

impl TokenInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Nouns Token",
            description: "The Nouns ERC-721 membership token",
            category: Category::Token,
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
            "transferFrom" | "safeTransferFrom" => {
                let token_id = param_uint(&call.params, "tokenId")
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let to = display_of(&call, "to");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Transfer Noun {token_id} to {to}"))
                    .call(call)
                    .build()
            }
            "approve" => {
                let token_id = param_uint(&call.params, "tokenId")
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let to = display_of(&call, "to");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Approve {to} for Noun {token_id}"))
                    .call(call)
                    .build()
            }
            "setApprovalForAll" => {
                mark_recipient(&mut call.params, "operator", "Approved Operator");
                let operator = display_of(&call, "operator");
                let approved = call
                    .params
                    .iter()
                    .find(|p| p.name == "approved")
                    .map(|p| p.display_value == "true")
                    .unwrap_or(false);
                let verb = if approved { "Grant" } else { "Revoke" };
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("{verb} {operator} operator rights over all Nouns"))
                    .call(call)
                    .build()
            }
            "delegate" => {
                let delegatee = display_of(&call, "delegatee");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Delegate voting power to {delegatee}"))
                    .category(Category::Governance)
                    .call(call)
                    .build()
            }
            "setMinter" => {
                let minter = display_of(&call, "minter");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the Nouns minter to {minter}"))
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "lockMinter" => ResultBuilder::for_contract(ctx, info)
                .summary("Lock the Nouns minter forever")
                .severity(Severity::Critical)
                .call(call)
                .build(),
            "setDescriptor" => {
                let descriptor = display_of(&call, "descriptor");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the artwork descriptor to {descriptor}"))
                    .category(Category::Art)
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "lockDescriptor" => ResultBuilder::for_contract(ctx, info)
                .summary("Lock the artwork descriptor forever")
                .category(Category::Art)
                .severity(Severity::Critical)
                .call(call)
                .build(),
            "setSeeder" => {
                let seeder = display_of(&call, "seeder");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the trait seeder to {seeder}"))
                    .category(Category::Art)
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "lockSeeder" => ResultBuilder::for_contract(ctx, info)
                .summary("Lock the trait seeder forever")
                .category(Category::Art)
                .severity(Severity::Critical)
                .call(call)
                .build(),
            "setContractURIHash" => {
                let hash = display_of(&call, "newContractURIHash");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the collection metadata hash to {hash}"))
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

fn display_of(call: &DecodedCall, name: &str) -> String {
    call.params
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.display_value.clone())
        .unwrap_or_else(|| name.to_string())
}
