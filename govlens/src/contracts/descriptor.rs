//! Art descriptor
//!
//! Trait uploads and rendering knobs are routine configuration. The lock
//! functions are critical: locking makes the artwork immutable.

use crate::abi::{FunctionAbi, ParamAbi};
use crate::interpreter::{
    ContractInfo, DecodedCall, ResultBuilder, decode_call, fallthrough, plain_transfer,
};
use crate::types::{Category, InterpretedTransaction, Severity, TransactionContext};

static SCHEMA: &[FunctionAbi] = &[
    FunctionAbi {
        name: "setBaseURI",
        inputs: &[ParamAbi { name: "newBaseURI", ty: "string" }],
        description: "Fallback metadata base URI",
    },
    FunctionAbi {
        name: "toggleDataURIEnabled",
        inputs: &[],
        description: "Switch between on-chain and base-URI metadata",
    },
    FunctionAbi {
        name: "setArt",
        inputs: &[ParamAbi { name: "_art", ty: "address" }],
        description: "Repoint the descriptor at a new art storage contract",
    },
    FunctionAbi {
        name: "setRenderer",
        inputs: &[ParamAbi { name: "_renderer", ty: "address" }],
        description: "Repoint the descriptor at a new SVG renderer",
    },
    FunctionAbi {
        name: "setPalette",
        inputs: &[
            ParamAbi { name: "paletteIndex", ty: "uint8" },
            ParamAbi { name: "palette", ty: "bytes" },
        ],
        description: "Upload a color palette",
    },
    FunctionAbi {
        name: "addManyBackgrounds",
        inputs: &[ParamAbi { name: "_backgrounds", ty: "string[]" }],
        description: "Upload background colors",
    },
    FunctionAbi {
        name: "lockParts",
        inputs: &[],
        description: "Lock all artwork parts forever",
    },
    FunctionAbi {
        name: "transferOwnership",
        inputs: &[ParamAbi { name: "newOwner", ty: "address" }],
        description: "Hand the descriptor to a new owner",
    },
    FunctionAbi {
        name: "renounceOwnership",
        inputs: &[],
        description: "Abandon ownership of the descriptor",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorInterpreter;

impl DescriptorInterpreter {
    fn info(&self) -> ContractInfo {
        ContractInfo {
            name: "Nouns Descriptor",
            description: "Stores and renders the on-chain artwork",
            category: Category::Art,
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
        call: DecodedCall,
        info: &ContractInfo,
    ) -> InterpretedTransaction {
        match call.sig.name.as_str() {
            "setBaseURI" => {
                let uri = display_of(&call, "newBaseURI");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the metadata base URI to {uri}"))
                    .category(Category::Configuration)
                    .call(call)
                    .build()
            }
            "toggleDataURIEnabled" => ResultBuilder::for_contract(ctx, info)
                .summary("Toggle on-chain data URIs")
                .category(Category::Configuration)
                .call(call)
                .build(),
            "setArt" => {
                let art = display_of(&call, "_art");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the art storage contract to {art}"))
                    .severity(Severity::Elevated)
                    .call(call)
                    .build()
            }
            "setRenderer" => {
                let renderer = display_of(&call, "_renderer");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Set the SVG renderer to {renderer}"))
                    .severity(Severity::Elevated)
                    .call(call)
                    .build()
            }
            "setPalette" => ResultBuilder::for_contract(ctx, info)
                .summary("Upload a color palette")
                .call(call)
                .build(),
            "addManyBackgrounds" => ResultBuilder::for_contract(ctx, info)
                .summary("Upload background colors")
                .call(call)
                .build(),
            // Irreversible: the artwork can never change again.
            "lockParts" => ResultBuilder::for_contract(ctx, info)
                .summary("Lock all artwork parts forever")
                .severity(Severity::Critical)
                .call(call)
                .build(),
            "transferOwnership" => {
                let owner = display_of(&call, "newOwner");
                ResultBuilder::for_contract(ctx, info)
                    .summary(format!("Transfer descriptor ownership to {owner}"))
                    .category(Category::Ownership)
                    .severity(Severity::Critical)
                    .call(call)
                    .build()
            }
            "renounceOwnership" => ResultBuilder::for_contract(ctx, info)
                .summary("Renounce descriptor ownership")
                .category(Category::Ownership)
                .severity(Severity::Critical)
                .call(call)
                .build(),
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
    use crate::abi::FunctionSig;
    use crate::nouns;
    use crate::contracts::testutil::{Arg, call_ctx};
    use alloy_primitives::{U256, address};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lock_parts_is_critical() {
        let ctx = call_ctx(nouns::DESCRIPTOR, "lockParts()", &[]);
        let out = DescriptorInterpreter.interpret(&ctx);
        assert_eq!(out.category, Category::Art);
        assert_eq!(out.severity, Severity::Critical);
    }

    #[test]
    fn test_transfer_ownership() {
        let owner = address!("6767676767676767676767676767676767676767");
        let ctx = call_ctx(
            nouns::DESCRIPTOR,
            "transferOwnership(address)",
            &[Arg::Addr(owner)],
        );
        let out = DescriptorInterpreter.interpret(&ctx);
        assert_eq!(out.category, Category::Ownership);
        assert_eq!(out.severity, Severity::Critical);
        assert_eq!(out.parameters[0].recipient_role.as_deref(), Some("New Owner"));
        assert_eq!(out.addresses_to_resolve, vec![owner]);
    }

    #[test]
    fn test_set_base_uri_decodes_string() {
        let sig = FunctionSig::parse("setBaseURI(string)").unwrap();
        let mut calldata = sig.selector().to_vec();
        calldata.extend_from_slice(&U256::from(32u64).to_be_bytes::<32>());
        calldata.extend_from_slice(&U256::from(7u64).to_be_bytes::<32>());
        let mut tail = [0u8; 32];
        tail[..7].copy_from_slice(b"ipfs://");
        calldata.extend_from_slice(&tail);

        let ctx = TransactionContext::new(nouns::DESCRIPTOR, U256::ZERO, "setBaseURI(string)", calldata);
        let out = DescriptorInterpreter.interpret(&ctx);
        assert_eq!(out.summary, "Set the metadata base URI to ipfs://");
        assert_eq!(out.category, Category::Configuration);
    }

    #[test]
    fn test_set_art_elevated() {
        let art = address!("7878787878787878787878787878787878787878");
        let ctx = call_ctx(nouns::DESCRIPTOR, "setArt(address)", &[Arg::Addr(art)]);
        let out = DescriptorInterpreter.interpret(&ctx);
        assert_eq!(out.severity, Severity::Elevated);
        assert_eq!(out.category, Category::Art);
    }
}
