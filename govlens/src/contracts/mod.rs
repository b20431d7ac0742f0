//! Contract-specific interpreters
//!
//! One module per governance contract the DAO routinely calls, plus the
//! generic fallback for everything else. Each module owns its function
//! schema and maps function names to tailored summaries, categories, and
//! severities; the mechanical decode work lives in the shared base.

pub mod auction;
pub mod dao_admin;
pub mod descriptor;
pub mod generic;
pub mod payer;
pub mod rewards;
pub mod streams;
pub mod token;
pub mod token_buyer;
pub mod treasury;

pub use auction::AuctionHouseInterpreter;
pub use dao_admin::DaoAdminInterpreter;
pub use descriptor::DescriptorInterpreter;
pub use generic::GenericInterpreter;
pub use payer::PayerInterpreter;
pub use rewards::RewardsInterpreter;
pub use streams::StreamFactoryInterpreter;
pub use token::TokenInterpreter;
pub use token_buyer::TokenBuyerInterpreter;
pub use treasury::TreasuryInterpreter;

#[cfg(test)]
pub(crate) mod testutil {
    use alloy_primitives::{Address, U256};

    use crate::abi::FunctionSig;
    use crate::types::TransactionContext;

    pub(crate) enum Arg {
        Addr(Address),
        U(U256),
        Flag(bool),
    }

    /// Encodes selector-prefixed calldata for static-argument functions.
    pub(crate) fn encode_call(signature: &str, args: &[Arg]) -> Vec<u8> {
        let sig = FunctionSig::parse(signature).expect("test signature must parse");
        let mut out = sig.selector().to_vec();
        for arg in args {
            match arg {
                Arg::Addr(a) => {
                    out.extend_from_slice(&[0u8; 12]);
                    out.extend_from_slice(a.as_slice());
                }
                Arg::U(v) => out.extend_from_slice(&v.to_be_bytes::<32>()),
                Arg::Flag(b) => {
                    let mut word = [0u8; 32];
                    word[31] = *b as u8;
                    out.extend_from_slice(&word);
                }
            }
        }
        out
    }

    pub(crate) fn call_ctx(target: Address, signature: &str, args: &[Arg]) -> TransactionContext {
        TransactionContext::new(target, U256::ZERO, signature, encode_call(signature, args))
    }

    pub(crate) fn eth(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    pub(crate) fn usdc(n: u64) -> U256 {
        U256::from(n) * U256::from(1_000_000u64)
    }
}
