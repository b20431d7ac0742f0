//! govlens: governance transaction interpretation
//!
//! Turns raw on-chain governance transaction data (target address, ETH
//! value, function signature, ABI-encoded calldata) into a structured,
//! human-readable description for proposal review, and flags every address
//! that needs off-chain name resolution.
//!
//! The whole crate is a stateless function of its input plus a static
//! interpreter table: no I/O, no shared mutable state, nothing retained
//! between calls. Decode failures never surface as errors; they degrade to
//! less detailed but always well-formed results.
//!
//! ```
//! use govlens::{TransactionContext, interpret};
//!
//! let ctx = TransactionContext::from_raw(
//!     "0xb1a32FC9F9D8b2cf86C068Cae13108809547ef71",
//!     "0",
//!     "setDelay(uint256)",
//!     "0xe177246e0000000000000000000000000000000000000000000000000000000000015180",
//! )
//! .unwrap();
//!
//! let result = interpret(&ctx);
//! assert_eq!(result.contract_name, "Nouns Treasury");
//! assert_eq!(result.summary, "Set the timelock delay to 24 hours");
//! ```

pub mod abi;
pub mod calldata;
pub mod contracts;
pub mod enrich;
pub mod error;
pub mod fmt;
pub mod interpreter;
pub mod nouns;
pub mod registry;
pub mod types;

use once_cell::sync::Lazy;

pub use error::{ContextError, DecodeError};
pub use interpreter::Interpreter;
pub use registry::InterpreterRegistry;
pub use types::{
    Category, InterpretedParameter, InterpretedTransaction, ParamFormat, ParamValue, Severity,
    TransactionContext,
};

static DEFAULT_REGISTRY: Lazy<InterpreterRegistry> = Lazy::new(InterpreterRegistry::nouns);

/// The shared default registry, built once on first use.
pub fn default_registry() -> &'static InterpreterRegistry {
    &DEFAULT_REGISTRY
}

/// Interprets a transaction against the standard Nouns registry.
pub fn interpret(ctx: &TransactionContext) -> InterpretedTransaction {
    default_registry().interpret(ctx)
}

/// The addresses interpretation would flag for name resolution, usable
/// before or independently of full interpretation.
pub fn extract_addresses(ctx: &TransactionContext) -> Vec<alloy_primitives::Address> {
    default_registry().extract_addresses(ctx)
}
