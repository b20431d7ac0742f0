//! Interpreter registry
//!
//! The single dispatch point: a transaction's target address resolves to a
//! contract-specific interpreter, a name-seeded generic one, or the bare
//! generic fallback. Built once from an explicit, ordered interpreter list
//! and immutable afterwards; safe to share across threads.

use std::collections::HashMap;

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;

use crate::contracts::{
    AuctionHouseInterpreter, DaoAdminInterpreter, DescriptorInterpreter, GenericInterpreter,
    PayerInterpreter, RewardsInterpreter, StreamFactoryInterpreter, TokenBuyerInterpreter,
    TokenInterpreter, TreasuryInterpreter,
};
use crate::interpreter::Interpreter;
use crate::nouns;
use crate::types::{InterpretedTransaction, TransactionContext};

#[derive(Debug, Clone)]
pub struct InterpreterRegistry {
    by_address: HashMap<Address, Interpreter>,
}

impl InterpreterRegistry {
    /// Builds a registry from an ordered interpreter list. Later entries win
    /// when two interpreters claim the same address; interpreters without a
    /// fixed address (the generic fallback) are skipped, since the fallback
    /// path constructs them on demand.
    pub fn build(interpreters: Vec<Interpreter>) -> Self {
        let mut by_address = HashMap::new();
        for interpreter in interpreters {
            if let Some(address) = interpreter.address() {
                by_address.insert(address, interpreter);
            }
        }
        Self { by_address }
    }

    /// The standard registry covering the Nouns governance contract set.
    pub fn nouns() -> Self {
        Self::build(vec![
            Interpreter::Treasury(TreasuryInterpreter),
            Interpreter::DaoAdmin(DaoAdminInterpreter),
            Interpreter::AuctionHouse(AuctionHouseInterpreter),
            Interpreter::Token(TokenInterpreter),
            Interpreter::Descriptor(DescriptorInterpreter),
            Interpreter::StreamFactory(StreamFactoryInterpreter),
            Interpreter::TokenBuyer(TokenBuyerInterpreter),
            Interpreter::Payer(PayerInterpreter),
            Interpreter::Rewards(RewardsInterpreter),
        ])
    }

    /// Resolves the interpreter for a transaction: an exact registered
    /// match, then a generic interpreter seeded with the known contract
    /// name, then the bare generic fallback.
    pub fn get_interpreter(&self, ctx: &TransactionContext) -> Interpreter {
        if let Some(interpreter) = self.by_address.get(&ctx.target) {
            return interpreter.clone();
        }
        if let Some(contract) = nouns::known_contract(&ctx.target) {
            return Interpreter::Generic(GenericInterpreter::named(contract.name));
        }
        Interpreter::Generic(GenericInterpreter::new())
    }

    pub fn interpret(&self, ctx: &TransactionContext) -> InterpretedTransaction {
        self.get_interpreter(ctx).interpret(ctx)
    }

    /// Like [`InterpreterRegistry::interpret`], passing a caller-fetched ABI
    /// through to the generic path.
    pub fn interpret_with_abi(
        &self,
        ctx: &TransactionContext,
        target_abi: Option<&JsonAbi>,
    ) -> InterpretedTransaction {
        self.get_interpreter(ctx).interpret_with_abi(ctx, target_abi)
    }

    pub fn extract_addresses(&self, ctx: &TransactionContext) -> Vec<Address> {
        self.get_interpreter(ctx).extract_addresses(ctx)
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

impl Default for InterpreterRegistry {
    fn default() -> Self {
        Self::nouns()
    }
}
