use thiserror::Error;

/// Failure while decoding calldata against a declared function schema.
///
/// These never cross the public boundary: every interpreter catches them and
/// degrades to a generic description instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("function `{0}` is not part of the contract schema")]
    UnknownFunction(String),

    #[error("malformed function signature `{0}`")]
    MalformedSignature(String),

    #[error("calldata holds {actual} bytes, schema needs at least {expected}")]
    CalldataTooShort { expected: usize, actual: usize },

    #[error("calldata selector 0x{actual} does not match 0x{expected} for `{signature}`")]
    SelectorMismatch {
        signature: String,
        expected: String,
        actual: String,
    },

    #[error("unsupported parameter type `{0}`")]
    UnsupportedType(String),

    #[error("abi decode failed: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),
}

/// Failure while building a [`crate::TransactionContext`] from raw text.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid target address `{0}`")]
    InvalidAddress(String),

    #[error("invalid wei value `{0}`")]
    InvalidValue(String),

    #[error("invalid calldata hex: {0}")]
    InvalidCalldata(#[from] hex::FromHexError),
}
