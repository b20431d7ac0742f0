//! Schema-driven ABI decoding
//!
//! The decode path is data-driven: each contract interpreter declares a
//! static table of [`FunctionAbi`] entries (name, parameter names and types),
//! and this module decodes positional parameters against the textual function
//! signature carried by the transaction itself. The signature is the source
//! of truth for the encoded layout; the schema contributes parameter names
//! and descriptions.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::keccak256;

use crate::error::DecodeError;
use crate::types::ParamValue;

/// A parsed textual function signature, e.g. `sendETH(address,uint256)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSig {
    pub name: String,
    pub inputs: Vec<String>,
}

impl FunctionSig {
    /// Parses `name(type1,type2,...)`. Nested tuples and array suffixes are
    /// kept intact; only top-level commas separate parameters.
    pub fn parse(signature: &str) -> Result<Self, DecodeError> {
        let signature = signature.trim();
        let open = signature
            .find('(')
            .ok_or_else(|| DecodeError::MalformedSignature(signature.to_string()))?;
        if !signature.ends_with(')') || open == 0 {
            return Err(DecodeError::MalformedSignature(signature.to_string()));
        }

        let name = &signature[..open];
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            return Err(DecodeError::MalformedSignature(signature.to_string()));
        }

        let body = &signature[open + 1..signature.len() - 1];
        let mut inputs = Vec::new();
        if !body.trim().is_empty() {
            let mut depth = 0usize;
            let mut start = 0usize;
            for (i, c) in body.char_indices() {
                match c {
                    '(' | '[' => depth += 1,
                    ')' | ']' => {
                        depth = depth
                            .checked_sub(1)
                            .ok_or_else(|| DecodeError::MalformedSignature(signature.to_string()))?
                    }
                    ',' if depth == 0 => {
                        inputs.push(body[start..i].trim().to_string());
                        start = i + 1;
                    }
                    _ => {}
                }
            }
            if depth != 0 {
                return Err(DecodeError::MalformedSignature(signature.to_string()));
            }
            inputs.push(body[start..].trim().to_string());
            if inputs.iter().any(|t| t.is_empty()) {
                return Err(DecodeError::MalformedSignature(signature.to_string()));
            }
        }

        Ok(Self {
            name: name.to_string(),
            inputs,
        })
    }

    /// Canonical form used for selector hashing: no whitespace, no names.
    pub fn canonical(&self) -> String {
        format!("{}({})", self.name, self.inputs.join(","))
    }

    /// First 4 bytes of `keccak256(canonical)`.
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.canonical().as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }
}

/// One declared parameter of a schema function.
#[derive(Debug, Clone, Copy)]
pub struct ParamAbi {
    pub name: &'static str,
    pub ty: &'static str,
}

/// One function of a contract's declared schema.
#[derive(Debug, Clone, Copy)]
pub struct FunctionAbi {
    pub name: &'static str,
    pub inputs: &'static [ParamAbi],
    pub description: &'static str,
}

impl FunctionAbi {
    /// True when this entry's declared input types match the signature's.
    fn matches_types(&self, sig: &FunctionSig) -> bool {
        self.inputs.len() == sig.inputs.len()
            && self
                .inputs
                .iter()
                .zip(sig.inputs.iter())
                .all(|(p, t)| p.ty == t)
    }
}

/// Resolves the schema entry for a parsed signature.
///
/// Overloads share a name; the entry whose declared types match the
/// signature wins, then one with matching arity, then the first entry with
/// the name. `None` means the function is not part of the schema at all.
pub fn select_overload<'a>(
    schema: &'a [FunctionAbi],
    sig: &FunctionSig,
) -> Option<&'a FunctionAbi> {
    let named: Vec<&FunctionAbi> = schema.iter().filter(|f| f.name == sig.name).collect();
    if named.is_empty() {
        return None;
    }
    named
        .iter()
        .find(|f| f.matches_types(sig))
        .or_else(|| named.iter().find(|f| f.inputs.len() == sig.inputs.len()))
        .copied()
        .or_else(|| named.first().copied())
}

/// Strips the 4-byte selector from calldata, tolerating payloads that omit
/// it entirely or carry it more than once. Parameter bodies are always
/// 32-byte aligned, so a length of `4 (mod 32)` means a selector prefix is
/// present and must match the signature.
pub fn normalize_calldata<'a>(
    sig: &FunctionSig,
    calldata: &'a [u8],
) -> Result<&'a [u8], DecodeError> {
    let expected = sig.selector();
    let mut body = calldata;
    while body.len() % 32 == 4 {
        if body[..4] == expected {
            body = &body[4..];
        } else {
            return Err(DecodeError::SelectorMismatch {
                signature: sig.canonical(),
                expected: hex::encode(expected),
                actual: hex::encode(&body[..4]),
            });
        }
    }
    if body.len() % 32 != 0 {
        return Err(DecodeError::CalldataTooShort {
            expected: (body.len() / 32 + 1) * 32,
            actual: calldata.len(),
        });
    }
    Ok(body)
}

/// Decodes the positional parameters of `calldata` according to the
/// signature's type list.
pub fn decode_params(sig: &FunctionSig, calldata: &[u8]) -> Result<Vec<ParamValue>, DecodeError> {
    let body = normalize_calldata(sig, calldata)?;
    if sig.inputs.is_empty() {
        return Ok(Vec::new());
    }

    // Every parameter occupies at least one 32-byte head slot.
    let min_len = sig.inputs.len() * 32;
    if body.len() < min_len {
        return Err(DecodeError::CalldataTooShort {
            expected: min_len,
            actual: body.len(),
        });
    }

    let types = sig
        .inputs
        .iter()
        .map(|t| {
            t.parse::<DynSolType>()
                .map_err(|_| DecodeError::UnsupportedType(t.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let decoded = DynSolType::Tuple(types).abi_decode(body)?;
    match decoded {
        DynSolValue::Tuple(values) => Ok(values.into_iter().map(from_dyn).collect()),
        other => Ok(vec![from_dyn(other)]),
    }
}

fn from_dyn(value: DynSolValue) -> ParamValue {
    match value {
        DynSolValue::Address(a) => ParamValue::Address(a),
        DynSolValue::Bool(b) => ParamValue::Bool(b),
        DynSolValue::Uint(v, _) => ParamValue::Uint(v),
        DynSolValue::Int(v, _) => ParamValue::Int(v),
        DynSolValue::FixedBytes(word, size) => {
            ParamValue::Bytes(word.as_slice()[..size].to_vec().into())
        }
        DynSolValue::Bytes(b) => ParamValue::Bytes(b.into()),
        DynSolValue::String(s) => ParamValue::String(s),
        DynSolValue::Function(f) => ParamValue::Bytes(f.as_slice().to_vec().into()),
        DynSolValue::Array(items)
        | DynSolValue::FixedArray(items)
        | DynSolValue::Tuple(items) => {
            ParamValue::Array(items.into_iter().map(from_dyn).collect())
        }
    }
}
