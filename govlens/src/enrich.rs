//! Parameter annotation
//!
//! Turns decoded positional values into display-ready parameters: a
//! formatted string, a semantic format tag, and a recipient flag with a role
//! label for addresses that represent payment or authority recipients.

use crate::abi::FunctionSig;
use crate::nouns;
use crate::types::{InterpretedParameter, ParamFormat, ParamValue};

/// Parameter names that always denote a recipient.
const RECIPIENT_PARAM_NAMES: &[&str] = &[
    "to",
    "recipient",
    "account",
    "newOwner",
    "delegatee",
    "spender",
];

/// Function names whose first address parameter is a recipient.
const RECIPIENT_FUNCTION_NAMES: &[&str] = &[
    "transfer",
    "send",
    "sendEth",
    "sendETH",
    "sendERC20",
    "sendOrRegisterDebt",
];

/// Builds annotated parameters in declaration order.
///
/// `names` contributes parameter names when available; unnamed positions
/// fall back to `param0`, `param1`, ...
pub fn enrich_parameters(
    sig: &FunctionSig,
    names: &[String],
    values: Vec<ParamValue>,
) -> Vec<InterpretedParameter> {
    let first_address_index = values
        .iter()
        .position(|v| matches!(v, ParamValue::Address(_)));

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let name = names
                .get(i)
                .filter(|n| !n.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("param{i}"));
            let ty = sig.inputs.get(i).cloned().unwrap_or_else(|| "bytes".to_string());

            let is_recipient = matches!(value, ParamValue::Address(_))
                && (RECIPIENT_PARAM_NAMES.contains(&name.as_str())
                    || (RECIPIENT_FUNCTION_NAMES.contains(&sig.name.as_str())
                        && first_address_index == Some(i)));

            let recipient_role = is_recipient.then(|| recipient_role(&name, &sig.name));
            let format = default_format(&value, &name);
            let display_value = display_value(&value);

            InterpretedParameter {
                name,
                ty,
                value,
                display_value,
                is_recipient,
                recipient_role,
                format,
                decimals: None,
                symbol: None,
            }
        })
        .collect()
}

/// Fixed priority: parameter name, then the owning function's name, then the
/// generic label.
fn recipient_role(param_name: &str, function_name: &str) -> String {
    match param_name {
        "spender" => return "Approved Spender".to_string(),
        "newOwner" => return "New Owner".to_string(),
        "delegatee" => return "Delegatee".to_string(),
        "account" => return "Account".to_string(),
        _ => {}
    }
    let lowered = function_name.to_lowercase();
    if lowered.contains("stream") {
        "Stream Recipient".to_string()
    } else if lowered.contains("debt") {
        "Payment Recipient".to_string()
    } else if lowered.starts_with("send") {
        "Payment Recipient".to_string()
    } else if lowered.starts_with("transfer") {
        "Transfer Recipient".to_string()
    } else if lowered.starts_with("approve") {
        "Approved Spender".to_string()
    } else {
        "Recipient".to_string()
    }
}

fn default_format(value: &ParamValue, name: &str) -> ParamFormat {
    match value {
        ParamValue::Address(_) => ParamFormat::Address,
        ParamValue::Bool(_) => ParamFormat::Boolean,
        ParamValue::Bytes(_) => ParamFormat::Bytes,
        ParamValue::String(_) | ParamValue::Array(_) => ParamFormat::Text,
        ParamValue::Uint(_) | ParamValue::Int(_) => {
            if name.to_lowercase().contains("amount") {
                ParamFormat::Amount
            } else {
                ParamFormat::Text
            }
        }
    }
}

/// Raw display, with known governance contracts and tokens shown by name.
fn display_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Address(a) => nouns::display_name(a),
        other => other.to_display_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address};
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_named_recipient_detection() {
        let sig = FunctionSig::parse("approve(address,uint256)").unwrap();
        let spender = address!("4444444444444444444444444444444444444444");

        let params = enrich_parameters(
            &sig,
            &names(&["spender", "amount"]),
            vec![
                ParamValue::Address(spender),
                ParamValue::Uint(U256::from(5u64)),
            ],
        );

        assert!(params[0].is_recipient);
        assert_eq!(params[0].recipient_role.as_deref(), Some("Approved Spender"));
        assert_eq!(params[0].format, ParamFormat::Address);
        assert!(!params[1].is_recipient);
        assert_eq!(params[1].format, ParamFormat::Amount);
    }

    #[test]
    fn test_verb_based_recipient_detection() {
        // No schema: the parameter has no recipient-ish name, but the
        // function name is in the recipient verb set.
        let sig = FunctionSig::parse("transfer(address,uint256)").unwrap();
        let to = address!("5555555555555555555555555555555555555555");

        let params = enrich_parameters(
            &sig,
            &[],
            vec![ParamValue::Address(to), ParamValue::Uint(U256::from(1u64))],
        );

        assert_eq!(params[0].name, "param0");
        assert!(params[0].is_recipient);
        assert_eq!(params[0].recipient_role.as_deref(), Some("Transfer Recipient"));
    }

    #[test]
    fn test_only_first_address_matches_verb_rule() {
        let sig = FunctionSig::parse("sendERC20(address,address,uint256)").unwrap();
        let a = address!("6666666666666666666666666666666666666666");
        let b = address!("7777777777777777777777777777777777777777");

        let params = enrich_parameters(
            &sig,
            &[],
            vec![
                ParamValue::Address(a),
                ParamValue::Address(b),
                ParamValue::Uint(U256::from(1u64)),
            ],
        );

        assert!(params[0].is_recipient);
        assert!(!params[1].is_recipient);
    }

    #[test]
    fn test_non_recipient_function() {
        let sig = FunctionSig::parse("setSanctionsOracle(address)").unwrap();
        let oracle = address!("8888888888888888888888888888888888888888");

        let params = enrich_parameters(&sig, &[], vec![ParamValue::Address(oracle)]);
        assert!(!params[0].is_recipient);
        assert!(params[0].recipient_role.is_none());
    }

    #[test]
    fn test_known_contract_display_substitution() {
        let sig = FunctionSig::parse("transfer(address,uint256)").unwrap();
        let params = enrich_parameters(
            &sig,
            &[],
            vec![
                ParamValue::Address(crate::nouns::TREASURY),
                ParamValue::Uint(U256::from(1u64)),
            ],
        );
        assert_eq!(params[0].display_value, "Nouns Treasury");
    }

    #[test]
    fn test_bool_and_bytes_formats() {
        let sig = FunctionSig::parse("setApprovalForAll(address,bool)").unwrap();
        let op = address!("9999999999999999999999999999999999999999");
        let params = enrich_parameters(
            &sig,
            &[],
            vec![ParamValue::Address(op), ParamValue::Bool(true)],
        );
        assert_eq!(params[1].format, ParamFormat::Boolean);
        assert_eq!(params[1].display_value, "true");
    }
}
