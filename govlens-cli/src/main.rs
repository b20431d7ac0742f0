//! Inspection tool for interpreted governance transactions.
//!
//! Feed it the four raw pieces of a proposal action and it prints either a
//! human-readable tree or the JSON payload the review UI consumes.

use clap::{Arg, ArgAction, Command};
use govlens::{InterpretedTransaction, TransactionContext, default_registry};

fn cli() -> Command {
    Command::new("govlens")
        .about("Decode a governance transaction into a human-readable description")
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .required(true)
                .help("Target contract address (0x-prefixed hex)"),
        )
        .arg(
            Arg::new("value")
                .long("value")
                .short('v')
                .default_value("0")
                .help("Call value in wei (decimal or 0x hex)"),
        )
        .arg(
            Arg::new("signature")
                .long("signature")
                .short('s')
                .default_value("")
                .help("Function signature, e.g. 'sendETH(address,uint256)'"),
        )
        .arg(
            Arg::new("calldata")
                .long("calldata")
                .short('d')
                .default_value("")
                .help("ABI-encoded calldata (hex, selector optional)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the raw JSON payload instead of the tree view"),
        )
}

/// Formats an interpreted transaction in a tree layout.
fn format_human_readable(tx: &InterpretedTransaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("┌─ {}\n", tx.summary));
    output.push_str(&format!(
        "│  Contract: {}{}\n",
        tx.contract_name,
        if tx.is_known_contract { "" } else { " (unknown)" }
    ));
    output.push_str(&format!("│  Target: {}\n", tx.target));
    if let Some(function) = &tx.function_name {
        output.push_str(&format!("│  Function: {function}\n"));
    }
    output.push_str(&format!("│  Value: {}\n", tx.value_formatted));
    output.push_str(&format!(
        "│  Category: {}   Severity: {}\n",
        tx.category, tx.severity
    ));

    if !tx.parameters.is_empty() {
        output.push_str("├─ Parameters:\n");
        for (i, param) in tx.parameters.iter().enumerate() {
            let is_last = i == tx.parameters.len() - 1 && tx.addresses_to_resolve.is_empty();
            let prefix = if is_last { "└─" } else { "├─" };
            let role = param
                .recipient_role
                .as_ref()
                .map(|r| format!(" [{r}]"))
                .unwrap_or_default();
            output.push_str(&format!(
                "{prefix} {} ({}): {}{role}\n",
                param.name, param.ty, param.display_value
            ));
        }
    }

    if !tx.addresses_to_resolve.is_empty() {
        output.push_str("└─ Needs name resolution:\n");
        for addr in &tx.addresses_to_resolve {
            output.push_str(&format!("   {addr}\n"));
        }
    }

    output
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let target = matches.get_one::<String>("target").expect("required");
    let value = matches.get_one::<String>("value").expect("defaulted");
    let signature = matches.get_one::<String>("signature").expect("defaulted");
    let calldata = matches.get_one::<String>("calldata").expect("defaulted");

    let ctx = match TransactionContext::from_raw(target, value, signature, calldata) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let result = default_registry().interpret(&ctx);

    if matches.get_flag("json") {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize result: {err}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_human_readable(&result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_tree_output_contains_summary_and_params() {
        let ctx = TransactionContext::from_raw(
            "0xb1a32FC9F9D8b2cf86C068Cae13108809547ef71",
            "0",
            "acceptAdmin()",
            "",
        )
        .unwrap();
        let result = default_registry().interpret(&ctx);
        let rendered = format_human_readable(&result);

        assert!(rendered.contains("Accept the treasury admin role"));
        assert!(rendered.contains("Nouns Treasury"));
        assert!(rendered.contains("Severity: critical"));
    }
}
