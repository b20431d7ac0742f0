//! End-to-end interpretation scenarios through the public registry API.

use alloy_primitives::{Address, U256, address};
use govlens::abi::FunctionSig;
use govlens::{Category, InterpreterRegistry, Severity, TransactionContext, nouns};
use pretty_assertions::assert_eq;

fn eth(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

fn encode(signature: &str, words: &[[u8; 32]]) -> Vec<u8> {
    let sig = FunctionSig::parse(signature).unwrap();
    let mut out = sig.selector().to_vec();
    for w in words {
        out.extend_from_slice(w);
    }
    out
}

fn addr_word(a: Address) -> [u8; 32] {
    let mut w = [0u8; 32];
    w[12..].copy_from_slice(a.as_slice());
    w
}

fn uint_word(v: U256) -> [u8; 32] {
    v.to_be_bytes()
}

#[test]
fn treasury_send_eth_scenario() {
    let recipient = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    let ctx = TransactionContext::new(
        nouns::TREASURY,
        U256::ZERO,
        "sendETH(address,uint256)",
        encode(
            "sendETH(address,uint256)",
            &[addr_word(recipient), uint_word(eth(15))],
        ),
    );

    let registry = InterpreterRegistry::nouns();
    let out = registry.interpret(&ctx);

    assert_eq!(out.category, Category::Payment);
    assert_eq!(out.severity, Severity::Elevated);
    assert_eq!(out.addresses_to_resolve, vec![recipient]);
    assert!(out.is_known_contract);
}

#[test]
fn token_lock_descriptor_scenario() {
    let sig = FunctionSig::parse("lockDescriptor()").unwrap();
    let ctx = TransactionContext::new(
        nouns::TOKEN,
        U256::ZERO,
        "lockDescriptor()",
        sig.selector().to_vec(),
    );

    let out = InterpreterRegistry::nouns().interpret(&ctx);
    assert_eq!(out.category, Category::Art);
    assert_eq!(out.severity, Severity::Critical);
    assert!(out.parameters.is_empty());
}

#[test]
fn totality_over_degenerate_contexts() {
    let registry = InterpreterRegistry::nouns();
    let targets = [
        nouns::TREASURY,
        nouns::TOKEN,
        nouns::USDC,
        address!("9999999999999999999999999999999999999999"),
    ];
    let signatures = ["", "f()", "transfer(address,uint256)", "not a signature", "f("];
    let payloads: [&[u8]; 4] = [b"", &[0x01], &[0xab; 36], &[0xff; 100]];

    for target in targets {
        for signature in signatures {
            for payload in payloads {
                for value in [U256::ZERO, U256::from(1u64), U256::MAX] {
                    let ctx =
                        TransactionContext::new(target, value, signature, payload.to_vec());
                    // Must never panic, whatever the combination.
                    let out = registry.interpret(&ctx);
                    assert!(!out.value_formatted.is_empty());
                }
            }
        }
    }
}

#[test]
fn idempotence() {
    let recipient = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
    let ctx = TransactionContext::new(
        nouns::PAYER,
        U256::ZERO,
        "sendOrRegisterDebt(address,uint256)",
        encode(
            "sendOrRegisterDebt(address,uint256)",
            &[addr_word(recipient), uint_word(U256::from(25_000_000u64))],
        ),
    );
    let registry = InterpreterRegistry::nouns();

    let a = registry.interpret(&ctx);
    let b = registry.interpret(&ctx);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn address_subset_invariant() {
    let recipient = address!("cccccccccccccccccccccccccccccccccccccccc");
    let ctx = TransactionContext::new(
        nouns::TREASURY,
        U256::ZERO,
        "sendERC20(address,address,uint256)",
        encode(
            "sendERC20(address,address,uint256)",
            &[
                addr_word(recipient),
                addr_word(nouns::USDC),
                uint_word(U256::from(1_000_000u64)),
            ],
        ),
    );
    let out = InterpreterRegistry::nouns().interpret(&ctx);

    let mut appearing: Vec<Address> = vec![ctx.target];
    for p in &out.parameters {
        if let govlens::ParamValue::Address(a) = p.value {
            appearing.push(a);
        }
    }
    for resolved in &out.addresses_to_resolve {
        assert!(appearing.contains(resolved));
    }
}

#[test]
fn known_contract_suppression() {
    // A plain ETH transfer whose target is a known governance contract
    // resolves nothing.
    let ctx = TransactionContext::new(nouns::AUCTION_HOUSE, eth(1), "", vec![]);
    let out = InterpreterRegistry::nouns().interpret(&ctx);
    assert!(out.addresses_to_resolve.is_empty());

    // The same transfer to an unknown address resolves the target.
    let unknown = address!("dddddddddddddddddddddddddddddddddddddddd");
    let ctx = TransactionContext::new(unknown, eth(1), "", vec![]);
    let out = InterpreterRegistry::nouns().interpret(&ctx);
    assert_eq!(out.addresses_to_resolve, vec![unknown]);
    assert_eq!(out.category, Category::Payment);
}

#[test]
fn overload_routing_five_vs_seven_params() {
    let registry = InterpreterRegistry::nouns();
    let recipient = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
    let payer = address!("ffffffffffffffffffffffffffffffffffffffff");
    let start = U256::from(1_700_000_000u64);
    let stop = U256::from(1_700_864_000u64); // ten days later

    // Five positional parameters: recipient at index 0.
    let ctx = TransactionContext::new(
        nouns::STREAM_FACTORY,
        U256::ZERO,
        "createStream(address,uint256,address,uint256,uint256)",
        encode(
            "createStream(address,uint256,address,uint256,uint256)",
            &[
                addr_word(recipient),
                uint_word(U256::from(10_000_000_000u64)),
                addr_word(nouns::USDC),
                uint_word(start),
                uint_word(stop),
            ],
        ),
    );
    let out = registry.interpret(&ctx);
    assert!(out.parameters[0].is_recipient);
    assert_eq!(out.addresses_to_resolve, vec![recipient]);

    // Seven-parameter payer-first layout: recipient at index 1.
    let ctx = TransactionContext::new(
        nouns::STREAM_FACTORY,
        U256::ZERO,
        "createStream(address,address,uint256,address,uint256,uint256,uint8)",
        encode(
            "createStream(address,address,uint256,address,uint256,uint256,uint8)",
            &[
                addr_word(payer),
                addr_word(recipient),
                uint_word(U256::from(10_000_000_000u64)),
                addr_word(nouns::USDC),
                uint_word(start),
                uint_word(stop),
                uint_word(U256::ZERO),
            ],
        ),
    );
    let out = registry.interpret(&ctx);
    assert!(out.parameters[1].is_recipient);
    assert!(!out.parameters[0].is_recipient);
    assert_eq!(out.addresses_to_resolve, vec![recipient]);
}

#[test]
fn fallback_ladder_usdc_approve_without_abi() {
    let spender = address!("1010101010101010101010101010101010101010");
    let ctx = TransactionContext::new(
        nouns::USDC,
        U256::ZERO,
        "approve(address,uint256)",
        encode(
            "approve(address,uint256)",
            &[addr_word(spender), uint_word(U256::from(1_000_000u64))],
        ),
    );
    let out = InterpreterRegistry::nouns().interpret(&ctx);

    assert_eq!(out.contract_name, "USD Coin");
    assert!(out.summary.contains("$1.00"));
    assert_eq!(out.addresses_to_resolve, vec![spender]);
}

#[test]
fn json_shape_is_stable() {
    let ctx = TransactionContext::new(nouns::AUCTION_HOUSE, U256::ZERO, "pause()", vec![]);
    let out = InterpreterRegistry::nouns().interpret(&ctx);
    let json: serde_json::Value = serde_json::to_value(&out).unwrap();

    assert_eq!(json["category"], "auction");
    assert_eq!(json["severity"], "critical");
    assert_eq!(json["contract_name"], "Nouns Auction House");
    assert_eq!(json["function_name"], "pause");
    assert!(json["parameters"].as_array().unwrap().is_empty());
}
