mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use wallet_bridge::config::BridgeConfig;
use wallet_bridge::services::stdio::{self, HostSummary};
use wallet_bridge::WalletBridge;

use common::{EchoProvider, GatedProvider};

fn output_lines(out: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(out)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn host_relays_json_lines() {
    let input = concat!(
        r#"{"msg": {"method": "eth_accounts", "id": 0}, "id": 1}"#,
        "\n",
        "garbage\n",
        "\n",
        r#"{"msg": {"method": "eth_chainId"}, "id": "two"}"#,
        "\n",
    );
    let bridge = WalletBridge::with_provider(Some(Arc::new(EchoProvider)), &BridgeConfig::default());
    let mut out = Vec::new();

    let summary = stdio::run(input.as_bytes(), &mut out, bridge).await.unwrap();
    assert_eq!(
        summary,
        HostSummary {
            forwarded: 2,
            delivered: 2,
            skipped: 2,
        }
    );

    let mut lines = output_lines(&out);
    lines.sort_by_key(|line| line["id"].is_string());
    assert_eq!(
        lines,
        vec![
            json!({"id": 1, "msg": {"echo": {"method": "eth_accounts", "id": 1}}}),
            json!({"id": "two", "msg": {"echo": {"method": "eth_chainId", "id": "two"}}}),
        ]
    );
}

#[tokio::test]
async fn host_without_provider_writes_nothing() {
    let input = "{\"msg\": {\"method\": \"eth_accounts\"}, \"id\": 1}\n";
    let bridge = WalletBridge::with_provider(None, &BridgeConfig::default());
    let mut out = Vec::new();

    let summary = stdio::run(input.as_bytes(), &mut out, bridge).await.unwrap();
    assert_eq!(summary.forwarded, 1);
    assert_eq!(summary.delivered, 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn invalid_utf8_line_is_skipped_not_fatal() {
    let mut input = Vec::new();
    input.extend_from_slice(br#"{"msg": {"method": "a"}, "id": 1}"#);
    input.push(b'\n');
    input.extend_from_slice(&[0xff, 0xfe, b'\n']);
    input.extend_from_slice(br#"{"msg": {"method": "b"}, "id": 2}"#);
    input.push(b'\n');

    let bridge = WalletBridge::with_provider(Some(Arc::new(EchoProvider)), &BridgeConfig::default());
    let mut out = Vec::new();

    let summary = stdio::run(&input[..], &mut out, bridge).await.unwrap();
    assert_eq!(
        summary,
        HostSummary {
            forwarded: 2,
            delivered: 2,
            skipped: 1,
        }
    );

    let mut ids: Vec<u64> = output_lines(&out)
        .iter()
        .map(|line| line["id"].as_u64().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn final_line_without_newline_is_forwarded() {
    let input = r#"{"msg": {"method": "eth_accounts"}, "id": 5}"#;
    let bridge = WalletBridge::with_provider(Some(Arc::new(EchoProvider)), &BridgeConfig::default());
    let mut out = Vec::new();

    let summary = stdio::run(input.as_bytes(), &mut out, bridge).await.unwrap();
    assert_eq!(summary.forwarded, 1);
    assert_eq!(summary.delivered, 1);
    assert_eq!(output_lines(&out)[0]["id"], json!(5));
}

#[tokio::test]
async fn host_waits_for_responses_after_input_closes() {
    let provider = Arc::new(GatedProvider::new());
    let gate = provider.gate(1).await;
    let bridge = WalletBridge::with_provider(Some(provider), &BridgeConfig::default());
    let input = r#"{"msg": {"method": "eth_requestAccounts"}, "id": 1}"#.to_string() + "\n";
    let mut out = Vec::new();

    {
        let mut host = Box::pin(stdio::run(input.as_bytes(), &mut out, bridge));
        let early = tokio::time::timeout(Duration::from_millis(50), &mut host).await;
        assert!(early.is_err());

        gate.send(Ok(json!(["0xabc"]))).unwrap();
        let summary = host.await.unwrap();
        assert_eq!(
            summary,
            HostSummary {
                forwarded: 1,
                delivered: 1,
                skipped: 0,
            }
        );
    }

    assert_eq!(
        output_lines(&out),
        vec![json!({"id": 1, "msg": ["0xabc"]})]
    );
}
