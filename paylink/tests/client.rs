//! End-to-end pipeline tests against an in-memory transport.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response, StatusCode};
use paylink::signer::message_digest;
use paylink::types::{PaymentParams, PaymentRequestItem};
use paylink::{
    AuthToken, ConnectClient, Context, Environment, ErrorKind, HttpSend, Result,
};
use pretty_assertions::assert_eq;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SECP256K1};
use serde_json::json;
use std::sync::{Arc, Mutex};

const SECRET: &str = "1111111111111111111111111111111111111111111111111111111111111111";

/// Transport fake: captures the outgoing request and answers with a canned
/// status and body.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    body: String,
    captured: Arc<Mutex<Option<Request<Bytes>>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            captured: Arc::new(Mutex::new(None)),
        }
    }

    fn captured(&self) -> Request<Bytes> {
        self.captured
            .lock()
            .expect("lock poisoned")
            .take()
            .expect("no request captured")
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        *self.captured.lock().expect("lock poisoned") = Some(req);
        Ok(Response::builder()
            .status(self.status)
            .body(Bytes::from(self.body.clone()))?)
    }
}

/// Transport fake that fails at the network level.
#[derive(Debug)]
struct FailingHttpSend;

#[async_trait]
impl HttpSend for FailingHttpSend {
    async fn http_send(&self, _req: Request<Bytes>) -> Result<Response<Bytes>> {
        Err(paylink::Error::transport("connection refused"))
    }
}

fn client_with(mock: MockHttpSend) -> ConnectClient {
    let _ = env_logger::builder().is_test(true).try_init();
    let ctx = Context::new().with_http_send(mock);
    let token = AuthToken::from_hex(SECRET).unwrap();
    ConnectClient::with_context(ctx, token, Environment::Production)
}

/// Recover the signer's public key from a captured request, using the same
/// canonical-string reconstruction rule the server applies.
fn recovered_pubkey_hex(req: &Request<Bytes>) -> String {
    let timestamp = req.headers()["oauth-timestamp"].to_str().unwrap();
    let paq = req.uri().path_and_query().unwrap().as_str();
    let body = std::str::from_utf8(req.body()).unwrap();
    let signing_string = format!("{}\n{paq}\n{timestamp}\n{body}", req.method());

    let sig = hex::decode(req.headers()["oauth-signature"].to_str().unwrap()).unwrap();
    let recovery_id = RecoveryId::from_i32((sig[0] - 27 - 4) as i32).unwrap();
    let sig = RecoverableSignature::from_compact(&sig[1..], recovery_id).unwrap();
    let msg = Message::from_digest(message_digest(signing_string.as_bytes()));
    hex::encode(SECP256K1.recover_ecdsa(&msg, &sig).unwrap().serialize())
}

#[tokio::test]
async fn test_current_profile_signed_and_decoded() {
    let mock = MockHttpSend::new(
        StatusCode::OK,
        json!({
            "publicProfile": {
                "id": "u1",
                "handle": "alice",
                "displayName": "Alice",
                "avatarUrl": "https://cloud.paylink.io/a.png",
                "localCurrencyCode": "USD",
            },
            "privateProfile": {"email": "alice@example.com", "phoneNumber": null},
        })
        .to_string(),
    );
    let client = client_with(mock.clone());

    let profile = client.profile().current_profile().await.unwrap();
    assert_eq!(profile.public_profile.handle, "alice");
    assert_eq!(
        profile.public_profile.display_name.as_deref(),
        Some("Alice")
    );
    assert_eq!(
        profile.private_profile.unwrap().email.as_deref(),
        Some("alice@example.com")
    );

    let req = mock.captured();
    assert_eq!(
        req.uri().to_string(),
        "https://cloud.paylink.io/v1/connect/profile/currentUserProfile"
    );
    assert_eq!(
        req.headers()["oauth-publickey"].to_str().unwrap(),
        client.public_key_hex()
    );
    assert_eq!(recovered_pubkey_hex(&req), client.public_key_hex());
}

#[tokio::test]
async fn test_pay_renames_and_camelizes_body() {
    let mock = MockHttpSend::new(
        StatusCode::OK,
        json!({
            "transactionId": "tx1",
            "appAction": "tip",
            "time": 1672531200,
            "satoshiAmount": 1000,
            "satoshiFees": 10,
            "participants": [
                {"type": "user", "alias": "bob", "displayName": "Bob"}
            ],
        })
        .to_string(),
    );
    let client = client_with(mock.clone());

    let result = client
        .wallet()
        .pay(PaymentParams {
            description: Some("coffee".to_string()),
            app_action: "tip".to_string(),
            payments: vec![PaymentRequestItem {
                destination: "bob".to_string(),
                currency_code: "USD".to_string(),
                send_amount: 0.25,
            }],
            attachment: None,
        })
        .await
        .unwrap();

    assert_eq!(result.transaction_id, "tx1");
    assert_eq!(result.participants[0].kind, "user");
    assert_eq!(result.participants[0].alias, "bob");

    let req = mock.captured();
    assert_eq!(
        req.uri().to_string(),
        "https://cloud.paylink.io/v1/connect/wallet/pay"
    );
    let sent: serde_json::Value = serde_json::from_slice(req.body()).unwrap();
    assert_eq!(
        sent,
        json!({
            "appAction": "tip",
            "description": "coffee",
            "receivers": [
                {"destination": "bob", "currencyCode": "USD", "sendAmount": 0.25}
            ],
        })
    );
    // The signature covers the exact transmitted body.
    assert_eq!(recovered_pubkey_hex(&req), client.public_key_hex());
}

#[tokio::test]
async fn test_projection_key_unwraps_items() {
    let mock = MockHttpSend::new(
        StatusCode::OK,
        json!({
            "items": [
                {"id": "u2", "handle": "bob", "displayName": "Bob"},
                {"id": "u3", "handle": "carol"},
            ],
        })
        .to_string(),
    );
    let client = client_with(mock.clone());

    let friends = client.profile().friends().await.unwrap();
    assert_eq!(friends.len(), 2);
    assert_eq!(friends[0].handle, "bob");
    assert_eq!(friends[1].display_name, None);
}

#[tokio::test]
async fn test_public_profiles_query_is_signed() {
    let mock = MockHttpSend::new(StatusCode::OK, json!({"items": []}).to_string());
    let client = client_with(mock.clone());

    let profiles = client
        .profile()
        .public_profiles(&["alice", "bob"])
        .await
        .unwrap();
    assert!(profiles.is_empty());

    let req = mock.captured();
    assert_eq!(
        req.uri().query().unwrap(),
        "handles=alice&handles=bob"
    );
    assert_eq!(recovered_pubkey_hex(&req), client.public_key_hex());
}

#[tokio::test]
async fn test_payment_lookup_query_is_signed() {
    let mock = MockHttpSend::new(
        StatusCode::OK,
        json!({
            "transactionId": "tx9",
            "appAction": "tip",
            "time": 1672531200,
            "satoshiAmount": 500,
            "satoshiFees": 5,
            "participants": [],
        })
        .to_string(),
    );
    let client = client_with(mock.clone());

    let payment = client.wallet().payment("tx9").await.unwrap();
    assert_eq!(payment.transaction_id, "tx9");

    let req = mock.captured();
    assert_eq!(
        req.uri().to_string(),
        "https://cloud.paylink.io/v1/connect/wallet/payment?transactionId=tx9"
    );
    assert_eq!(recovered_pubkey_hex(&req), client.public_key_hex());
}

#[tokio::test]
async fn test_encryption_keypair_query_is_signed() {
    let mock = MockHttpSend::new(
        StatusCode::OK,
        json!({"encryptedPublicKeyEncrypted": "aa", "encryptedPrivateKeyEncrypted": "bb"})
            .to_string(),
    );
    let client = client_with(mock.clone());

    let envelope = client
        .profile()
        .encryption_keypair("02aabb")
        .await
        .unwrap();
    assert_eq!(envelope["encrypted_public_key_encrypted"], "aa");

    let req = mock.captured();
    assert_eq!(
        req.uri().to_string(),
        "https://cloud.paylink.io/v1/connect/profile/encryptionKeypair?encryptionPublicKey=02aabb"
    );
    assert_eq!(recovered_pubkey_hex(&req), client.public_key_hex());
}

#[tokio::test]
async fn test_cloned_client_signs_requests() {
    let mock = MockHttpSend::new(StatusCode::OK, json!({"items": []}).to_string());
    let client = client_with(mock.clone());
    let cloned = client.clone();

    let permissions: Vec<String> = cloned.profile().permissions().await.unwrap();
    assert!(permissions.is_empty());

    let req = mock.captured();
    assert_eq!(recovered_pubkey_hex(&req), cloned.public_key_hex());
    assert_eq!(cloned.public_key_hex(), client.public_key_hex());
}

#[tokio::test]
async fn test_sign_data_projects_signature() {
    let mock = MockHttpSend::new(
        StatusCode::OK,
        json!({"signature": "deadbeef"}).to_string(),
    );
    let client = client_with(mock.clone());

    let signature = client
        .profile()
        .sign_data(&json!("hello"), paylink::types::DataFormat::Utf8)
        .await
        .unwrap();
    assert_eq!(signature.as_deref(), Some("deadbeef"));

    let req = mock.captured();
    let sent: serde_json::Value = serde_json::from_slice(req.body()).unwrap();
    assert_eq!(sent, json!({"format": "utf-8", "value": "hello"}));
}

#[tokio::test]
async fn test_sign_data_tolerates_missing_signature() {
    let mock = MockHttpSend::new(StatusCode::OK, json!({}).to_string());
    let client = client_with(mock);

    let signature = client
        .profile()
        .sign_data(&json!("hello"), paylink::types::DataFormat::Hex)
        .await
        .unwrap();
    assert_eq!(signature, None);
}

#[tokio::test]
async fn test_api_error_surfaces_fields() {
    let mock = MockHttpSend::new(
        StatusCode::BAD_REQUEST,
        json!({"message": "test", "info": 123}).to_string(),
    );
    let client = client_with(mock);

    let err = client
        .wallet()
        .spendable_balance(Some("USD"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "test");
    assert_eq!(err.info(), Some(&json!(123)));
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_transport_error_passes_through() {
    let _ = env_logger::builder().is_test(true).try_init();
    let ctx = Context::new().with_http_send(FailingHttpSend);
    let token = AuthToken::from_hex(SECRET).unwrap();
    let client = ConnectClient::with_context(ctx, token, Environment::Beta);

    let err = client.wallet().exchange_rate("USD").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_two_calls_sign_independently() {
    let mock = MockHttpSend::new(StatusCode::OK, json!({"items": []}).to_string());
    let client = client_with(mock.clone());

    client.profile().permissions().await.unwrap();
    let first = mock.captured();
    client.profile().permissions().await.unwrap();
    let second = mock.captured();

    // Each request got its own timestamp and signature, and each recovers
    // the same configured key.
    assert_eq!(recovered_pubkey_hex(&first), client.public_key_hex());
    assert_eq!(recovered_pubkey_hex(&second), client.public_key_hex());
    if first.headers()["oauth-timestamp"] != second.headers()["oauth-timestamp"] {
        assert_ne!(
            first.headers()["oauth-signature"],
            second.headers()["oauth-signature"]
        );
    }
}
