//! The request-signing middleware.
//!
//! Every outgoing Connect request passes through [`RequestSigner::sign`],
//! which captures the current UTC time, rebuilds the request's canonical
//! string, signs it with the configured auth token and injects the three
//! `oauth-*` headers. Nothing is cached: two logically identical requests
//! issued back to back carry different timestamps and therefore different
//! signatures, and each must verify on its own.

use crate::constants::{OAUTH_PUBLIC_KEY, OAUTH_SIGNATURE, OAUTH_TIMESTAMP};
use crate::AuthToken;
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use paylink_core::hash::double_sha256;
use paylink_core::time::{format_iso8601_millis, now, DateTime};
use paylink_core::{CanonicalRequest, Result};

const MESSAGE_MAGIC: &[u8] = b"Bitcoin Signed Message:\n";

/// Signs outgoing requests with the Bitcoin-message scheme the Connect
/// servers verify against.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request in place.
    ///
    /// `body` must be the exact serialized text that will be transmitted
    /// (empty string for bodyless requests); the server reconstructs the
    /// canonical string from the bytes it receives, so any divergence here
    /// invalidates the signature.
    pub fn sign(&self, parts: &mut Parts, token: &AuthToken, body: &str) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let timestamp = format_iso8601_millis(now);

        let creq = CanonicalRequest::build(parts, &timestamp, body)?;
        let signing_string = creq.signing_string();
        debug!(
            "signing {} {} at {timestamp}",
            creq.method, creq.path
        );

        let signature = sign_message(token, signing_string.as_bytes());

        parts.headers.insert(
            OAUTH_PUBLIC_KEY,
            HeaderValue::from_str(&token.public_key_hex())?,
        );
        let mut sig_value = HeaderValue::from_str(&signature)?;
        sig_value.set_sensitive(true);
        parts.headers.insert(OAUTH_SIGNATURE, sig_value);
        parts
            .headers
            .insert(OAUTH_TIMESTAMP, HeaderValue::from_str(&timestamp)?);

        Ok(())
    }
}

/// Compute the digest the Bitcoin message scheme signs: a double SHA256 over
/// the magic prefix and the message, each preceded by its varint length.
///
/// Exposed so verifiers (and tests) can reconstruct the exact digest a
/// signature was produced over.
pub fn message_digest(message: &[u8]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(MESSAGE_MAGIC.len() + message.len() + 10);
    push_varint(&mut buf, MESSAGE_MAGIC.len() as u64);
    buf.extend_from_slice(MESSAGE_MAGIC);
    push_varint(&mut buf, message.len() as u64);
    buf.extend_from_slice(message);
    double_sha256(&buf)
}

/// Sign a message and return the 65-byte compact recoverable signature,
/// hex-encoded: `[27 + recovery_id + 4, r, s]`. The `+ 4` marks the
/// compressed-key header range, matching the compressed point sent in
/// `oauth-publickey`.
fn sign_message(token: &AuthToken, message: &[u8]) -> String {
    let (recovery_id, data) = token
        .sign_recoverable(message_digest(message))
        .serialize_compact();

    let mut sig = [0u8; 65];
    sig[0] = 27 + recovery_id.to_i32() as u8 + 4;
    sig[1..].copy_from_slice(&data);
    hex::encode(sig)
}

fn push_varint(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use paylink_core::time::from_unix_millis;
    use pretty_assertions::assert_eq;
    use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
    use secp256k1::{Message, SECP256K1};

    const SECRET: &str = "1111111111111111111111111111111111111111111111111111111111111111";

    fn parts(method: Method, uri: &str) -> Parts {
        let mut req = http::Request::new(());
        *req.method_mut() = method;
        *req.uri_mut() = uri.parse().expect("uri must be valid");
        req.into_parts().0
    }

    fn recover_pubkey_hex(signature_hex: &str, message: &[u8]) -> String {
        let sig = hex::decode(signature_hex).expect("signature must be hex");
        assert_eq!(sig.len(), 65, "compact recoverable signature is 65 bytes");
        let header = sig[0];
        assert!((31..=34).contains(&header), "compressed-key header range");
        let recovery_id = RecoveryId::from_i32((header - 27 - 4) as i32).unwrap();
        let sig = RecoverableSignature::from_compact(&sig[1..], recovery_id).unwrap();
        let msg = Message::from_digest(message_digest(message));
        hex::encode(SECP256K1.recover_ecdsa(&msg, &sig).unwrap().serialize())
    }

    #[test]
    fn test_sign_injects_headers() {
        let token = AuthToken::from_hex(SECRET).unwrap();
        let signer = RequestSigner::new().with_time(from_unix_millis(1672531200000));
        let mut parts = parts(
            Method::GET,
            "https://cloud.paylink.io/v1/connect/wallet/spendableBalance?currencyCode=USD",
        );

        signer.sign(&mut parts, &token, "").unwrap();

        assert_eq!(
            parts.headers[OAUTH_PUBLIC_KEY],
            token.public_key_hex().as_str()
        );
        assert_eq!(parts.headers[OAUTH_TIMESTAMP], "2023-01-01T00:00:00.000Z");
        assert!(parts.headers.contains_key(OAUTH_SIGNATURE));
    }

    #[test]
    fn test_signature_recovers_configured_pubkey() {
        let token = AuthToken::from_hex(SECRET).unwrap();
        let signer = RequestSigner::new().with_time(from_unix_millis(1672531200000));
        let body = r#"{"appAction":"tip"}"#;
        let mut parts = parts(Method::POST, "https://cloud.paylink.io/v1/connect/wallet/pay");

        signer.sign(&mut parts, &token, body).unwrap();

        let signing_string =
            format!("POST\n/v1/connect/wallet/pay\n2023-01-01T00:00:00.000Z\n{body}");
        let sig = parts.headers[OAUTH_SIGNATURE].to_str().unwrap();
        assert_eq!(
            recover_pubkey_hex(sig, signing_string.as_bytes()),
            token.public_key_hex()
        );
    }

    #[test]
    fn test_fresh_signature_per_call() {
        let token = AuthToken::from_hex(SECRET).unwrap();
        let mut first = parts(
            Method::GET,
            "https://cloud.paylink.io/v1/connect/profile/currentUserProfile",
        );
        let mut second = parts(
            Method::GET,
            "https://cloud.paylink.io/v1/connect/profile/currentUserProfile",
        );

        RequestSigner::new()
            .with_time(from_unix_millis(1672531200000))
            .sign(&mut first, &token, "")
            .unwrap();
        RequestSigner::new()
            .with_time(from_unix_millis(1672531200001))
            .sign(&mut second, &token, "")
            .unwrap();

        // Different timestamps mean different signatures, but each verifies
        // against its own canonical-string reconstruction.
        assert_ne!(
            first.headers[OAUTH_SIGNATURE],
            second.headers[OAUTH_SIGNATURE]
        );
        for p in [&first, &second] {
            let ts = p.headers[OAUTH_TIMESTAMP].to_str().unwrap();
            let signing_string =
                format!("GET\n/v1/connect/profile/currentUserProfile\n{ts}\n");
            let sig = p.headers[OAUTH_SIGNATURE].to_str().unwrap();
            assert_eq!(
                recover_pubkey_hex(sig, signing_string.as_bytes()),
                token.public_key_hex()
            );
        }
    }

    #[test]
    fn test_varint_boundaries() {
        let mut buf = Vec::new();
        push_varint(&mut buf, 0xfc);
        assert_eq!(buf, vec![0xfc]);

        buf.clear();
        push_varint(&mut buf, 0xfd);
        assert_eq!(buf, vec![0xfd, 0xfd, 0x00]);

        buf.clear();
        push_varint(&mut buf, 0x1_0000);
        assert_eq!(buf, vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
    }
}
