//! Auth token handling.

use paylink_core::utils::Redact;
use paylink_core::{Error, Result};
use secp256k1::ecdsa::RecoverableSignature;
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};
use std::fmt::{Debug, Formatter};

/// The caller-supplied signing credential: a hex-encoded secp256k1 secret.
///
/// Decoding happens eagerly so a malformed token fails at construction, long
/// before any network activity. The derived public key is fixed for the
/// lifetime of the token and travels with every signed request in the
/// `oauth-publickey` header.
#[derive(Clone)]
pub struct AuthToken {
    token_hex: String,
    secret: SecretKey,
    public: PublicKey,
}

impl AuthToken {
    /// Decode a hex-encoded secret into an auth token.
    ///
    /// Fails with a credential error if the input is not valid hex or does
    /// not decode to a valid secp256k1 scalar.
    pub fn from_hex(token_hex: impl Into<String>) -> Result<Self> {
        let token_hex = token_hex.into();
        let bytes = hex::decode(&token_hex)?;
        let secret = SecretKey::from_slice(&bytes)
            .map_err(|e| Error::credential_invalid("auth token is not a valid secret key").with_source(e))?;
        let public = PublicKey::from_secret_key(SECP256K1, &secret);

        Ok(Self {
            token_hex,
            secret,
            public,
        })
    }

    /// Hex-encoded 33-byte compressed public key matching this token.
    ///
    /// Deterministic: the same token always yields the same string.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public.serialize())
    }

    /// The public key as a secp256k1 point.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Produce a recoverable ECDSA signature over a 32-byte digest.
    pub(crate) fn sign_recoverable(&self, digest: [u8; 32]) -> RecoverableSignature {
        SECP256K1.sign_ecdsa_recoverable(&Message::from_digest(digest), &self.secret)
    }
}

impl Debug for AuthToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &Redact::from(&self.token_hex))
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}
