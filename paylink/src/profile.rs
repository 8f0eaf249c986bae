//! Profile endpoint wrappers.

use crate::constants::PROFILE_BASE;
use crate::types::{DataFormat, PublicProfile, UserProfile};
use crate::ConnectClient;
use http::Method;
use paylink_core::Result;
use serde_json::{json, Value};

/// Profile surface of the Connect API.
///
/// Obtained from [`ConnectClient::profile`]; each method is a single signed
/// REST call.
pub struct ProfileClient<'a> {
    client: &'a ConnectClient,
}

impl<'a> ProfileClient<'a> {
    pub(crate) fn new(client: &'a ConnectClient) -> Self {
        Self { client }
    }

    /// Fetch the authenticated user's profile.
    pub async fn current_profile(&self) -> Result<UserProfile> {
        self.client
            .request_as(
                Method::GET,
                &format!("{PROFILE_BASE}/currentUserProfile"),
                &[],
                None,
                None,
            )
            .await
    }

    /// Look up public profiles by handle.
    pub async fn public_profiles(&self, handles: &[&str]) -> Result<Vec<PublicProfile>> {
        let query: Vec<(&str, String)> = handles
            .iter()
            .map(|h| ("handles", h.to_string()))
            .collect();
        self.client
            .request_as(
                Method::GET,
                &format!("{PROFILE_BASE}/publicUserProfiles"),
                &query,
                None,
                Some("items"),
            )
            .await
    }

    /// List the authenticated user's friends.
    pub async fn friends(&self) -> Result<Vec<PublicProfile>> {
        self.client
            .request_as(
                Method::GET,
                &format!("{PROFILE_BASE}/friends"),
                &[],
                None,
                Some("items"),
            )
            .await
    }

    /// List the permissions the user granted to this app.
    pub async fn permissions(&self) -> Result<Vec<String>> {
        self.client
            .request_as(
                Method::GET,
                &format!("{PROFILE_BASE}/permissions"),
                &[],
                None,
                Some("items"),
            )
            .await
    }

    /// Fetch the user's encryption keypair, encrypted to the supplied
    /// ephemeral public key.
    ///
    /// The envelope is returned as-is; decrypting it is up to the caller's
    /// asymmetric-encryption layer.
    pub async fn encryption_keypair(&self, encryption_public_key: &str) -> Result<Value> {
        self.client
            .request(
                Method::GET,
                &format!("{PROFILE_BASE}/encryptionKeypair"),
                &[("encryptionPublicKey", encryption_public_key.to_string())],
                None,
                None,
            )
            .await
    }

    /// Ask the service to sign a piece of data with the user's identity key.
    ///
    /// Returns the hex-encoded signature, or `None` if the service answered
    /// without one.
    pub async fn sign_data(&self, value: &Value, format: DataFormat) -> Result<Option<String>> {
        self.client
            .request_as(
                Method::POST,
                &format!("{PROFILE_BASE}/signData"),
                &[],
                Some(json!({
                    "format": format.as_str(),
                    "value": value,
                })),
                Some("signature"),
            )
            .await
    }
}
