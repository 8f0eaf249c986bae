//! The Connect client and its request pipeline.

use crate::environment::Environment;
use crate::keypair::AuthToken;
use crate::profile::ProfileClient;
use crate::response::unwrap_response;
use crate::signer::RequestSigner;
use crate::transport::ReqwestHttpSend;
use crate::wallet::WalletClient;
use bytes::Bytes;
use http::{header, Method};
use log::debug;
use paylink_core::casing::{camelize_keys, snakeify_keys};
use paylink_core::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Client for the Connect API.
///
/// Immutable once constructed and cheap to clone; every call derives a fresh
/// timestamp and signature, so a single client is safe to share across tasks.
///
/// ## Example
///
/// ```no_run
/// # async fn example() -> paylink::Result<()> {
/// use paylink::{AuthToken, ConnectClient, Environment};
///
/// let token = AuthToken::from_hex("...")?;
/// let client = ConnectClient::new(token, Environment::Production);
///
/// let profile = client.profile().current_profile().await?;
/// println!("signed in as {}", profile.public_profile.handle);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConnectClient {
    ctx: Context,
    environment: Environment,
    auth_token: AuthToken,
    signer: RequestSigner,
}

impl ConnectClient {
    /// Create a client with the default reqwest transport.
    pub fn new(auth_token: AuthToken, environment: Environment) -> Self {
        let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
        Self::with_context(ctx, auth_token, environment)
    }

    /// Create a client on top of an explicit [`Context`].
    ///
    /// This is how tests and alternative transports plug in.
    pub fn with_context(ctx: Context, auth_token: AuthToken, environment: Environment) -> Self {
        Self {
            ctx,
            environment,
            auth_token,
            signer: RequestSigner::new(),
        }
    }

    /// The environment this client talks to.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Hex-encoded public key this client authenticates as.
    pub fn public_key_hex(&self) -> String {
        self.auth_token.public_key_hex()
    }

    /// Profile endpoints.
    pub fn profile(&self) -> ProfileClient<'_> {
        ProfileClient::new(self)
    }

    /// Wallet endpoints.
    pub fn wallet(&self) -> WalletClient<'_> {
        WalletClient::new(self)
    }

    /// Issue one signed request through the full pipeline:
    /// camelize body keys, sign, send, snakeify response keys, map by status.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        project: Option<&str>,
    ) -> Result<Value> {
        let uri = self.build_uri(path, query);

        let body_text = match body {
            Some(value) => serde_json::to_string(&camelize_keys(value))?,
            None => String::new(),
        };

        let mut builder = http::Request::builder().method(method).uri(&uri);
        if !body_text.is_empty() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let req = builder.body(Bytes::from(body_text.clone()))?;

        let (mut parts, body_bytes) = req.into_parts();
        self.signer.sign(&mut parts, &self.auth_token, &body_text)?;

        debug!("dispatching {} {uri}", parts.method);
        let resp = self
            .ctx
            .http_send(http::Request::from_parts(parts, body_bytes))
            .await?;

        let (parts, bytes) = resp.into_parts();
        debug!("{uri} answered {}", parts.status);

        let decoded: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        unwrap_response(parts.status, snakeify_keys(decoded), project)
    }

    /// Like [`request`](Self::request), deserializing the mapped value.
    pub(crate) async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        project: Option<&str>,
    ) -> Result<T> {
        let value = self.request(method, path, query, body, project).await?;
        Ok(serde_json::from_value(value)?)
    }

    fn build_uri(&self, path: &str, query: &[(&str, String)]) -> String {
        let base = self.environment.api_endpoint();
        if query.is_empty() {
            return format!("{base}{path}");
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in query {
            serializer.append_pair(k, v);
        }
        format!("{base}{path}?{}", serializer.finish())
    }
}
