//! reqwest-backed transport.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use paylink_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};

/// [`HttpSend`] implementation on top of `reqwest`.
///
/// Network-level failures (DNS, connection refused, timeout) surface as
/// transport errors and are never retried here; timeout policy belongs to the
/// `reqwest::Client` the caller passes in.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend from a preconfigured `reqwest::Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid(e.to_string()).with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport(e.to_string()).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport(e.to_string()).with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
