use crate::{Error, Result};
use http::uri::PathAndQuery;
use http::Method;

/// The deterministic text form of an outgoing request that signatures are
/// computed over.
///
/// The verifying server rebuilds this string from the request it receives and
/// the `oauth-timestamp` header, so every field must match byte-for-byte:
/// path and query are taken verbatim from the request URI with no
/// percent-decoding or normalization, and the body is the exact serialized
/// text that goes on the wire (empty string when there is none).
///
/// This value only lives for the duration of one signing pass and is never
/// exposed through the client API.
#[derive(Debug)]
pub struct CanonicalRequest {
    /// HTTP method.
    pub method: Method,
    /// URI path component, verbatim.
    pub path: String,
    /// Raw query string, verbatim, without the leading `?`. `None` when the
    /// URI carries no query.
    pub query: Option<String>,
    /// ISO-8601 UTC timestamp, identical to the `oauth-timestamp` header.
    pub timestamp: String,
    /// Serialized request body, or empty string.
    pub body: String,
}

impl CanonicalRequest {
    /// Build a canonical request from http::request::Parts plus the already
    /// serialized body text and the signing timestamp.
    pub fn build(
        parts: &http::request::Parts,
        timestamp: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let paq = parts
            .uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        if parts.uri.authority().is_none() {
            return Err(Error::request_invalid(
                "request without authority is invalid for signing",
            ));
        }

        Ok(CanonicalRequest {
            method: parts.method.clone(),
            path: paq.path().to_string(),
            query: paq.query().map(|q| q.to_string()),
            timestamp: timestamp.into(),
            body: body.into(),
        })
    }

    /// Produce the newline-joined signing string:
    ///
    /// ```text
    /// METHOD
    /// PATH[?QUERY]
    /// TIMESTAMP
    /// BODY
    /// ```
    ///
    /// The `?` separator is emitted only when a query string is present.
    pub fn signing_string(&self) -> String {
        let mut s = String::with_capacity(
            self.method.as_str().len()
                + self.path.len()
                + self.query.as_ref().map(|q| q.len() + 1).unwrap_or(0)
                + self.timestamp.len()
                + self.body.len()
                + 3,
        );

        s.push_str(self.method.as_str());
        s.push('\n');
        s.push_str(&self.path);
        if let Some(query) = &self.query {
            s.push('?');
            s.push_str(query);
        }
        s.push('\n');
        s.push_str(&self.timestamp);
        s.push('\n');
        s.push_str(&self.body);
        s
    }
}
