use crate::http_send::{HttpSend, NoopHttpSend};
use crate::Result;
use bytes::Bytes;
use std::fmt::Debug;
use std::sync::Arc;

/// Context carries the transport used to dispatch signed requests.
///
/// paylink provides no default transport here. An unconfigured context uses a
/// no-op implementation that errors when called; the `paylink` crate wires in
/// its reqwest-backed sender, and tests substitute in-memory fakes.
///
/// ## Example
///
/// ```
/// use paylink_core::Context;
///
/// let ctx = Context::new();
/// // ctx.with_http_send(my_transport)
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("http", &self.http).finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with a no-op transport.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
        }
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Send http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }
}
