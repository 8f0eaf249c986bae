//! Core components for talking to the Paylink Connect API.
//!
//! This crate holds the transport-agnostic plumbing shared by the `paylink`
//! client: the canonical request representation that signatures are computed
//! over, the key-casing transform applied to JSON bodies on the wire, and the
//! [`Context`] seam through which HTTP requests are actually sent.
//!
//! ## Overview
//!
//! - **Context**: a container holding the `HttpSend` implementation used to
//!   dispatch requests. Defaults to a no-op that errors when called, so tests
//!   and alternative transports plug in without feature flags.
//! - **CanonicalRequest**: the deterministic text form of an outgoing request
//!   (`METHOD\nPATH[?QUERY]\nTIMESTAMP\nBODY`) used as signing input.
//! - **casing**: recursive rewrite of JSON mapping keys between the
//!   snake_case surface of this library and the camelCase wire format.
//!
//! The service-specific pieces — keypair handling, the signing middleware and
//! the endpoint wrappers — live in the `paylink` crate.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod casing;
pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod http_send;
pub use http_send::{HttpSend, NoopHttpSend};
mod error;
pub use error::{Error, ErrorKind, Result};
mod request;
pub use request::CanonicalRequest;
