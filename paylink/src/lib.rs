//! Client SDK for the Paylink Connect payment API.
//!
//! Every call goes through a signed HTTPS pipeline: the outgoing JSON body is
//! rewritten from snake_case to the wire's camelCase, the request's canonical
//! string is signed with a secp256k1 key derived from the caller-supplied
//! auth token, the `oauth-publickey` / `oauth-signature` / `oauth-timestamp`
//! headers are attached, and the response body is rewritten back to
//! snake_case before being mapped to a typed result or error.
//!
//! ## Example
//!
//! ```no_run
//! use paylink::{AuthToken, ConnectClient, Environment};
//!
//! # async fn example() -> paylink::Result<()> {
//! let token = AuthToken::from_hex(std::env::var("PAYLINK_AUTH_TOKEN").unwrap())?;
//! let client = ConnectClient::new(token, Environment::Production);
//!
//! let balance = client.wallet().spendable_balance(Some("USD")).await?;
//! println!(
//!     "{} sat ({} {})",
//!     balance.spendable_satoshi_balance,
//!     balance.spendable_fiat_balance,
//!     balance.currency_code,
//! );
//! # Ok(())
//! # }
//! ```
//!
//! To send a user through app authorization, build the redirect URL from the
//! environment:
//!
//! ```
//! use paylink::Environment;
//!
//! let url = Environment::Production.authorize_url("12345", &[]);
//! assert!(url.contains("appId=12345"));
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod constants;
pub mod signer;
pub mod types;

mod client;
pub use client::ConnectClient;
mod environment;
pub use environment::Environment;
mod keypair;
pub use keypair::AuthToken;
mod profile;
pub use profile::ProfileClient;
mod response;
mod transport;
pub use transport::ReqwestHttpSend;
mod wallet;
pub use wallet::WalletClient;

pub use paylink_core::{Context, Error, ErrorKind, HttpSend, Result};
