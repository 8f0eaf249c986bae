//! Connect API constants.

/// Header carrying the hex-encoded compressed public key derived from the
/// configured auth token.
pub const OAUTH_PUBLIC_KEY: &str = "oauth-publickey";
/// Header carrying the hex-encoded detached signature over the canonical
/// string.
pub const OAUTH_SIGNATURE: &str = "oauth-signature";
/// Header carrying the ISO-8601 UTC timestamp the signature was computed
/// with. The server bounds signature validity to a window around it.
pub const OAUTH_TIMESTAMP: &str = "oauth-timestamp";

pub(crate) const PROFILE_BASE: &str = "/v1/connect/profile";
pub(crate) const WALLET_BASE: &str = "/v1/connect/wallet";
