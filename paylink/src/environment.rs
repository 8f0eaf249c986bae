//! Deployment environments of the Connect API.

use paylink_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A named Connect deployment.
///
/// Each environment maps to a fixed pair of hosts: the API endpoint that
/// signed requests go to, and the browser-facing endpoint used for the
/// authorization redirect. The table is read-only for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// The production deployment.
    #[default]
    Production,
    /// The public beta deployment.
    Beta,
    /// The internal acceptance environment.
    Iae,
}

impl Environment {
    /// Base URL of the REST API for this environment.
    pub fn api_endpoint(&self) -> &'static str {
        match self {
            Environment::Production => "https://cloud.paylink.io",
            Environment::Beta => "https://beta-cloud.paylink.io",
            Environment::Iae => "https://iae.cloud.paylink.io",
        }
    }

    /// Base URL of the browser-facing client for this environment.
    pub fn client_endpoint(&self) -> &'static str {
        match self {
            Environment::Production => "https://app.paylink.io",
            Environment::Beta => "https://beta-app.paylink.io",
            Environment::Iae => "https://iae-app.paylink.io",
        }
    }

    /// Build the URL a user should be redirected to in order to authorize an
    /// application.
    ///
    /// Produces `{client_endpoint}/#/authorizeApp?appId={app_id}` plus one
    /// `&key=value` pair per extra parameter, form-urlencoded.
    pub fn authorize_url(&self, app_id: &str, extra_params: &[(&str, &str)]) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("appId", app_id);
        for (k, v) in extra_params {
            serializer.append_pair(k, v);
        }
        format!("{}/#/authorizeApp?{}", self.client_endpoint(), serializer.finish())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Beta => write!(f, "beta"),
            Environment::Iae => write!(f, "iae"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "production" | "prod" => Ok(Environment::Production),
            "beta" => Ok(Environment::Beta),
            "iae" => Ok(Environment::Iae),
            _ => Err(Error::request_invalid(format!("unknown environment: {s}"))),
        }
    }
}
