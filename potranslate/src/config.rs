//! Configuration of the remote translation client.

use std::{fmt, time::Duration};

use crate::error::Error;

pub const PRODUCTION_URL: &str = "https://api.gengo.com/v2/";
pub const SANDBOX_URL: &str = "https://api.sandbox.gengo.com/v2/";

/// Environment variables consulted when keys are not given on the command line.
pub const PUBLIC_KEY_ENV: &str = "GENGO_PUBLIC_KEY";
pub const PRIVATE_KEY_ENV: &str = "GENGO_PRIVATE_KEY";

/// API key pair. The private key never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub public_key: String,
    pub private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Credentials {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Builds credentials from optional inputs. Both keys are required; an
    /// empty string counts as missing.
    pub fn resolve(public_key: Option<String>, private_key: Option<String>) -> Result<Self, Error> {
        let public_key = public_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingCredential("public key"))?;
        let private_key = private_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingCredential("private key"))?;
        Ok(Credentials::new(public_key, private_key))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Which API deployment requests go to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Endpoint {
    #[default]
    Production,
    Sandbox,
    /// Any other base URL, e.g. a local test server.
    Custom(String),
}

impl Endpoint {
    pub fn from_sandbox(sandbox: bool) -> Self {
        if sandbox {
            Endpoint::Sandbox
        } else {
            Endpoint::Production
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            Endpoint::Production => PRODUCTION_URL,
            Endpoint::Sandbox => SANDBOX_URL,
            Endpoint::Custom(url) => url,
        }
    }
}

/// Everything needed to construct a [`crate::api::GengoClient`].
///
/// TLS certificates are always verified. `https_only` additionally refuses
/// cleartext URLs and is on unless explicitly disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub endpoint: Endpoint,
    pub user_agent: String,
    pub https_only: bool,
    /// Request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        ClientConfig {
            credentials,
            endpoint: Endpoint::default(),
            user_agent: format!("potranslate/{}", env!("CARGO_PKG_VERSION")),
            https_only: true,
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_sandbox(self, sandbox: bool) -> Self {
        self.with_endpoint(Endpoint::from_sandbox(sandbox))
    }

    pub fn with_https_only(mut self, https_only: bool) -> Self {
        self.https_only = https_only;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
