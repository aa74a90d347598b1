//!
//! ```rust,ignore
//! // 1. Using the builder with explicit configuration
//! let client = JiraHttpClient::builder()
//!     .host("https://your-jira.example.com")
//!     .basic_auth("username@example.com", "your_api_token")
//!     .tempo_api_rev("4")
//!     .timeout(30)
//!     .build()?;
//!
//! // 2. Using environment variables
//! let client = JiraHttpClient::builder().from_env().build()?;
//!
//! // 3. Direct shortcut for environment variables
//! let client = ClientBuilder::create_from_env()?;
//! ```
use std::env;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::{config::RestConfig, Credentials, JiraHttpClient};

/// Error type for client construction.
#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("environment variable {0} not set")]
    EnvVarNotSet(String),

    #[error("url parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("http client initialization error: {0}")]
    ClientInit(String),
}

/// Names of the environment variables recognized by
/// [`ClientBuilder::from_env`].
pub struct EnvVars;

impl EnvVars {
    pub const HOST: &'static str = "JIRA_HOST";
    pub const USER: &'static str = "JIRA_USER";
    pub const TOKEN: &'static str = "JIRA_TOKEN";
    pub const API_VERSION: &'static str = "JIRA_API_VERSION";
    pub const TEMPO_API_VERSION: &'static str = "TEMPO_API_VERSION";
}

/// Builder for [`JiraHttpClient`] instances.
#[derive(Default)]
pub struct ClientBuilder {
    host: Option<String>,
    credentials: Option<Credentials>,
    config: RestConfig,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets basic authentication credentials.
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Basic(username.into(), token.into()));
        self
    }

    /// Sets bearer token authentication.
    #[must_use]
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Bearer(token.into()));
        self
    }

    /// Sets the native API revision (default is "3").
    #[must_use]
    pub fn api_rev(mut self, rev: impl Into<String>) -> Self {
        self.config.api_rev = rev.into();
        self
    }

    /// Sets the Tempo API revision (default is "3").
    #[must_use]
    pub fn tempo_api_rev(mut self, rev: impl Into<String>) -> Self {
        self.config.tempo_api_rev = rev.into();
        self
    }

    /// Sets a request timeout in seconds.
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(seconds));
        self
    }

    /// Loads whatever configuration the environment provides.
    #[must_use]
    pub fn from_env(self) -> Self {
        let host = env::var(EnvVars::HOST).ok();
        let user = env::var(EnvVars::USER).ok();
        let token = env::var(EnvVars::TOKEN).ok();
        let api_rev = env::var(EnvVars::API_VERSION).ok();
        let tempo_api_rev = env::var(EnvVars::TEMPO_API_VERSION).ok();

        let mut builder = self;

        if let Some(host) = host {
            builder = builder.host(host);
        }

        if let Some(api_rev) = api_rev {
            builder = builder.api_rev(api_rev);
        }

        if let Some(tempo_api_rev) = tempo_api_rev {
            builder = builder.tempo_api_rev(tempo_api_rev);
        }

        if let (Some(user), Some(token)) = (user, token) {
            builder = builder.basic_auth(user, token);
        }

        builder
    }

    /// Builds a client instance with the configured parameters.
    #[allow(clippy::missing_errors_doc)]
    pub fn build(self) -> Result<JiraHttpClient, BuilderError> {
        let host = self
            .host
            .ok_or_else(|| BuilderError::EnvVarNotSet(EnvVars::HOST.to_string()))?;

        let credentials = self.credentials.ok_or_else(|| {
            BuilderError::EnvVarNotSet(format!("{} and {}", EnvVars::USER, EnvVars::TOKEN))
        })?;

        let host = Url::parse(&host)?;

        let mut client_builder = Client::builder();
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder
            .build()
            .map_err(|e| BuilderError::ClientInit(e.to_string()))?;

        let client = JiraHttpClient {
            host,
            config: self.config,
            credentials,
            client,
        };
        debug!("created jira client for {}", client.host);

        Ok(client)
    }

    /// Convenience method to create a client from environment variables.
    #[allow(clippy::missing_errors_doc)]
    pub fn create_from_env() -> Result<JiraHttpClient, BuilderError> {
        Self::new().from_env().build()
    }
}

impl JiraHttpClient {
    /// Create a client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}
