//!
//! `jira_tempo` is a typed object model for Jira's work log REST endpoint
//! and the endpoint exposed by the Tempo timesheet plugin.
//!
//! The two dialects return partially overlapping JSON payloads describing
//! the same kind of record. This crate normalises them into immutable,
//! comparable domain values: null safe field extraction, date/time parsing
//! across the two wire formats, and the content based duplicate detection
//! needed to reconcile records fetched from both sources.
//!
//! All requests go through the [`RestClient`] collaborator; a default
//! implementation backed by a blocking HTTP client is provided. Every
//! operation is a single synchronous request/response exchange, with no
//! caching, batching or retries at this layer.
use std::{
    collections::BTreeMap,
    error::Error,
    fmt::{self, Formatter},
};

use log::debug;
use reqwest::{
    blocking::{Client, RequestBuilder},
    header::{ACCEPT, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::RestConfig;

pub mod builder;
pub mod config;
pub mod fields;
pub mod models;
pub mod tempo;

pub type Result<T> = std::result::Result<T, JiraError>;

/// Error body returned by Jira alongside 4xx responses.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Errors {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

/// Failure of the transport layer itself: the request never produced a
/// usable JSON payload.
#[derive(Debug)]
pub enum RestError {
    Unauthorized,
    MethodNotAllowed,
    NotFound(String),
    Fault { code: StatusCode, errors: Errors },
    Request(reqwest::Error),
    Serialization(serde_json::error::Error),
    UriParse(url::ParseError),
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RestError::Unauthorized => write!(f, "credentials were rejected"),
            RestError::MethodNotAllowed => write!(f, "method not allowed on this resource"),
            RestError::NotFound(uri) => write!(f, "not found: '{uri}'"),
            RestError::Fault { code, errors } => write!(f, "rest fault ({code}):\n{errors:#?}"),
            RestError::Request(e) => write!(f, "http request failed: {e}"),
            RestError::Serialization(e) => write!(f, "could not serialize/deserialize: {e}"),
            RestError::UriParse(e) => write!(f, "could not build request uri: {e}"),
        }
    }
}

impl Error for RestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RestError::Request(e) => Some(e),
            RestError::Serialization(e) => Some(e),
            RestError::UriParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RestError {
    fn from(error: reqwest::Error) -> RestError {
        RestError::Request(error)
    }
}

impl From<serde_json::error::Error> for RestError {
    fn from(error: serde_json::error::Error) -> RestError {
        RestError::Serialization(error)
    }
}

impl From<url::ParseError> for RestError {
    fn from(error: url::ParseError) -> RestError {
        RestError::UriParse(error)
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
///
/// ```mermaid
/// graph LR
///     c([Caller]) --> w[[Worklog / TempoWorklog]]
///     w --> r[[RestClient]]
///     r -. JSON tree .-> x[[field codec]]
///     x --> d([typed domain value])
/// ```
///
/// Domain level failure of a work log operation.
///
/// `Transport` wraps an underlying [`RestError`] with a human readable
/// context. `MalformedPayload` means the response parsed as JSON but did
/// not have the expected shape, so there is no underlying cause to carry.
/// `DateParse` surfaces a timestamp that did not match its family's wire
/// format; there is no fallback value for it.
#[derive(Debug)]
pub enum JiraError {
    Transport { context: String, source: RestError },
    MalformedPayload(&'static str),
    DateParse { value: String, source: chrono::ParseError },
}

impl fmt::Display for JiraError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JiraError::Transport { context, source } => write!(f, "{context}: {source}"),
            JiraError::MalformedPayload(expected) => {
                write!(f, "JSON payload is malformed, expected {expected}")
            }
            JiraError::DateParse { value, .. } => {
                write!(f, "could not parse date/time '{value}'")
            }
        }
    }
}

impl Error for JiraError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            JiraError::Transport { source, .. } => Some(source),
            JiraError::MalformedPayload(_) => None,
            JiraError::DateParse { source, .. } => Some(source),
        }
    }
}

impl JiraError {
    pub(crate) fn transport(context: impl Into<String>, source: RestError) -> JiraError {
        JiraError::Transport {
            context: context.into(),
            source,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Credentials {
    Anonymous,
    Basic(String, String),
    Bearer(String),
}

impl Credentials {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Anonymous => request,
            Credentials::Basic(ref user, ref pass) => {
                request.basic_auth(user.to_owned(), Some(pass.to_owned()))
            }
            Credentials::Bearer(ref token) => request.bearer_auth(token.to_owned()),
        }
    }
}

/// The transport collaborator every operation in this crate goes through.
///
/// Implementations own the host, the credentials and the [`RestConfig`]
/// governing base URI construction. The object model only ever sees JSON
/// trees and fully built URIs.
pub trait RestClient {
    /// Revision configuration for the resource families.
    fn config(&self) -> &RestConfig;

    /// Resolves `path` against the host and appends the given query
    /// parameters, percent encoded.
    fn build_uri(&self, path: &str, params: &[(&str, &str)]) -> std::result::Result<Url, RestError>;

    fn get(&self, uri: &Url) -> std::result::Result<Value, RestError>;

    fn post(&self, uri: &Url, body: &Value) -> std::result::Result<Value, RestError>;

    fn delete(&self, uri: &Url) -> std::result::Result<(), RestError>;
}

/// Default [`RestClient`] backed by a blocking HTTP client.
#[derive(Clone)]
pub struct JiraHttpClient {
    host: Url,
    config: RestConfig,
    credentials: Credentials,
    client: Client,
}

impl JiraHttpClient {
    #[allow(clippy::missing_errors_doc)]
    pub fn new<H>(host: H, credentials: Credentials) -> std::result::Result<JiraHttpClient, RestError>
    where
        H: Into<String>,
    {
        let host = Url::parse(&host.into())?;

        Ok(JiraHttpClient {
            host,
            config: RestConfig::default(),
            credentials,
            client: Client::new(),
        })
    }

    fn request(
        &self,
        method: Method,
        uri: &Url,
        body: Option<Vec<u8>>,
    ) -> std::result::Result<Value, RestError> {
        let mut request = self
            .client
            .request(method, uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        request = self.credentials.apply(request);

        if let Some(body) = body {
            request = request.body(body);
        }
        debug!("request '{:?}'", request);

        let response = request.send()?;

        let status = response.status();
        let body = response.text()?;
        debug!("status {:?} body '{:?}'", status, body);
        match status {
            StatusCode::UNAUTHORIZED => Err(RestError::Unauthorized),
            StatusCode::METHOD_NOT_ALLOWED => Err(RestError::MethodNotAllowed),
            StatusCode::NOT_FOUND => Err(RestError::NotFound(uri.to_string())),
            client_err if client_err.is_client_error() => Err(RestError::Fault {
                code: status,
                errors: serde_json::from_str::<Errors>(&body)?,
            }),
            server_err if server_err.is_server_error() => Err(RestError::Fault {
                code: status,
                errors: serde_json::from_str::<Errors>(&body).unwrap_or_default(),
            }),
            _ => {
                let data = if body.is_empty() { "null" } else { &body };
                Ok(serde_json::from_str::<Value>(data)?)
            }
        }
    }
}

impl RestClient for JiraHttpClient {
    fn config(&self) -> &RestConfig {
        &self.config
    }

    fn build_uri(&self, path: &str, params: &[(&str, &str)]) -> std::result::Result<Url, RestError> {
        let mut uri = self.host.join(path)?;
        if !params.is_empty() {
            let mut pairs = uri.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        Ok(uri)
    }

    fn get(&self, uri: &Url) -> std::result::Result<Value, RestError> {
        self.request(Method::GET, uri, None)
    }

    fn post(&self, uri: &Url, body: &Value) -> std::result::Result<Value, RestError> {
        let data = serde_json::to_vec(body)?;
        self.request(Method::POST, uri, Some(data))
    }

    fn delete(&self, uri: &Url) -> std::result::Result<(), RestError> {
        let _ = self.request(Method::DELETE, uri, None)?;
        Ok(())
    }
}
