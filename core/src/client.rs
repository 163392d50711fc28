//! Stateless client for the Vero API.
//!
//! # Design
//! `VeroClient` holds the auth token, the base URL and a transport, and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and the shared
//! `parse_response` that consumes an `HttpResponse`. The `VeroApi` trait
//! glues the two together through the injected `Transport`, so callers that
//! want to run the I/O themselves can still use the builders directly.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{
    Attributes, IdentifyPayload, Identity, ReidentifyPayload, SubscriptionPayload, TagsPayload,
    TrackPayload, UpdatePayload,
};

/// Production endpoint of the Vero v2 API.
pub const DEFAULT_BASE_URL: &str = "https://api.getvero.com/api/v2";

/// The operations the Vero API offers. Every method performs exactly one
/// HTTP request and returns the raw response body on success.
///
/// The trait is object safe, so application code can depend on
/// `&dyn VeroApi` and swap in a double under test.
pub trait VeroApi {
    /// Creates the user profile if it does not exist yet. `email`, when
    /// present, is sent as `data.email`.
    fn identify(&self, user_id: &str, data: &Attributes, email: Option<&str>) -> Result<Vec<u8>, ApiError>;

    /// Changes the id of an existing user.
    fn reidentify(&self, user_id: &str, new_user_id: &str) -> Result<Vec<u8>, ApiError>;

    /// Updates attributes of an existing user.
    fn update(&self, user_id: &str, changes: &Attributes) -> Result<Vec<u8>, ApiError>;

    /// Adds and removes tags on a user.
    fn tags(&self, user_id: &str, add: &[&str], remove: &[&str]) -> Result<Vec<u8>, ApiError>;

    fn unsubscribe(&self, user_id: &str) -> Result<Vec<u8>, ApiError>;

    fn resubscribe(&self, user_id: &str) -> Result<Vec<u8>, ApiError>;

    /// Tracks an event for the user described by `identity`. Vero creates the
    /// profile if it does not exist.
    fn track(
        &self,
        event_name: &str,
        identity: &Identity,
        data: &Attributes,
        extras: &Attributes,
    ) -> Result<Vec<u8>, ApiError>;
}

/// Synchronous, stateless client for the Vero API.
#[derive(Clone)]
pub struct VeroClient<T> {
    auth_token: String,
    base_url: String,
    transport: T,
}

#[cfg(feature = "ureq-transport")]
impl VeroClient<crate::transport::UreqTransport> {
    /// Client for the production API using the default ureq transport.
    pub fn new(auth_token: &str) -> Self {
        Self::with_transport(auth_token, crate::transport::UreqTransport::new())
    }

    /// Client built from a `ClientConfig`, honouring its base URL and timeout.
    pub fn from_config(config: crate::config::ClientConfig) -> Self {
        let transport = match config.timeout {
            Some(timeout) => crate::transport::UreqTransport::with_timeout(timeout),
            None => crate::transport::UreqTransport::new(),
        };
        Self::with_transport(&config.auth_token, transport).with_base_url(&config.base_url)
    }
}

impl<T> VeroClient<T> {
    pub fn with_transport(auth_token: &str, transport: T) -> Self {
        Self {
            auth_token: auth_token.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
        }
    }

    /// Points the client at another deployment of the API, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL of `endpoint` under this client's base URL.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    pub fn build_identify(
        &self,
        user_id: &str,
        data: &Attributes,
        email: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let payload = IdentifyPayload::new(&self.auth_token, user_id, data, email);
        self.build(Endpoint::TrackUser, &payload)
    }

    pub fn build_reidentify(&self, user_id: &str, new_user_id: &str) -> Result<HttpRequest, ApiError> {
        let payload = ReidentifyPayload {
            auth_token: &self.auth_token,
            id: user_id,
            new_id: new_user_id,
        };
        self.build(Endpoint::ReidentifyUser, &payload)
    }

    pub fn build_update(&self, user_id: &str, changes: &Attributes) -> Result<HttpRequest, ApiError> {
        let payload = UpdatePayload {
            auth_token: &self.auth_token,
            id: user_id,
            changes,
        };
        self.build(Endpoint::EditUser, &payload)
    }

    pub fn build_tags(&self, user_id: &str, add: &[&str], remove: &[&str]) -> Result<HttpRequest, ApiError> {
        let payload = TagsPayload {
            auth_token: &self.auth_token,
            id: user_id,
            add,
            remove,
        };
        self.build(Endpoint::EditTags, &payload)
    }

    pub fn build_unsubscribe(&self, user_id: &str) -> Result<HttpRequest, ApiError> {
        let payload = SubscriptionPayload {
            auth_token: &self.auth_token,
            id: user_id,
        };
        self.build(Endpoint::Unsubscribe, &payload)
    }

    pub fn build_resubscribe(&self, user_id: &str) -> Result<HttpRequest, ApiError> {
        let payload = SubscriptionPayload {
            auth_token: &self.auth_token,
            id: user_id,
        };
        self.build(Endpoint::Resubscribe, &payload)
    }

    pub fn build_track(
        &self,
        event_name: &str,
        identity: &Identity,
        data: &Attributes,
        extras: &Attributes,
    ) -> Result<HttpRequest, ApiError> {
        let payload = TrackPayload {
            auth_token: &self.auth_token,
            identity,
            event_name,
            data,
            extras,
        };
        self.build(Endpoint::TrackEvent, &payload)
    }

    /// Returns the body of a 2xx response untouched, or a `Service` error
    /// carrying the API's `message` for anything else.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
        if response.is_success() {
            return Ok(response.body);
        }
        let message = error_message(&response.body)
            .unwrap_or_else(|| format!("request failed with HTTP status {}", response.status));
        warn!(status = response.status, %message, "Vero API rejected request");
        Err(ApiError::Service {
            status: response.status,
            message,
        })
    }

    fn build<P: Serialize>(&self, endpoint: Endpoint, payload: &P) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Encoding(e.to_string()))?;
        Ok(HttpRequest {
            method: endpoint.method(),
            url: self.endpoint_url(endpoint),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body,
        })
    }
}

impl<T: Transport> VeroClient<T> {
    fn send(&self, request: Result<HttpRequest, ApiError>) -> Result<Vec<u8>, ApiError> {
        let request = request?;
        debug!(method = %request.method, url = %request.url, "sending Vero API request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, bytes = response.body.len(), "received Vero API response");
        self.parse_response(response)
    }
}

impl<T: Transport> VeroApi for VeroClient<T> {
    fn identify(&self, user_id: &str, data: &Attributes, email: Option<&str>) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_identify(user_id, data, email))
    }

    fn reidentify(&self, user_id: &str, new_user_id: &str) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_reidentify(user_id, new_user_id))
    }

    fn update(&self, user_id: &str, changes: &Attributes) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_update(user_id, changes))
    }

    fn tags(&self, user_id: &str, add: &[&str], remove: &[&str]) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_tags(user_id, add, remove))
    }

    fn unsubscribe(&self, user_id: &str) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_unsubscribe(user_id))
    }

    fn resubscribe(&self, user_id: &str) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_resubscribe(user_id))
    }

    fn track(
        &self,
        event_name: &str,
        identity: &Identity,
        data: &Attributes,
        extras: &Attributes,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_track(event_name, identity, data, extras))
    }
}

// The token is a credential; keep it out of logs.
impl<T> fmt::Debug for VeroClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VeroClient")
            .field("auth_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Pull the `message` field out of an error body. Non-string messages are
/// rendered as JSON; bodies that are not JSON objects yield `None`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
