//! Request payloads for the Vero API.
//!
//! # Design
//! One `Serialize` struct per operation, borrowing from the caller's inputs.
//! The field set of each struct is exactly the JSON object the endpoint
//! expects, so a payload can never be missing `auth_token`. Free-form user
//! attributes stay as `serde_json` maps.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Arbitrary user or event attributes, serialized as a JSON object.
pub type Attributes = Map<String, Value>;

/// Identifying attributes of the user an event belongs to (`id`, `email`, ...).
pub type Identity = BTreeMap<String, String>;

/// Body of `POST users/track`.
#[derive(Debug, Serialize)]
pub struct IdentifyPayload<'a> {
    pub auth_token: &'a str,
    pub id: &'a str,
    pub data: Cow<'a, Attributes>,
}

impl<'a> IdentifyPayload<'a> {
    /// Builds the payload, merging `email` into a copy of `data` when present.
    /// The caller's map is never modified.
    pub fn new(auth_token: &'a str, id: &'a str, data: &'a Attributes, email: Option<&str>) -> Self {
        let data = match email {
            Some(email) => {
                let mut merged = data.clone();
                merged.insert("email".to_string(), Value::String(email.to_string()));
                Cow::Owned(merged)
            }
            None => Cow::Borrowed(data),
        };
        Self { auth_token, id, data }
    }
}

/// Body of `PUT users/reidentify`.
#[derive(Debug, Serialize)]
pub struct ReidentifyPayload<'a> {
    pub auth_token: &'a str,
    pub id: &'a str,
    pub new_id: &'a str,
}

/// Body of `PUT users/edit`.
#[derive(Debug, Serialize)]
pub struct UpdatePayload<'a> {
    pub auth_token: &'a str,
    pub id: &'a str,
    pub changes: &'a Attributes,
}

/// Body of `PUT users/tags/edit`. Empty tag lists serialize as `[]`.
#[derive(Debug, Serialize)]
pub struct TagsPayload<'a> {
    pub auth_token: &'a str,
    pub id: &'a str,
    pub add: &'a [&'a str],
    pub remove: &'a [&'a str],
}

/// Body of `POST users/unsubscribe` and `POST users/resubscribe`.
#[derive(Debug, Serialize)]
pub struct SubscriptionPayload<'a> {
    pub auth_token: &'a str,
    pub id: &'a str,
}

/// Body of `POST events/track`.
#[derive(Debug, Serialize)]
pub struct TrackPayload<'a> {
    pub auth_token: &'a str,
    pub identity: &'a Identity,
    pub event_name: &'a str,
    pub data: &'a Attributes,
    pub extras: &'a Attributes,
}
