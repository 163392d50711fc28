use crate::http::HttpMethod;

/// The Vero API resources this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TrackUser,
    ReidentifyUser,
    EditUser,
    EditTags,
    Unsubscribe,
    Resubscribe,
    TrackEvent,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::TrackUser,
        Endpoint::ReidentifyUser,
        Endpoint::EditUser,
        Endpoint::EditTags,
        Endpoint::Unsubscribe,
        Endpoint::Resubscribe,
        Endpoint::TrackEvent,
    ];

    /// Path relative to the API base URL, without a leading slash.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::TrackUser => "users/track",
            Endpoint::ReidentifyUser => "users/reidentify",
            Endpoint::EditUser => "users/edit",
            Endpoint::EditTags => "users/tags/edit",
            Endpoint::Unsubscribe => "users/unsubscribe",
            Endpoint::Resubscribe => "users/resubscribe",
            Endpoint::TrackEvent => "events/track",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Endpoint::ReidentifyUser | Endpoint::EditUser | Endpoint::EditTags => HttpMethod::Put,
            Endpoint::TrackUser
            | Endpoint::Unsubscribe
            | Endpoint::Resubscribe
            | Endpoint::TrackEvent => HttpMethod::Post,
        }
    }
}
