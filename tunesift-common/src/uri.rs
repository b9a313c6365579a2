//! Track resource identifier parsing
//!
//! Tracks are addressed by canonical URIs of the form `spotify:track:<id>`.
//! Share links (`https://open.spotify.com/track/<id>?si=...`) carry the same
//! id. The id itself is an opaque base-62 string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const URI_SCHEME: &str = "spotify";
const TRACK_KIND: &str = "track";
const OPEN_URL_PREFIX: &str = "https://open.spotify.com/";

/// Resource identifier parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("Empty resource identifier")]
    Empty,

    #[error("Unknown URI scheme: {0}")]
    UnknownScheme(String),

    /// Well-formed URI for something other than a catalog track
    /// (local file, podcast episode, ...)
    #[error("Resource is a {0}, not a track")]
    NotATrack(String),

    #[error("Malformed track id: {0}")]
    MalformedId(String),
}

/// Catalog track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackId(String);

impl TrackId {
    /// Wrap a bare id, validating its alphabet
    pub fn new(id: impl Into<String>) -> Result<Self, UriError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UriError::Empty);
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(UriError::MalformedId(id));
        }
        Ok(Self(id))
    }

    /// Parse a canonical `spotify:track:<id>` URI or an open.spotify.com link
    pub fn from_uri(uri: &str) -> Result<Self, UriError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(UriError::Empty);
        }

        if let Some(path) = uri.strip_prefix(OPEN_URL_PREFIX) {
            let path = path.split(['?', '#']).next().unwrap_or_default();
            let mut segments = path.split('/').filter(|s| !s.is_empty());
            return match (segments.next(), segments.next()) {
                (Some(TRACK_KIND), Some(id)) => Self::new(id),
                (Some(kind), _) => Err(UriError::NotATrack(kind.to_string())),
                (None, _) => Err(UriError::Empty),
            };
        }

        let mut parts = uri.split(':');
        let scheme = parts.next().unwrap_or_default();
        if scheme != URI_SCHEME {
            return Err(UriError::UnknownScheme(scheme.to_string()));
        }

        match (parts.next(), parts.next(), parts.next()) {
            (Some(TRACK_KIND), Some(id), None) => Self::new(id),
            (Some(TRACK_KIND), _, _) => Err(UriError::MalformedId(uri.to_string())),
            (Some(kind), _, _) => Err(UriError::NotATrack(kind.to_string())),
            (None, _, _) => Err(UriError::Empty),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical URI for this track
    pub fn to_uri(&self) -> String {
        format!("{}:{}:{}", URI_SCHEME, TRACK_KIND, self.0)
    }
}

impl FromStr for TrackId {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') || s.starts_with(OPEN_URL_PREFIX) {
            Self::from_uri(s)
        } else {
            Self::new(s)
        }
    }
}

impl TryFrom<String> for TrackId {
    type Error = UriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrackId> for String {
    fn from(id: TrackId) -> Self {
        id.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_uri() {
        let id = TrackId::from_uri("spotify:track:6rqhFgbbKwnb9MLmUQDhG6").unwrap();
        assert_eq!(id.as_str(), "6rqhFgbbKwnb9MLmUQDhG6");
        assert_eq!(id.to_uri(), "spotify:track:6rqhFgbbKwnb9MLmUQDhG6");
    }

    #[test]
    fn test_parse_open_url() {
        let id =
            TrackId::from_uri("https://open.spotify.com/track/6rqhFgbbKwnb9MLmUQDhG6?si=abc123")
                .unwrap();
        assert_eq!(id.as_str(), "6rqhFgbbKwnb9MLmUQDhG6");
    }

    #[test]
    fn test_local_and_episode_uris_are_not_tracks() {
        assert_eq!(
            TrackId::from_uri("spotify:local:Artist:Album:Title:215"),
            Err(UriError::NotATrack("local".to_string()))
        );
        assert_eq!(
            TrackId::from_uri("spotify:episode:512ojhOuo1ktJprKbVcKyQ"),
            Err(UriError::NotATrack("episode".to_string()))
        );
    }

    #[test]
    fn test_rejects_foreign_scheme_and_garbage() {
        assert!(matches!(
            TrackId::from_uri("tidal:track:1234"),
            Err(UriError::UnknownScheme(_))
        ));
        assert_eq!(TrackId::from_uri("  "), Err(UriError::Empty));
        assert!(matches!(
            TrackId::from_uri("spotify:track:"),
            Err(UriError::Empty)
        ));
        assert!(matches!(
            TrackId::from_uri("spotify:track:abc:def"),
            Err(UriError::MalformedId(_))
        ));
        assert!(matches!(
            TrackId::new("abc-def"),
            Err(UriError::MalformedId(_))
        ));
    }

    #[test]
    fn test_from_str_accepts_bare_id_and_uri() {
        let bare: TrackId = "1301WleyT98MSxVHPZCA6M".parse().unwrap();
        let uri: TrackId = "spotify:track:1301WleyT98MSxVHPZCA6M".parse().unwrap();
        assert_eq!(bare, uri);
    }
}
