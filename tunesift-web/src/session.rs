//! Browser sessions holding the user's bearer credential
//!
//! The cookie carries only a random session id; the token stays server-side.

use crate::error::ServiceError;
use crate::provider::AccessToken;
use crate::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "tunesift_session";

/// Session id -> credential
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, AccessToken>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `token` under a fresh session id, sweeping expired sessions
    pub async fn create(&self, token: AccessToken) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, existing| !existing.is_expired());
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned expired sessions");
        }
        sessions.insert(id, token);
        id
    }

    /// Live credential for `id`; expired entries are evicted
    pub async fn get(&self, id: &Uuid) -> Option<AccessToken> {
        let token = self.sessions.read().await.get(id).cloned()?;
        if token.is_expired() {
            self.remove(id).await;
            return None;
        }
        Some(token)
    }

    pub async fn remove(&self, id: &Uuid) {
        self.sessions.write().await.remove(id);
    }

    /// Number of sessions whose credential is still live
    pub async fn len(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|token| !token.is_expired())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Session id from the request's `Cookie` header(s)
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value binding the browser to `id`
pub fn session_cookie(id: &Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// `Set-Cookie` value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Extractor for handlers that need the user's credential.
///
/// Rejects with [`ServiceError::AuthExpired`] when no live session exists.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub session_id: Uuid,
    pub token: AccessToken,
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id =
            session_id_from_headers(&parts.headers).ok_or(ServiceError::AuthExpired)?;
        let token = state
            .sessions
            .get(&session_id)
            .await
            .ok_or(ServiceError::AuthExpired)?;

        Ok(Self { session_id, token })
    }
}

impl Authenticated {
    /// Drop the session if the provider rejected its credential
    pub async fn forget_if_expired<T>(
        &self,
        state: &AppState,
        result: Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        if matches!(result, Err(ServiceError::AuthExpired)) {
            tracing::info!(session_id = %self.session_id, "Dropping session with rejected token");
            state.sessions.remove(&self.session_id).await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::time::Duration;

    #[test]
    fn test_cookie_parsing_finds_session_among_others() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}; lang=en", SESSION_COOKIE, id))
                .unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_cookie_parsing_rejects_garbage() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("tunesift_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn test_session_cookie_round_trips_through_parser() {
        let id = Uuid::new_v4();
        let set_cookie = session_cookie(&id);
        let pair = set_cookie.split(';').next().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[tokio::test]
    async fn test_store_create_get_remove() {
        let store = SessionStore::new();
        let id = store.create(AccessToken::new("abc")).await;

        assert_eq!(store.get(&id).await.unwrap().secret(), "abc");
        store.remove(&id).await;
        assert!(store.get(&id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_token_is_evicted() {
        let store = SessionStore::new();
        let id = store
            .create(AccessToken::expiring_in("abc", Duration::ZERO))
            .await;

        assert!(store.get(&id).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_abandoned_expired_sessions_are_swept_on_create() {
        let store = SessionStore::new();
        for _ in 0..1000 {
            store
                .create(AccessToken::expiring_in("t", Duration::ZERO))
                .await;
        }

        // Only the newest expired entry can still be held; none count as live
        assert!(store.sessions.read().await.len() <= 1);
        assert_eq!(store.len().await, 0);

        let live = store.create(AccessToken::new("fresh")).await;
        assert_eq!(store.sessions.read().await.len(), 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(&live).await.unwrap().secret(), "fresh");
    }
}
