//! OAuth authorization-code flow against Spotify accounts

use super::models::TokenResponse;
use super::{AccessToken, ProviderError};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;

pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Scopes requested from the user
pub const SCOPE: &str = "user-library-read user-top-read playlist-modify-public user-follow-read";

/// Authorization boundary: where to send the user, and how to turn the
/// returned code into a bearer credential
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Provider consent page URL
    fn authorize_url(&self) -> String;

    /// Exchange an authorization code for an access token
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, ProviderError>;
}

/// Spotify accounts service client
pub struct SpotifyAuthorizer {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: Url,
    token_url: String,
}

impl SpotifyAuthorizer {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let auth_url = Url::parse(SPOTIFY_AUTH_URL)
            .map_err(|e| ProviderError::Parse(format!("Invalid authorize URL: {}", e)))?;

        Ok(Self {
            http_client,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_url,
            token_url: SPOTIFY_TOKEN_URL.to_string(),
        })
    }
}

#[async_trait]
impl Authorizer for SpotifyAuthorizer {
    fn authorize_url(&self) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", SCOPE)
            .append_pair("client_id", &self.client_id)
            .append_pair("show_dialog", "true");
        url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, ProviderError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            // invalid_grant / invalid_client: the user has to start over
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %error_text, "Token exchange rejected");
            return Err(ProviderError::Unauthorized);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(status.as_u16(), error_text));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::info!(
            token_type = %token.token_type,
            expires_in = ?token.expires_in,
            "Authorization code exchanged"
        );

        Ok(match token.expires_in {
            Some(secs) => AccessToken::expiring_in(token.access_token, Duration::from_secs(secs)),
            None => AccessToken::new(token.access_token),
        })
    }
}
