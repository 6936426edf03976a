use super::data::{StreamInfo, StreamsResponse, TokenGrant};
use super::error::{HelixError, TwitchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// The calls the poller makes against Twitch.
#[async_trait]
pub trait Helix: Send + Sync {
    /// Requests a new app access token through the client-credentials grant.
    async fn app_access_token(&self) -> Result<TokenGrant, HelixError>;
    /// Returns the live streams of `user_login`. Empty when the channel is offline.
    async fn live_streams(
        &self,
        access_token: &str,
        user_login: &str,
    ) -> Result<Vec<StreamInfo>, HelixError>;
}

#[async_trait]
impl<H: Helix + ?Sized> Helix for std::sync::Arc<H> {
    async fn app_access_token(&self) -> Result<TokenGrant, HelixError> {
        (**self).app_access_token().await
    }
    async fn live_streams(
        &self,
        access_token: &str,
        user_login: &str,
    ) -> Result<Vec<StreamInfo>, HelixError> {
        (**self).live_streams(access_token, user_login).await
    }
}

#[derive(Debug, Clone)]
pub struct HelixAuth {
    pub client_id: String,
    pub client_secret: String,
}

/// [Helix] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HelixClient {
    http: Client,
    auth: HelixAuth,
    id_url: String,
    api_url: String,
}

impl HelixClient {
    #[must_use]
    pub fn new(auth: HelixAuth) -> Self {
        Self::with_base_urls(auth, super::TWITCH_ID_URL, super::TWITCH_API_URL)
    }

    /// Points the client at other hosts for the OAuth and API endpoints.
    #[must_use]
    pub fn with_base_urls<S: Into<String>>(auth: HelixAuth, id_url: S, api_url: S) -> Self {
        Self {
            http: Client::new(),
            auth,
            id_url: id_url.into().trim_end_matches('/').to_owned(),
            api_url: api_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn parse_twitch<T: DeserializeOwned>(
        status: reqwest::StatusCode,
        body: &str,
    ) -> Result<T, HelixError> {
        if status.is_success() {
            return serde_json::from_str(body).map_err(HelixError::BadData);
        }
        match serde_json::from_str::<TwitchError>(body) {
            Ok(err) => Err(HelixError::Twitch(err)),
            Err(_) => Err(HelixError::Status(status.as_u16(), body.to_owned())),
        }
    }
}

#[async_trait]
impl Helix for HelixClient {
    async fn app_access_token(&self) -> Result<TokenGrant, HelixError> {
        let response = self
            .http
            .post(format!("{}/oauth2/token", self.id_url))
            .query(&[
                ("client_id", self.auth.client_id.as_str()),
                ("client_secret", self.auth.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        HelixClient::parse_twitch(status, &body)
    }

    async fn live_streams(
        &self,
        access_token: &str,
        user_login: &str,
    ) -> Result<Vec<StreamInfo>, HelixError> {
        let response = self
            .http
            .get(format!(
                "{}/helix/streams?user_login={}",
                self.api_url,
                urlencoding::encode(user_login)
            ))
            .header("Client-Id", &self.auth.client_id)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "Helix streams response for {user_login}");

        let streams: StreamsResponse = HelixClient::parse_twitch(status, &body)?;
        Ok(streams.data)
    }
}
