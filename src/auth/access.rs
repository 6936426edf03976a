//! Caching of Twitch app access tokens.
use super::creds::AccessToken;
use super::error::AccessTokenManagerError;
use crate::clock::Clock;
use crate::twitch::Helix;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

/// Holds the current app access token and knows when it has to be replaced.
///
/// Tokens are requested lazily: nothing is fetched until
/// [get_or_refresh](AccessTokenManager::get_or_refresh) is first called.
#[derive(Debug)]
pub struct AccessTokenManager {
    cached: Option<AccessToken>,
    lifetime: Duration,
}

impl AccessTokenManager {
    /// Creates an empty manager. Tokens it obtains are trusted for at most
    /// `lifetime`, even when Twitch reports a longer one.
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            cached: None,
            lifetime,
        }
    }

    #[must_use]
    pub fn cached(&self) -> Option<&AccessToken> {
        self.cached.as_ref()
    }

    /// Drops the cached token so the next call requests a new one.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Returns the cached access token if it has not expired at `clock.now()`.
    /// Otherwise requests a new one from `helix`, caches it and returns it.
    ///
    /// # Errors
    /// Returns `Err(AccessTokenManagerError...)`:
    /// * `::OnRequest` if the token request failed or Twitch denied it.
    /// * `::EmptyToken` if Twitch answered without a usable token.
    pub async fn get_or_refresh<H, C>(
        &mut self,
        helix: &H,
        clock: &C,
    ) -> Result<String, AccessTokenManagerError>
    where
        H: Helix + ?Sized,
        C: Clock + ?Sized,
    {
        let now = clock.now();
        if let Some(token) = self.cached.as_ref().filter(|token| token.is_valid_at(now)) {
            debug!("Reusing Twitch access token until {}", token.expires_at);
            return Ok(token.access_token.clone());
        }

        let grant = helix.app_access_token().await?;
        if grant.access_token.is_empty() {
            return Err(AccessTokenManagerError::EmptyToken);
        }

        let reported = i64::try_from(grant.expires_in)
            .ok()
            .map(Duration::seconds)
            .filter(|reported| *reported > Duration::zero());
        let lifetime = match reported {
            Some(reported) if reported < self.lifetime => reported,
            _ => self.lifetime,
        };

        let token = AccessToken {
            access_token: grant.access_token,
            expires_at: now
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        info!("Obtained a Twitch access token valid until {}", token.expires_at);

        let access_token = token.access_token.clone();
        self.cached = Some(token);
        Ok(access_token)
    }
}
