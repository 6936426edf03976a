use crate::twitch::HelixError;

/// An Error returned by an [AccessTokenManager](super::access::AccessTokenManager).
#[derive(Debug)]
pub enum AccessTokenManagerError {
    /// An error returned while requesting a new Access Token.
    OnRequest(HelixError),
    /// Twitch accepted the request but handed back an empty token.
    EmptyToken,
}

impl std::fmt::Display for AccessTokenManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessTokenManagerError::OnRequest(err) => f.write_fmt(format_args!(
                "Error requesting an Access Token from Twitch: {err}"
            )),
            AccessTokenManagerError::EmptyToken => {
                f.write_str("Twitch returned an empty Access Token.")
            }
        }
    }
}
impl std::error::Error for AccessTokenManagerError {}

impl From<HelixError> for AccessTokenManagerError {
    fn from(value: HelixError) -> Self {
        AccessTokenManagerError::OnRequest(value)
    }
}
