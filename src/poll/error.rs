use crate::auth::AccessTokenManagerError;
use crate::twitch::HelixError;

/// Why a status check was abandoned.
#[derive(Debug)]
pub enum PollError {
    Access(AccessTokenManagerError),
    Helix(HelixError),
}

impl std::fmt::Display for PollError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollError::Access(err) => f.write_fmt(format_args!(
                "Failed to get Twitch access token: {err}"
            )),
            PollError::Helix(err) => {
                f.write_fmt(format_args!("Error checking Twitch streams: {err}"))
            }
        }
    }
}
impl std::error::Error for PollError {}

impl From<AccessTokenManagerError> for PollError {
    fn from(value: AccessTokenManagerError) -> Self {
        PollError::Access(value)
    }
}
impl From<HelixError> for PollError {
    fn from(value: HelixError) -> Self {
        PollError::Helix(value)
    }
}
