use serde::Deserialize;

/// The error body Twitch sends along with a non-success status.
#[derive(Debug, Deserialize)]
pub struct TwitchError {
    pub error: Option<String>,
    pub status: u16,
    pub message: String,
}

/// An Error returned by a [Helix](super::Helix) implementation.
#[derive(Debug)]
pub enum HelixError {
    /// An error returned while making a GET or POST request.
    Net(reqwest::Error),
    /// An error returned if the data from Twitch could not be deserialized.
    BadData(serde_json::Error),
    /// Twitch answered with a documented error body.
    Twitch(TwitchError),
    /// Twitch answered with a non-success status and an unrecognized body.
    Status(u16, String),
}

impl HelixError {
    /// Whether Twitch rejected the bearer token. The token should be
    /// requested again before the next call.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            HelixError::Twitch(err) => err.status == 401,
            HelixError::Status(status, _) => *status == 401,
            _ => false,
        }
    }
}

impl std::fmt::Display for TwitchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let error = if let Some(error) = &self.error {
            format!(" {error}")
        } else {
            String::new()
        };
        f.write_fmt(format_args!(
            "Twitch error {}{}: {}",
            self.status, error, self.message,
        ))
    }
}
impl std::error::Error for TwitchError {}

impl std::fmt::Display for HelixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HelixError::Net(err) => {
                f.write_fmt(format_args!("Error sending a request to Twitch: {err}"))
            }
            HelixError::BadData(err) => {
                f.write_fmt(format_args!("Error parsing a response from Twitch: {err}"))
            }
            HelixError::Twitch(err) => f.write_fmt(format_args!("{err}")),
            HelixError::Status(status, body) => {
                f.write_fmt(format_args!("Twitch responded with status {status}: {body}"))
            }
        }
    }
}
impl std::error::Error for HelixError {}

impl From<reqwest::Error> for HelixError {
    fn from(value: reqwest::Error) -> Self {
        HelixError::Net(value)
    }
}
