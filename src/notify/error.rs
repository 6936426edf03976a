/// An Error returned while posting to the webhook.
#[derive(Debug)]
pub enum NotifyError {
    /// An error returned while making the POST request.
    Net(reqwest::Error),
    /// The webhook answered with an error status.
    Rejected { status: u16, body: String },
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Net(err) => {
                f.write_fmt(format_args!("Error sending webhook: {err}"))
            }
            NotifyError::Rejected { status, body } => {
                f.write_fmt(format_args!("Error sending webhook: {status} - {body}"))
            }
        }
    }
}
impl std::error::Error for NotifyError {}

impl From<reqwest::Error> for NotifyError {
    fn from(value: reqwest::Error) -> Self {
        NotifyError::Net(value)
    }
}
