#[derive(Debug)]
pub enum BotError {
    /// A request to the Discord API failed.
    Http(twilight_http::Error),
    /// A response from the Discord API could not be parsed.
    Deserialize(twilight_http::response::DeserializeBodyError),
    /// A reply embed could not be built.
    Embed(String),
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::Http(err) => f.write_fmt(format_args!(
                "Bot error while talking to Discord: {err}"
            )),
            BotError::Deserialize(err) => f.write_fmt(format_args!(
                "Bot error while reading a Discord response: {err}"
            )),
            BotError::Embed(err) => f.write_fmt(format_args!(
                "Bot error while building an embed: {err}"
            )),
        }
    }
}
impl std::error::Error for BotError {}

impl From<twilight_http::Error> for BotError {
    fn from(value: twilight_http::Error) -> Self {
        BotError::Http(value)
    }
}
impl From<twilight_http::response::DeserializeBodyError> for BotError {
    fn from(value: twilight_http::response::DeserializeBodyError) -> Self {
        BotError::Deserialize(value)
    }
}
