/// An Error returned while writing the [StreamStatus](super::StreamStatus) file.
#[derive(Debug)]
pub enum StoreError {
    IO(std::io::Error),
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IO(err) => f.write_fmt(format_args!("Error writing the status file: {err}")),
            StoreError::Serialize(err) => {
                f.write_fmt(format_args!("Error serializing the stream status: {err}"))
            }
        }
    }
}
impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        StoreError::IO(value)
    }
}
impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        StoreError::Serialize(value)
    }
}
