use super::error::StoreError;
use super::StreamStatus;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Reads the status file at `path`. A missing file is an empty status; so is
/// a file that cannot be read or parsed, in which case its contents are lost.
pub async fn load(path: &Path) -> StreamStatus {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return StreamStatus::default(),
        Err(err) => {
            warn!("Error loading stream status from {}: {err}", path.display());
            return StreamStatus::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(status) => {
            info!("Loaded stream status from {}", path.display());
            status
        }
        Err(err) => {
            warn!("Error loading stream status from {}: {err}", path.display());
            StreamStatus::default()
        }
    }
}

/// Overwrites `path` with `status` as JSON indented by four spaces.
pub async fn save(path: &Path, status: &StreamStatus) -> Result<(), StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    status.serialize(&mut serializer)?;

    tokio::fs::write(path, buf).await?;
    Ok(())
}
