use crate::options::ThumbnailSize;
use crate::poll::ForceCheck;
use crate::status::{SharedStatus, StatusSummary};
use tokio::sync::{mpsc, oneshot};

/// What slash commands can see of the rest of the process.
///
/// Can be reused by cloning.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub channel: String,
    pub status: SharedStatus,
    pub thumbnail: ThumbnailSize,
    pub force_checks: mpsc::Sender<ForceCheck>,
}

impl CommandContext {
    /// The current status of the watched channel. Only reads.
    pub async fn summary(&self) -> StatusSummary {
        let status = self.status.read().await;
        StatusSummary::of(&status, &self.channel, self.thumbnail)
    }

    /// Asks the poller for an immediate check and describes the result.
    pub async fn force_check_report(&self) -> String {
        let (reply, result) = oneshot::channel();
        if self.force_checks.send(reply).await.is_err() {
            return String::from("The stream checker is not running.");
        }

        match result.await {
            Ok(Ok(outcome)) => format!("Check complete! {} {outcome}.", self.channel),
            Ok(Err(err)) => format!("Check failed: {err}"),
            Err(_) => String::from("The stream checker stopped before answering."),
        }
    }
}
