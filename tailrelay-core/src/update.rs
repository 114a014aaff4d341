//! Background check for a newer client release.
//!
//! The check runs as one owned task started at launch; the caller awaits its
//! outcome once the main command is done, so a slow endpoint never delays the
//! command itself.

use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
    Available { latest: String },
    /// Checking is disabled, or this is a development build.
    Skipped,
    Failed(String),
}

pub struct UpdateCheck {
    task: Option<JoinHandle<UpdateOutcome>>,
}

impl UpdateCheck {
    pub fn spawn(current_version: &str, url: &str, timeout: Duration) -> Self {
        if is_dev_version(current_version) {
            tracing::debug!(version = current_version, "skipping update check for dev version");
            return Self::disabled();
        }

        let current = current_version.to_owned();
        let url = url.to_owned();
        let task = tokio::spawn(async move {
            match fetch_latest(&url, timeout).await {
                Ok(latest) if latest == current => UpdateOutcome::UpToDate,
                Ok(latest) => UpdateOutcome::Available { latest },
                Err(e) => {
                    tracing::debug!(error = %e, url = %url, "update check failed");
                    UpdateOutcome::Failed(e.to_string())
                }
            }
        });

        Self { task: Some(task) }
    }

    pub fn disabled() -> Self {
        Self { task: None }
    }

    pub async fn outcome(self) -> UpdateOutcome {
        let Some(task) = self.task else {
            return UpdateOutcome::Skipped;
        };
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => UpdateOutcome::Failed(e.to_string()),
        }
    }
}

pub fn is_dev_version(version: &str) -> bool {
    version.ends_with("dev")
}

async fn fetch_latest(url: &str, timeout: Duration) -> Result<String, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body.trim().to_owned())
}
