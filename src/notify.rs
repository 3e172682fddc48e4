// Daily-report / error notifications. Best-effort: every payload is logged,
// email delivery failures are logged and never propagated to the loop.

use std::future::Future;
use std::process::Stdio;

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, warn};

use crate::models::Summary;

pub const SUBJECT: &str = "Network Performance Benchmark Daily Report";

/// Payload delivered on day rollover (summary) or sampler failure (error).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Notification {
    Summary(Summary),
    Error {
        #[serde(rename = "Error")]
        message: String,
    },
}

/// Delivery seam so tests can record emitted notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) -> impl Future<Output = ()> + Send;
}

/// Subject line, optionally tagged with the host's region/zone.
pub fn subject_for_region(region: Option<&str>) -> String {
    match region {
        Some(r) if !r.is_empty() => format!("[{r}] {SUBJECT}"),
        _ => SUBJECT.to_string(),
    }
}

/// Logs every notification; when recipients are configured, also pipes an
/// RFC822-style message to a sendmail-compatible command.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    sendmail: String,
    sender: String,
    recipients: Vec<String>,
    subject: String,
}

impl EmailNotifier {
    pub fn new(
        sendmail: impl Into<String>,
        sender: impl Into<String>,
        recipients: Vec<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            sendmail: sendmail.into(),
            sender: sender.into(),
            recipients,
            subject: subject.into(),
        }
    }

    /// Log-only notifier (no recipients configured).
    pub fn log_only() -> Self {
        Self::new("sendmail", "", Vec::new(), SUBJECT)
    }

    fn message(&self, body: &str) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\n\r\n{}\r\n",
            self.sender,
            self.recipients.join(", "),
            self.subject,
            body
        )
    }

    async fn send(&self, body: &str) -> anyhow::Result<()> {
        let mut child = Command::new(&self.sendmail)
            .arg("-t")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(self.message(body).as_bytes()).await?;
        }
        let status = child.wait().await?;
        anyhow::ensure!(status.success(), "sendmail exited with {status}");
        Ok(())
    }
}

impl Notifier for EmailNotifier {
    async fn notify(&self, notification: &Notification) {
        let body = serde_json::to_string_pretty(notification)
            .unwrap_or_else(|_| format!("{notification:?}"));
        info!(payload = %body, "notification");

        if self.recipients.is_empty() {
            return;
        }
        if let Err(e) = self.send(&body).await {
            warn!(error = %e, operation = "send_email", "notification delivery failed");
        }
    }
}
