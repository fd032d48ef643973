//! Desktop notification delivery

use std::future::Future;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::NotifyError;

/// A desktop notification service
pub trait Notifier {
    /// Ask for permission to show notifications. Returns whether it was granted.
    fn request_permission(&mut self) -> impl Future<Output = bool> + Send;

    /// Show a notification with a title and body
    fn notify(&self, title: &str, body: &str)
        -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Shows notifications through `notify-send`
#[derive(Debug, Default)]
pub struct DesktopNotifier {
    granted: bool,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for DesktopNotifier {
    async fn request_permission(&mut self) -> bool {
        self.granted = Command::new("notify-send")
            .arg("--version")
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false);

        if self.granted {
            info!("Desktop notifications available");
        } else {
            debug!("notify-send not available, desktop notifications disabled");
        }
        self.granted
    }

    async fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        if !self.granted {
            return Err(NotifyError::PermissionDenied);
        }

        let output = Command::new("notify-send")
            .args([title, body])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NotifyError::Command(stderr.trim().to_string()));
        }

        debug!("Desktop notification shown");
        Ok(())
    }
}

/// Never shows anything
#[derive(Debug, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    async fn request_permission(&mut self) -> bool {
        false
    }

    async fn notify(&self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError::PermissionDenied)
    }
}
