//! Desktop notification background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::{
    display::APP_NAME,
    events::TimerEvent,
    services::notification::Notifier,
};

/// Body text of the completion notification
pub const COMPLETE_BODY: &str = "Timer Complete!";

/// Background task that shows a desktop notification whenever the countdown completes
pub async fn notification_task<N: Notifier>(mut events: broadcast::Receiver<TimerEvent>, mut notifier: N) {
    info!("Starting notification task");

    if !notifier.request_permission().await {
        debug!("Notification permission not granted, completions will not be announced");
    }

    loop {
        match events.recv().await {
            Ok(TimerEvent::Complete) => {
                if let Err(e) = notifier.notify(APP_NAME, COMPLETE_BODY).await {
                    debug!("Completion notification suppressed: {}", e);
                }
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification task skipped {} timer events", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Event bus closed, stopping notification task");
                break;
            }
        }
    }
}
