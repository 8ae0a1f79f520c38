use std::collections::HashSet;

use tokio::sync::watch;

use crate::alerts::select_newest_alert;
use crate::config::DEFAULT_ALERT_FETCH_LIMIT;
use crate::models::AlertItem;
use crate::services::AlertSource;

/// Owns the alert banner slot.
///
/// The slot is a `watch` channel: the presenter holds the only sender and
/// the UI holds receivers, so every write is a whole-value replace that
/// never blocks and never tears.
pub struct AlertPresenter {
    slot: watch::Sender<Option<AlertItem>>,
    fetch_limit: usize,
}

impl Default for AlertPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_FETCH_LIMIT)
    }
}

impl AlertPresenter {
    pub fn new(fetch_limit: usize) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot,
            fetch_limit: fetch_limit.max(1),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AlertItem>> {
        self.slot.subscribe()
    }

    /// Alert currently shown, if any.
    pub fn current(&self) -> Option<AlertItem> {
        self.slot.borrow().clone()
    }

    /// Replace the slot contents. The only write path.
    pub fn publish(&self, alert: AlertItem) {
        tracing::debug!("Publishing alert {}", alert.id);
        self.slot.send_replace(Some(alert));
    }

    /// Fetch active alerts, pick the newest unacknowledged one and publish it.
    ///
    /// A failed fetch, or one that finds nothing, leaves whatever is
    /// already in the slot untouched.
    pub async fn fetch_newest_alert(
        &self,
        source: &dyn AlertSource,
        acknowledged: &HashSet<String>,
    ) -> Option<AlertItem> {
        let candidates = match source.fetch_active_alerts(acknowledged, self.fetch_limit).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::error!("Failed to fetch alerts: {}", err);
                return None;
            }
        };

        let selected = select_newest_alert(candidates, acknowledged)?;
        self.publish(selected.clone());
        Some(selected)
    }
}
