//! Webhook notification dispatch for tracking events.
//!
//! Fire-and-forget HTTP POST of appeared/disappeared events as JSON.
//! Emission is side-effecting and may fail; the delta computation in the
//! core stays pure and failures here only reach stderr.

use airmerge_core::watchlist::TrackMode;

/// Dispatches tracking events to a webhook URL via HTTP POST.
#[derive(Clone)]
pub struct WebhookDispatcher {
    url: String,
    client: reqwest::Client,
}

impl WebhookDispatcher {
    pub fn new(url: &str) -> Self {
        WebhookDispatcher {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Fire-and-forget POST of a tracking event as JSON.
    pub fn notify(&self, action: &str, target: &str, timestamp: f64, mode: TrackMode) {
        let payload = serde_json::json!({
            "action": action,
            "target": target,
            "timestamp": timestamp,
            "mode": mode.as_str(),
        });

        let client = self.client.clone();
        let url = self.url.clone();

        tokio::spawn(async move {
            if let Err(e) = client.post(&url).json(&payload).send().await {
                eprintln!("  [webhook] POST failed: {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_dispatcher_creation() {
        let wh = WebhookDispatcher::new("https://example.com/hook");
        assert_eq!(wh.url, "https://example.com/hook");
    }

    #[test]
    fn test_event_payload_shape() {
        let payload = serde_json::json!({
            "action": "appeared",
            "target": "CHX16",
            "timestamp": 1700000000.0,
            "mode": TrackMode::Callsign.as_str(),
        });

        assert_eq!(payload["action"], "appeared");
        assert_eq!(payload["target"], "CHX16");
        assert_eq!(payload["mode"], "callsign");
        assert!(payload["timestamp"].as_f64().is_some());
    }
}
