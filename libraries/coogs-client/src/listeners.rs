//! Listener and subscription endpoints.

use crate::client::{read_json, server_error, CoogsClient};
use crate::error::{ClientError, Result};
use crate::types::{ListenerProfile, NewSubscription, Subscription};
use coogs_core::ListenerId;
use reqwest::StatusCode;
use tracing::{debug, info};

impl CoogsClient {
    /// Fetch a listener's profile.
    ///
    /// Returns `NotFound` for unknown listeners.
    pub async fn listener_profile(&self, listener_id: ListenerId) -> Result<ListenerProfile> {
        let url = self.endpoint(&format!("/listeners/{}/profile", listener_id));
        debug!(url = %url, listener_id = %listener_id, "Fetching listener profile");

        let response = self.send(self.http.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!(
                "Listener not found: {}",
                listener_id
            )));
        }

        read_json(response, "profile").await
    }

    /// Current subscription of a listener, if any.
    pub async fn subscription(&self, listener_id: ListenerId) -> Result<Option<Subscription>> {
        let url = self.endpoint(&format!("/subscriptions/listener/{}", listener_id));
        debug!(url = %url, listener_id = %listener_id, "Fetching subscription");

        let response = self.send(self.http.get(&url)).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(server_error(response).await);
        }

        let body = response.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse subscription: {}", e)))
    }

    /// Start a subscription.
    pub async fn subscribe(&self, request: &NewSubscription) -> Result<Subscription> {
        let url = self.endpoint("/subscriptions");
        debug!(url = %url, listener_id = %request.listener_id, "Creating subscription");

        let response = self.send(self.http.post(&url).json(request)).await?;
        let subscription: Subscription = read_json(response, "subscription").await?;

        info!(
            listener_id = %subscription.listener_id,
            plan = ?subscription.plan,
            "Subscription created"
        );
        Ok(subscription)
    }
}
