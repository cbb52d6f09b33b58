//! Remote push gateway speaking a OneSignal-style REST API.
//!
//! Scheduling posts a notification with `send_after` set to the fire instant,
//! so the remote service delivers it even when this process is gone.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use log::{debug, info};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{NotifyError, PushNotifier, PushTicket};
use crate::config::PushConfig;
use crate::constants::{PUSH_DEFAULT_SEGMENT, REMINDER_TITLE};
use crate::scheduler::ScheduledReminder;

#[derive(Debug, Serialize)]
struct CreateNotification<'a> {
    app_id: &'a str,
    included_segments: [&'a str; 1],
    headings: HashMap<&'static str, &'a str>,
    contents: HashMap<&'static str, &'a str>,
    send_after: String,
    data: NotificationData<'a>,
}

#[derive(Debug, Serialize)]
struct NotificationData<'a> {
    tone: &'a str,
    #[serde(rename = "taskId")]
    task_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateNotificationResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

/// HTTP push gateway.
pub struct PushGateway {
    client: reqwest::Client,
    endpoint: String,
    app_id: String,
    api_key: String,
}

impl PushGateway {
    pub fn new(endpoint: impl Into<String>, app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the gateway from configuration.
    ///
    /// Returns `None` when pushes are disabled or the API key variable is not
    /// set; the scheduler then goes straight to local timers.
    pub fn from_config(config: &PushConfig) -> Option<Self> {
        if !config.enabled {
            debug!("Push notifications disabled in configuration");
            return None;
        }

        match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Some(Self::new(&config.endpoint, &config.app_id, key.trim())),
            _ => {
                info!(
                    "Push notifications unavailable: environment variable '{}' is not set",
                    config.api_key_env
                );
                None
            }
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PushNotifier for PushGateway {
    async fn schedule(&self, reminder: &ScheduledReminder) -> Result<PushTicket, NotifyError> {
        let body = CreateNotification {
            app_id: &self.app_id,
            included_segments: [PUSH_DEFAULT_SEGMENT],
            headings: HashMap::from([("en", REMINDER_TITLE)]),
            contents: HashMap::from([("en", reminder.task_name.as_str())]),
            send_after: reminder
                .fire_at
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            data: NotificationData {
                tone: reminder.tone.id(),
                task_id: &reminder.task_id,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CreateNotificationResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Request(format!("unreadable response: {}", e)))?;

        match parsed.id.filter(|id| !id.is_empty()) {
            Some(id) => {
                debug!("Push accepted for '{}' as {}", reminder.task_name, id);
                Ok(PushTicket(id))
            }
            None => Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: parsed.errors.map(|errors| errors.to_string()).unwrap_or_default(),
            }),
        }
    }

    async fn cancel(&self, ticket: &PushTicket) -> Result<(), NotifyError> {
        let url = format!("{}/{}", self.endpoint, ticket.0);
        let response = self
            .client
            .delete(&url)
            .query(&[("app_id", self.app_id.as_str())])
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }
}
