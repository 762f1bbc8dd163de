//! Twilio SMS delivery for staff intake alerts.

use futures_util::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::SmsConfig;
use crate::services::contact;

const TWILIO_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

/// Thin Twilio client. Carries the whole channel configuration so a single
/// clone can be moved into a spawned notification task.
#[derive(Clone)]
pub struct SmsService {
    client: Client,
    config: Option<SmsConfig>,
    base_url: String,
}

impl SmsService {
    pub fn new(config: Option<SmsConfig>) -> Self {
        Self::with_base_url(config, TWILIO_API_BASE.to_string())
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(config: Option<SmsConfig>, base_url: String) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Send `body` to every configured staff number concurrently.
    ///
    /// Per-recipient failures are logged and swallowed; one unreachable
    /// phone must not cost the rest of the crew their alert. Returns the
    /// number of messages Twilio accepted.
    pub async fn send_to_all(&self, body: &str) -> usize {
        let Some(config) = &self.config else {
            debug!("SMS channel not configured, skipping");
            return 0;
        };
        if config.recipients.is_empty() {
            debug!("SMS channel has no recipients, skipping");
            return 0;
        }

        let sends = config
            .recipients
            .iter()
            .map(|recipient| self.send_one(config, recipient, body));
        let results = join_all(sends).await;

        let mut delivered = 0;
        for (recipient, result) in config.recipients.iter().zip(results) {
            match result {
                Ok(sid) => {
                    info!(recipient = %recipient, sid = %sid, "SMS accepted by Twilio");
                    delivered += 1;
                }
                Err(e) => {
                    warn!(recipient = %recipient, error = %e, "SMS delivery failed");
                }
            }
        }
        delivered
    }

    async fn send_one(
        &self,
        config: &SmsConfig,
        recipient: &str,
        body: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, config.account_sid
        );
        let to = e164(recipient);
        let params = [
            ("To", to.as_str()),
            ("From", config.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&config.account_sid, Some(&config.auth_token))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(format!("Twilio API error {}: {}", status, detail).into());
        }

        let message: TwilioMessageResponse = response.json().await?;
        Ok(message.sid)
    }
}

/// Twilio wants E.164. Staff numbers are configured as US 10-digit strings,
/// but tolerate values that already carry a prefix.
fn e164(number: &str) -> String {
    if number.starts_with('+') {
        return number.to_string();
    }
    let digits = contact::normalize_phone(number);
    if digits.len() == 10 {
        format!("+1{}", digits)
    } else {
        format!("+{}", digits)
    }
}
