//! Email delivery for staff intake alerts.
//!
//! Exactly one provider is active per deployment, picked at startup from
//! configuration ([`EmailProvider`]). A failed send is logged and dropped;
//! we never retry against the other provider.

use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::{EmailConfig, EmailProvider};

/// Provider-shaped email client, cloneable into spawned notification tasks.
#[derive(Clone)]
pub struct EmailService {
    client: Client,
    config: Option<EmailConfig>,
    base_url: String,
}

impl EmailService {
    pub fn new(config: Option<EmailConfig>) -> Self {
        let base_url = config
            .as_ref()
            .map(|c| c.provider.default_base_url().to_string())
            .unwrap_or_default();
        Self::with_base_url(config, base_url)
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(config: Option<EmailConfig>, base_url: String) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Send one message to the full staff recipient list.
    ///
    /// Returns whether the provider accepted it. Failures are logged here
    /// so callers can stay fire-and-forget.
    pub async fn send_summary(&self, subject: &str, html: &str, text: Option<&str>) -> bool {
        let Some(config) = &self.config else {
            debug!("Email channel not configured, skipping");
            return false;
        };

        match self.dispatch(config, subject, html, text).await {
            Ok(()) => {
                info!(
                    provider = config.provider.name(),
                    recipients = config.recipients.len(),
                    "Email accepted by provider"
                );
                true
            }
            Err(e) => {
                warn!(
                    provider = config.provider.name(),
                    error = %e,
                    "Email delivery failed"
                );
                false
            }
        }
    }

    async fn dispatch(
        &self,
        config: &EmailConfig,
        subject: &str,
        html: &str,
        text: Option<&str>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (url, api_key, body) = match &config.provider {
            EmailProvider::Resend { api_key } => {
                let mut body = json!({
                    "from": config.from_address,
                    "to": config.recipients,
                    "subject": subject,
                    "html": html,
                });
                if let Some(text) = text {
                    body["text"] = json!(text);
                }
                (format!("{}/emails", self.base_url), api_key, body)
            }
            EmailProvider::SendGrid { api_key } => {
                let to: Vec<_> = config
                    .recipients
                    .iter()
                    .map(|r| json!({ "email": r }))
                    .collect();
                // SendGrid rejects payloads where text/plain follows text/html
                let mut content = Vec::new();
                if let Some(text) = text {
                    content.push(json!({ "type": "text/plain", "value": text }));
                }
                content.push(json!({ "type": "text/html", "value": html }));
                let body = json!({
                    "personalizations": [{ "to": to }],
                    "from": { "email": config.from_address },
                    "subject": subject,
                    "content": content,
                });
                (format!("{}/v3/mail/send", self.base_url), api_key, body)
            }
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(format!(
                "{} API error {}: {}",
                config.provider.name(),
                status,
                detail
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resend_config() -> EmailConfig {
        EmailConfig {
            provider: EmailProvider::Resend {
                api_key: "re_test".to_string(),
            },
            from_address: "alerts@example.com".to_string(),
            recipients: vec!["owner@example.com".to_string()],
        }
    }

    #[test]
    fn base_url_follows_provider() {
        let resend = EmailService::new(Some(resend_config()));
        assert_eq!(resend.base_url, "https://api.resend.com");

        let sendgrid = EmailService::new(Some(EmailConfig {
            provider: EmailProvider::SendGrid {
                api_key: "sg_test".to_string(),
            },
            ..resend_config()
        }));
        assert_eq!(sendgrid.base_url, "https://api.sendgrid.com");
    }

    #[test]
    fn unconfigured_service_is_disabled() {
        assert!(!EmailService::new(None).is_enabled());
    }

    #[tokio::test]
    async fn unconfigured_service_sends_nothing() {
        let service = EmailService::new(None);
        assert!(!service.send_summary("s", "<p>b</p>", None).await);
    }

    #[tokio::test]
    async fn unreachable_provider_reports_failure() {
        let service = EmailService::with_base_url(
            Some(resend_config()),
            "http://127.0.0.1:9".to_string(),
        );
        assert!(!service.send_summary("s", "<p>b</p>", Some("b")).await);
    }
}
