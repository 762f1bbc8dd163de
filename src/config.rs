//! Application configuration
//!
//! Every environment read happens here, once, at startup. Handlers and
//! services receive the resulting AppConfig through AppState instead of
//! touching the process environment, so tests can hand them fakes.

use std::env;

/// Twilio credentials plus the staff numbers that receive intake alerts.
/// Absent entirely when any credential is missing; SMS is then disabled.
#[derive(Clone, Debug)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub recipients: Vec<String>,
}

/// Which email provider the deployment is wired to.
///
/// Selection happens here by configuration presence and never changes at
/// runtime: Resend wins when both keys are set, SendGrid otherwise. There
/// is deliberately no failover from one to the other on a send error.
#[derive(Clone, Debug)]
pub enum EmailProvider {
    Resend { api_key: String },
    SendGrid { api_key: String },
}

impl EmailProvider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            EmailProvider::Resend { .. } => "https://api.resend.com",
            EmailProvider::SendGrid { .. } => "https://api.sendgrid.com",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EmailProvider::Resend { .. } => "resend",
            EmailProvider::SendGrid { .. } => "sendgrid",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    pub from_address: String,
    pub recipients: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Shared secret the session gateway sends on /api/admin calls
    pub staff_api_key: Option<String>,
    pub sms: Option<SmsConfig>,
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    /// Read the full configuration from the process environment.
    ///
    /// Only DATABASE_URL is hard-required; missing notification settings
    /// disable the matching channel rather than failing startup.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let staff_api_key = env::var("STAFF_API_KEY").ok().filter(|v| !v.is_empty());

        let sms = match (
            env::var("TWILIO_ACCOUNT_SID"),
            env::var("TWILIO_AUTH_TOKEN"),
            env::var("TWILIO_FROM_NUMBER"),
        ) {
            (Ok(account_sid), Ok(auth_token), Ok(from_number)) => Some(SmsConfig {
                account_sid,
                auth_token,
                from_number,
                recipients: parse_recipients(&env::var("SMS_RECIPIENTS").unwrap_or_default()),
            }),
            _ => None,
        };

        let email_provider = select_email_provider(
            env::var("RESEND_API_KEY").ok(),
            env::var("SENDGRID_API_KEY").ok(),
        );

        let email = email_provider.and_then(|provider| {
            let from_address = env::var("EMAIL_FROM").ok().filter(|v| !v.is_empty())?;
            let recipients =
                parse_recipients(&env::var("EMAIL_RECIPIENTS").unwrap_or_default());
            if recipients.is_empty() {
                return None;
            }
            Some(EmailConfig {
                provider,
                from_address,
                recipients,
            })
        });

        Ok(Self {
            database_url,
            bind_addr,
            staff_api_key,
            sms,
            email,
        })
    }
}

/// Resend wins when both keys are present; blank keys count as absent.
fn select_email_provider(
    resend_key: Option<String>,
    sendgrid_key: Option<String>,
) -> Option<EmailProvider> {
    match (
        resend_key.filter(|k| !k.is_empty()),
        sendgrid_key.filter(|k| !k.is_empty()),
    ) {
        (Some(api_key), _) => Some(EmailProvider::Resend { api_key }),
        (None, Some(api_key)) => Some(EmailProvider::SendGrid { api_key }),
        (None, None) => None,
    }
}

/// Split a comma-separated recipient list, dropping blanks.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recipients_splits_and_trims() {
        assert_eq!(
            parse_recipients("2165551234, 2165555678 ,,"),
            vec!["2165551234".to_string(), "2165555678".to_string()]
        );
        assert!(parse_recipients("").is_empty());
        assert!(parse_recipients(" , ").is_empty());
    }

    #[test]
    fn resend_beats_sendgrid_when_both_configured() {
        let provider = select_email_provider(
            Some("re_key".to_string()),
            Some("sg_key".to_string()),
        );
        assert!(matches!(provider, Some(EmailProvider::Resend { .. })));

        let provider = select_email_provider(None, Some("sg_key".to_string()));
        assert!(matches!(provider, Some(EmailProvider::SendGrid { .. })));

        assert!(select_email_provider(Some(String::new()), None).is_none());
        assert!(select_email_provider(None, None).is_none());
    }
}
