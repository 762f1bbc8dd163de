//! Staff notification fan-out.
//!
//! Turns a validated intake submission into a human-readable summary and
//! pushes it over every configured channel. Everything in here is
//! best-effort: the customer already has their confirmation by the time
//! any of this runs.

use tracing::info;

use crate::models::appointment::ServiceType;
use crate::services::contact;
use crate::services::email::EmailService;
use crate::services::sms::SmsService;

/// The normalized intake fields the notification text is built from.
pub struct RequestContext<'a> {
    pub service_type: ServiceType,
    pub name: &'a str,
    /// Canonical 10-digit form
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub preferred_date: &'a str,
    pub preferred_time: &'a str,
    pub vehicle_info: Option<&'a str>,
    pub message: Option<&'a str>,
    pub location: Option<&'a str>,
    pub destination: Option<&'a str>,
    pub subject: Option<&'a str>,
}

/// Service-type-specific detail block, also persisted as the appointment's
/// message so the dashboard shows the same text staff got paged with.
pub fn build_request_details(ctx: &RequestContext) -> String {
    let mut lines = Vec::new();
    match ctx.service_type {
        ServiceType::TowService => {
            lines.push(format!(
                "Pickup: {}",
                ctx.location.unwrap_or("not specified")
            ));
            lines.push(format!(
                "Drop-off: {}",
                ctx.destination.unwrap_or("not specified")
            ));
            if let Some(vehicle) = ctx.vehicle_info {
                lines.push(format!("Vehicle: {}", vehicle));
            }
            if let Some(message) = ctx.message {
                lines.push(format!("Message: {}", message));
            }
        }
        ServiceType::ContactInquiry => {
            lines.push(format!(
                "Subject: {}",
                ctx.subject.unwrap_or("General question")
            ));
            if let Some(message) = ctx.message {
                lines.push(format!("Message: {}", message));
            }
        }
        _ => {
            if let Some(vehicle) = ctx.vehicle_info {
                lines.push(format!("Vehicle: {}", vehicle));
            }
            lines.push(format!(
                "Requested: {} at {}",
                ctx.preferred_date, ctx.preferred_time
            ));
            if let Some(message) = ctx.message {
                lines.push(format!("Message: {}", message));
            }
        }
    }
    lines.join("\n")
}

/// Full summary as staff see it: headline, contact block, then the
/// service-specific details.
pub fn build_staff_summary(ctx: &RequestContext) -> String {
    let mut lines = vec![
        format!("{} from {}", ctx.service_type.headline(), ctx.name),
        format!("Phone: {}", contact::format_phone_display(ctx.phone)),
    ];
    if let Some(email) = ctx.email {
        lines.push(format!("Email: {}", email));
    }
    let details = build_request_details(ctx);
    if !details.is_empty() {
        lines.push(details);
    }
    lines.join("\n")
}

/// Minimal HTML rendering of the plain-text summary for the email channel.
pub fn summary_as_html(summary: &str) -> String {
    let escaped = html_escape(summary).replace('\n', "<br>\n");
    format!("<p>{}</p>", escaped)
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Push the summary over SMS and email concurrently.
///
/// Runs on a detached task after the intake response is already on the
/// wire. Channel failures are logged inside the services; this only
/// records the overall outcome against the submission's correlation id.
pub async fn dispatch_notifications(
    sms: &SmsService,
    email: &EmailService,
    subject: &str,
    summary: &str,
    correlation_id: &str,
) {
    let html = summary_as_html(summary);
    let (sms_delivered, email_delivered) = tokio::join!(
        sms.send_to_all(summary),
        email.send_summary(subject, &html, Some(summary)),
    );
    info!(
        correlation_id = %correlation_id,
        sms_delivered,
        email_delivered,
        "Staff notification fan-out finished"
    );
}
