use aws_sdk_sesv2::{
    Client as SesClient,
    types::{Body, Content, Destination, EmailContent, Message},
};

use crate::{
    config::MailConfig,
    error::{AppError, Result},
    models::{ContactMessage, Language},
    utils::validation::escape_html,
};

const NOTIFICATION_TEMPLATE: &str = include_str!("../templates/contact_notification.html");
const REPLY_TEMPLATE_TR: &str = include_str!("../templates/contact_reply_tr.html");
const REPLY_TEMPLATE_EN: &str = include_str!("../templates/contact_reply_en.html");

pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

/// Replaces `{{key}}` placeholders with HTML-escaped values in one pass over
/// the template. Unknown placeholders are left as they are.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut html = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            html.push_str(&rest[start..]);
            return html;
        };

        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => html.push_str(&escape_html(value)),
            None => html.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    html.push_str(rest);
    html
}

pub fn contact_notification(msg: &ContactMessage, admin_address: &str) -> OutgoingEmail {
    let html = render(
        NOTIFICATION_TEMPLATE,
        &[
            ("name", msg.name.as_str()),
            ("email", msg.email.as_str()),
            ("phone", msg.phone.as_deref().unwrap_or("-")),
            ("subject", msg.subject.as_str()),
            ("language", msg.language_code.as_str()),
            ("message", msg.message.as_str()),
        ],
    );

    OutgoingEmail {
        to: admin_address.to_string(),
        reply_to: Some(msg.email.clone()),
        subject: format!("Yeni iletişim mesajı: {}", msg.subject),
        html,
    }
}

pub fn contact_auto_reply(msg: &ContactMessage) -> OutgoingEmail {
    let (template, subject) = match Language::from_optional(Some(msg.language_code.as_str())) {
        Language::Tr => (REPLY_TEMPLATE_TR, "Mesajınızı aldık"),
        Language::En => (REPLY_TEMPLATE_EN, "We have received your message"),
    };

    let html = render(
        template,
        &[
            ("name", msg.name.as_str()),
            ("subject", msg.subject.as_str()),
            ("message", msg.message.as_str()),
        ],
    );

    OutgoingEmail {
        to: msg.email.clone(),
        reply_to: None,
        subject: subject.to_string(),
        html,
    }
}

pub async fn send_email(ses_client: &SesClient, sender: &str, email: OutgoingEmail) -> Result<()> {
    let destination = Destination::builder().to_addresses(email.to).build();

    let subject = Content::builder()
        .data(email.subject)
        .charset("UTF-8")
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build subject: {}", e)))?;

    let html_body = Content::builder()
        .data(email.html)
        .charset("UTF-8")
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTML body: {}", e)))?;

    let body = Body::builder().html(html_body).build();

    let message = Message::builder().subject(subject).body(body).build();

    let content = EmailContent::builder().simple(message).build();

    let mut request = ses_client
        .send_email()
        .from_email_address(sender)
        .destination(destination)
        .content(content);

    if let Some(reply_to) = email.reply_to {
        request = request.reply_to_addresses(reply_to);
    }

    request.send().await.map_err(|e| {
        AppError::InternalError(format!("Failed to send email: {:?}", e))
    })?;

    Ok(())
}

/// Sends the admin notification and the sender auto-reply. Failures are
/// logged and swallowed; the stored message is what counts.
pub async fn notify_contact(ses_client: &SesClient, mail: &MailConfig, msg: &ContactMessage) {
    let notification = send_email(
        ses_client,
        &mail.from_address,
        contact_notification(msg, &mail.admin_address),
    );
    let reply = send_email(ses_client, &mail.from_address, contact_auto_reply(msg));

    let (notification, reply) = tokio::join!(notification, reply);

    if let Err(e) = notification {
        tracing::warn!("Contact notification for message {} not sent: {}", msg.id, e);
    }
    if let Err(e) = reply {
        tracing::warn!("Auto-reply for message {} not sent: {}", msg.id, e);
    }
}
