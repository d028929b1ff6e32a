//! Outbound mail seam and the account emails

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::errors::DomainError;

const VERIFICATION_TEMPLATE: &str = include_str!("../../../templates/verification_email.html");
const PASSWORD_RESET_TEMPLATE: &str = include_str!("../../../templates/password_reset_email.html");

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver an HTML email to a single recipient
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), DomainError>;
}

/// Emails sent by the account use cases
#[derive(Debug, Clone, Copy)]
pub enum EmailTemplate<'a> {
    AccountVerification { name: &'a str, token: &'a str },
    PasswordReset { name: &'a str, token: &'a str },
}

impl EmailTemplate<'_> {
    pub fn subject(&self) -> &'static str {
        match self {
            EmailTemplate::AccountVerification { .. } => "Verify your Light Room account",
            EmailTemplate::PasswordReset { .. } => "Reset your Light Room password",
        }
    }

    /// Renders the HTML body, escaping the interpolated values
    pub fn render(&self) -> String {
        let (template, name, token) = match self {
            EmailTemplate::AccountVerification { name, token } => {
                (VERIFICATION_TEMPLATE, name, token)
            }
            EmailTemplate::PasswordReset { name, token } => (PASSWORD_RESET_TEMPLATE, name, token),
        };

        fill_placeholders(template, |placeholder| match placeholder {
            "name" => Some(escape_html(name)),
            "token" => Some(escape_html(token)),
            _ => None,
        })
    }
}

/// Replaces `{{key}}` placeholders in one pass; inserted values are never rescanned
fn fill_placeholders(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let key = &rest[start + 2..start + 2 + len];
        rendered.push_str(&rest[..start]);
        match lookup(key) {
            Some(value) => rendered.push_str(&value),
            None => rendered.push_str(&rest[start..start + len + 4]),
        }
        rest = &rest[start + len + 4..];
    }

    rendered.push_str(rest);
    rendered
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A message captured by `RecordingMailer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Mailer that keeps messages in memory instead of delivering them
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail with `DomainError::Mail`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<SentMail> {
        self.sent().pop()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Mail {
                message: "recording mailer set to fail".to_string(),
            });
        }

        let mail = SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        };
        self.sent
            .lock()
            .map_err(|_| DomainError::Internal {
                message: "recording mailer lock poisoned".to_string(),
            })?
            .push(mail);
        Ok(())
    }
}
