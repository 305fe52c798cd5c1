//! Contact form: validation, message formatting, and delivery through a messaging bot.

use crate::config::TelegramConfig;
use crate::error::AppError;
use crate::resources::Format;
use crate::service::matches_format;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Clone, Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Service the visitor is asking about (title or slug).
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
        if self.message.trim().is_empty() {
            return Err(AppError::Validation("message is required".into()));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("email is required".into()));
        }
        if !matches_format(email, Format::Email) {
            return Err(AppError::Validation("email must be a valid email".into()));
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AppError::Validation(format!(
                "message must be at most {} characters",
                MAX_MESSAGE_CHARS
            )));
        }
        Ok(())
    }

    /// Bot message body in Telegram's HTML parse mode. Visitor input is escaped.
    pub fn to_message(&self, site_name: &str) -> String {
        let mut out = format!("<b>Yeni iletişim formu</b> ({})\n\n", escape_html(site_name));
        out.push_str(&format!("<b>Ad Soyad:</b> {}\n", escape_html(self.name.trim())));
        out.push_str(&format!("<b>E-posta:</b> {}\n", escape_html(self.email.trim())));
        let optional = [
            ("Telefon", &self.phone),
            ("Konu", &self.subject),
            ("Hizmet", &self.service),
        ];
        for (label, value) in optional {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                out.push_str(&format!("<b>{}:</b> {}\n", label, escape_html(v)));
            }
        }
        out.push_str(&format!("\n<b>Mesaj:</b>\n{}", escape_html(self.message.trim())));
        out
    }
}

/// Escape the three characters Telegram's HTML mode treats specially.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Delivers a formatted contact message somewhere a human will read it.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), AppError>;
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(Deserialize)]
struct BotResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Notify(e.to_string()))?;
        Ok(TelegramNotifier { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }
}

#[async_trait]
impl ContactNotifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), AppError> {
        let payload = SendMessage {
            chat_id: &self.config.chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };
        let response = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Notify(e.without_url().to_string()))?;
        let status = response.status();
        let body: BotResponse = response
            .json()
            .await
            .map_err(|e| AppError::Notify(format!("status {}: {}", status, e.without_url())))?;
        if !status.is_success() || !body.ok {
            return Err(AppError::Notify(format!(
                "status {}: {}",
                status,
                body.description.unwrap_or_default()
            )));
        }
        tracing::info!("contact message forwarded");
        Ok(())
    }
}
