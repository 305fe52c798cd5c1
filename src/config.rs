//! Runtime configuration from environment variables (a `.env` file is loaded first by the binary).

use std::env;

/// Site identity used in page titles, JSON-LD, and the sitemap.
#[derive(Clone, Debug)]
pub struct SiteInfo {
    pub name: String,
    /// Absolute base URL without trailing slash, e.g. `https://www.ornekhafriyat.com`.
    pub url: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Messaging bot used to forward contact form submissions.
#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Unset means the site runs without a database: pages render empty, writes fail.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bind_addr: String,
    /// Bearer token for admin writes and the dashboard. Unset leaves them open.
    pub admin_token: Option<String>,
    pub telegram: Option<TelegramConfig>,
    pub site: SiteInfo,
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `DATABASE_URL` - PostgreSQL URL (optional)
    /// - `DB_MAX_CONNECTIONS` - pool size (default: 5)
    /// - `BIND_ADDR` - listen address (default: "0.0.0.0:3000")
    /// - `ADMIN_TOKEN` - admin bearer token (optional)
    /// - `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID` - contact form forwarding (both required to enable)
    /// - `TELEGRAM_API_BASE` - bot API base (default: "https://api.telegram.org")
    /// - `SITE_NAME`, `SITE_URL`, `SITE_PHONE`, `SITE_EMAIL`, `SITE_ADDRESS`
    pub fn from_env() -> Self {
        let telegram = match (non_empty("TELEGRAM_BOT_TOKEN"), non_empty("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
                bot_token,
                chat_id,
                api_base: non_empty("TELEGRAM_API_BASE").unwrap_or_else(|| "https://api.telegram.org".into()),
            }),
            _ => None,
        };
        Self {
            database_url: non_empty("DATABASE_URL"),
            db_max_connections: non_empty("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into()),
            admin_token: non_empty("ADMIN_TOKEN"),
            telegram,
            site: SiteInfo {
                name: non_empty("SITE_NAME").unwrap_or_else(|| "Hafriyat".into()),
                url: non_empty("SITE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| "http://localhost:3000".into()),
                phone: non_empty("SITE_PHONE"),
                email: non_empty("SITE_EMAIL"),
                address: non_empty("SITE_ADDRESS"),
            },
        }
    }
}

impl Default for Config {
    /// Development defaults: no database, no bot, no admin token.
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: 5,
            bind_addr: "127.0.0.1:3000".into(),
            admin_token: None,
            telegram: None,
            site: SiteInfo {
                name: "Hafriyat".into(),
                url: "http://localhost:3000".into(),
                phone: None,
                email: None,
                address: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unconfigured() {
        let c = Config::default();
        assert!(c.database_url.is_none());
        assert!(c.telegram.is_none());
        assert!(c.admin_token.is_none());
        assert!(!c.site.url.ends_with('/'));
    }
}
