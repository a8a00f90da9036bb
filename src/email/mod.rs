// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Email Delivery
//!
//! SendGrid integration for the sign-in flow. The auth primitive never
//! sends mail itself; it hands a magic URL to this collaborator. The
//! marketing-list upsert is fire-and-forget and must never block or fail
//! a sign-in request.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::Config;

const DEFAULT_MAIL_API_BASE: &str = "https://api.sendgrid.com";
const MAIL_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const SENDER_NAME: &str = "Stocks on Solana";

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail request failed: {0}")]
    Request(String),

    #[error("mail API returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub struct Mailer {
    api_base_url: String,
    api_key: String,
    from: String,
    list_id: Option<String>,
    http: Client,
}

impl Mailer {
    pub fn new(config: &Config) -> Self {
        Self {
            api_base_url: DEFAULT_MAIL_API_BASE.to_string(),
            api_key: config.sendgrid_api_key.clone(),
            from: config.sendgrid_from.clone(),
            list_id: config.sendgrid_list_id.clone(),
            http: Client::new(),
        }
    }

    /// Point the client at a different API origin. Used by tests; also
    /// useful behind a corporate mail relay.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Send the sign-in email carrying `magic_url`.
    pub async fn send_magic_link(&self, email: &str, magic_url: &str) -> Result<(), MailError> {
        let payload = mail_send_payload(&self.from, email, magic_url);
        let response = self
            .http
            .post(format!("{}/v3/mail/send", self.api_base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(MAIL_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| MailError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected { status, body });
        }

        Ok(())
    }

    /// Upsert the address into the configured marketing list.
    ///
    /// Best effort: failures are logged and swallowed so they can never
    /// break a sign-in request. No-op when no list is configured.
    pub async fn upsert_marketing_contact(&self, email: &str) {
        let Some(list_id) = &self.list_id else {
            return;
        };

        let payload = json!({
            "list_ids": [list_id],
            "contacts": [{ "email": email }],
        });

        let result = self
            .http
            .put(format!("{}/v3/marketing/contacts", self.api_base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(MAIL_REQUEST_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), "marketing contact upsert rejected");
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "marketing contact upsert failed");
            }
        }
    }
}

fn mail_send_payload(from: &str, to: &str, magic_url: &str) -> Value {
    json!({
        "personalizations": [{ "to": [{ "email": to }] }],
        "from": { "email": from, "name": SENDER_NAME },
        "subject": "Your Stocks on Solana login link",
        "content": [{ "type": "text/html", "value": magic_link_html(magic_url) }],
    })
}

fn magic_link_html(magic_url: &str) -> String {
    format!(
        r##"<div style="background:#0a0a0a;color:#e0e0e0;padding:40px;font-family:monospace;max-width:500px">
  <h1 style="color:#FF9900;letter-spacing:2px;font-size:18px;margin-bottom:4px">STOCKS ON SOLANA</h1>
  <p style="color:#555;font-size:11px;letter-spacing:2px;margin-top:0">REAL-TIME TOKENIZED EQUITY SCREENER</p>
  <hr style="border:none;border-top:1px solid #1e1e1e;margin:24px 0"/>
  <p style="color:#aaa;font-size:13px">Click to sign in. Link expires in 15 minutes.</p>
  <a href="{magic_url}" style="display:inline-block;background:#FF9900;color:#000;padding:12px 24px;text-decoration:none;font-weight:700;letter-spacing:1px;border-radius:4px;margin:16px 0;font-size:12px">SIGN IN</a>
  <p style="color:#555;font-size:11px;margin-top:24px">If you didn't request this, ignore it.</p>
</div>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mail_payload_addresses_the_recipient() {
        let payload = mail_send_payload("noreply@example.com", "a@b.com", "https://x/verify?t=1");
        assert_eq!(
            payload.pointer("/personalizations/0/to/0/email"),
            Some(&json!("a@b.com"))
        );
        assert_eq!(payload.pointer("/from/email"), Some(&json!("noreply@example.com")));
    }

    #[test]
    fn mail_body_embeds_the_magic_url() {
        let payload = mail_send_payload("noreply@example.com", "a@b.com", "https://x/verify?t=1");
        let body = payload
            .pointer("/content/0/value")
            .and_then(Value::as_str)
            .unwrap();
        assert!(body.contains(r#"href="https://x/verify?t=1""#));
        assert!(body.contains("expires in 15 minutes"));
    }

    #[tokio::test]
    async fn unreachable_mail_api_reports_request_error() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_base_url: "http://localhost".to_string(),
            auth_secret: "secret".to_string(),
            sendgrid_api_key: "key".to_string(),
            sendgrid_from: "noreply@example.com".to_string(),
            sendgrid_list_id: None,
            metadata_rpc_url: "http://127.0.0.1:1".to_string(),
            static_asset_base: None,
            xstocks_cdn_base: "http://127.0.0.1:1".to_string(),
            price_api_base: "http://127.0.0.1:1".to_string(),
            icon_cache_capacity: 8,
        };
        let mailer = Mailer::new(&config).with_base_url("http://127.0.0.1:1");
        let err = mailer
            .send_magic_link("a@b.com", "https://x/verify?t=1")
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::Request(_)));
    }
}
