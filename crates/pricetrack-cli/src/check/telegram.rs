//! Telegram Bot API `sendMessage` client.

use std::time::Duration;

use serde::Serialize;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

pub(crate) struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl TelegramNotifier {
    /// # Errors
    ///
    /// Returns an error if the `reqwest::Client` cannot be built.
    pub(crate) fn new(token: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_base: TELEGRAM_API_BASE.to_string(),
            token: token.to_string(),
        })
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_api_base(mut self, api_base: &str) -> Self {
        api_base.trim_end_matches('/').clone_into(&mut self.api_base);
        self
    }

    /// Sends `text` as Markdown with link previews off.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub(crate) async fn send(&self, chat_id: &str, text: &str) -> anyhow::Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        // Errors drop the URL; it carries the bot token.
        let response = self
            .client
            .post(url)
            .json(&SendMessage {
                chat_id,
                text,
                parse_mode: "Markdown",
                disable_web_page_preview: true,
            })
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        Ok(())
    }

    /// Sends `text` to every chat, returning how many sends succeeded.
    pub(crate) async fn broadcast(&self, chat_ids: &[String], text: &str) -> usize {
        let mut sent = 0;
        for chat_id in chat_ids {
            match self.send(chat_id, text).await {
                Ok(()) => sent += 1,
                Err(e) => tracing::warn!(chat_id = %chat_id, error = %e, "telegram send failed"),
            }
        }
        sent
    }
}
