use ::async_trait::async_trait;
use ::std::time::Duration;

use crate::{error::*, http, model::*, util};

/// Slack incoming webhook.
pub struct SlackWebhook {
    http: http::Client,
    url: Url,
}

impl SlackWebhook {
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self> {
        let url = util::parse_url(webhook_url.trim())?;
        Ok(Self {
            http: http::Client::new(timeout)?,
            url,
        })
    }

    /// Webhook URLs embed a secret, so only the host is shown.
    pub fn display_target(&self) -> String {
        format!("{}://{}/...", self.url.scheme(), self.url.host_str().unwrap_or(""))
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    async fn deliver(&self, msg: &Message) -> Result<()> {
        let resp = self
            .http
            .post(self.url.clone())
            .json(msg)
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;
        util::ensure_success(resp, &self.url)
            .await
            .map_err(|e| match e {
                Error::UnexpectedResponseCode { got, body, .. } => Error::UnexpectedResponseCode {
                    got,
                    requested_url: self.display_target(),
                    body,
                },
                e => e,
            })?;
        Ok(())
    }
}
