use super::{message::WebhookMessage, DiscordError};
use tracing::{debug, info};
use url::Url;

/// A client for a single Discord incoming webhook.
#[derive(Clone)]
pub struct DiscordClient {
    url: Url,
    http: reqwest::Client,
}

impl DiscordClient {
    pub fn new(url: Url, http: reqwest::Client) -> Self {
        DiscordClient { url, http }
    }

    /// Check that the webhook exists. Discord answers a GET on the webhook URL
    /// with the webhook's metadata.
    pub async fn probe(&self) -> Result<(), DiscordError> {
        let res = self.http.get(self.url.clone()).send().await?;

        let status = res.status();
        if status.as_u16() >= 300 {
            return Err(DiscordError::Rejected {
                status,
                body: res.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }

    /// Execute the webhook with a message.
    pub async fn execute(&self, msg: &WebhookMessage) -> Result<(), DiscordError> {
        debug!(?msg, "Posting message to Discord");

        let message = || serde_json::to_string(msg).unwrap_or_default();

        let res = self
            .http
            .post(self.url.clone())
            .json(msg)
            .send()
            .await
            .map_err(|source| DiscordError::MessageFailed {
                source,
                message: message(),
            })?;

        let status = res.status();
        if status.as_u16() >= 300 {
            return Err(DiscordError::MessageRejected {
                status,
                body: res.text().await.unwrap_or_default(),
                message: message(),
            });
        }

        info!("Message successfully sent to Discord");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::message::Embed;
    use mockito::Matcher;
    use serde_json::json;

    const HOOK_PATH: &str = "/api/webhooks/123/token";

    fn client(srv: &mockito::ServerGuard) -> DiscordClient {
        let url = Url::parse(&format!("{}{}", srv.url(), HOOK_PATH)).unwrap();

        DiscordClient::new(url, reqwest::Client::new())
    }

    fn message() -> WebhookMessage {
        WebhookMessage {
            content: "a title\n".to_owned(),
            embeds: vec![Embed {
                title: "Sentry",
                description: "http://e".to_owned(),
                url: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_probe_ok() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("GET", HOOK_PATH)
            .with_body(r#"{"type": 1, "id": "123", "name": "herald"}"#)
            .create_async()
            .await;

        let res = client(&srv).probe().await;

        mock.assert_async().await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_probe_unknown_webhook() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("GET", HOOK_PATH)
            .with_status(401)
            .with_body(r#"{"message": "Invalid Webhook Token", "code": 50027}"#)
            .create_async()
            .await;

        let err = client(&srv).probe().await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(
            err.to_string(),
            r#"Discord webhook returned 401 Unauthorized: {"message": "Invalid Webhook Token", "code": 50027}"#
        );
    }

    #[tokio::test]
    async fn test_execute_ok() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", HOOK_PATH)
            .match_body(Matcher::Json(json!({
                "content": "a title\n",
                "embeds": [{"title": "Sentry", "description": "http://e"}],
            })))
            .with_status(204)
            .create_async()
            .await;

        let res = client(&srv).execute(&message()).await;

        mock.assert_async().await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_execute_rejected() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", HOOK_PATH)
            .with_status(400)
            .with_body(r#"{"message": "Cannot send an empty message"}"#)
            .create_async()
            .await;

        let err = client(&srv).execute(&message()).await.unwrap_err();

        mock.assert_async().await;
        match err {
            DiscordError::MessageRejected {
                status,
                body,
                message,
            } => {
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("Cannot send an empty message"));
                assert!(message.contains(r#""content":"a title\n""#));
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[tokio::test]
    async fn test_execute_unreachable() {
        let url = Url::parse("http://127.0.0.1:1/api/webhooks/123/token").unwrap();
        let client = DiscordClient::new(url, reqwest::Client::new());

        let err = client.execute(&message()).await.unwrap_err();

        match err {
            DiscordError::MessageFailed { message, .. } => {
                assert!(message.contains(r#""content":"a title\n""#));
            }
            e => panic!("unexpected error: {}", e),
        }
    }
}
