//! Post attachments to any given Slack channel.

use super::{api::*, attachment::Attachment, channel::*, SlackError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
struct MessageRequest<'a> {
    channel: &'a ChannelId,
    attachments: [&'a Attachment; 1],
}

/// <https://api.slack.com/methods/chat.postMessage#examples>
#[derive(Deserialize)]
struct MessageResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    #[serde(default)]
    channel: String,
    #[serde(default)]
    ts: String,
}

impl SlackClient {
    /// Post an attachment in a channel, joining it if necessary.
    pub async fn post_attachment(
        &self,
        channel: &ChannelId,
        attachment: &Attachment,
    ) -> Result<(), SlackError> {
        let res = self.try_post_attachment(channel, attachment).await;

        match res {
            Err(e) if e.is_api_error("not_in_channel") => {
                // We're not in the channel yet, join it and try again.
                self.join_channel(channel).await?;
                self.try_post_attachment(channel, attachment).await
            }
            x => x,
        }
    }

    /// Try to post an attachment assuming we've already joined the channel.
    async fn try_post_attachment(
        &self,
        channel: &ChannelId,
        attachment: &Attachment,
    ) -> Result<(), SlackError> {
        debug!(%channel, ?attachment, "Posting message to Slack");

        let res: APIResult<MessageResponse> = self
            .post("/chat.postMessage")
            .json(&MessageRequest {
                channel,
                attachments: [attachment],
            })
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(res) => {
                info!(
                    "Message successfully sent to channel {} ({}) at {}",
                    res.channel, channel, res.ts
                );
                Ok(())
            }
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::{attachment::build_attachment, auth::SlackAccessToken};
    use crate::sentry::Summary;
    use chrono::Utc;
    use mockito::Matcher;
    use serde_json::json;

    fn client(base: String) -> SlackClient {
        SlackClient::new(
            base,
            SlackAccessToken("xoxb-foo".to_owned()),
            reqwest::Client::new(),
        )
    }

    fn attachment() -> Attachment {
        build_attachment(
            &Summary {
                title: "a title".to_owned(),
                url: "http://e".to_owned(),
                fields: vec![],
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_success_without_join() {
        let mut srv = mockito::Server::new_async().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .match_header("authorization", "Bearer xoxb-foo")
            .match_body(Matcher::PartialJson(json!({
                "channel": "C123",
                "attachments": [{"title": "a title", "title_link": "http://e"}],
            })))
            .with_body(r#"{"ok": true, "channel": "C123", "ts": "1503435956.000247"}"#)
            .create_async()
            .await;

        let join_mock = srv
            .mock("POST", "/conversations.join")
            .expect(0)
            .create_async()
            .await;

        let res = client(srv.url())
            .post_attachment(&ChannelId("C123".into()), &attachment())
            .await;

        msg_mock.assert_async().await;
        join_mock.assert_async().await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_success_with_join() {
        let mut srv = mockito::Server::new_async().await;

        let msg1_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": false, "error": "not_in_channel"}"#)
            .create_async()
            .await;

        let join_mock = srv
            .mock("POST", "/conversations.join")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let msg2_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let res = client(srv.url())
            .post_attachment(&ChannelId("C123".into()), &attachment())
            .await;

        msg1_mock.assert_async().await;
        join_mock.assert_async().await;
        msg2_mock.assert_async().await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_channel() {
        let mut srv = mockito::Server::new_async().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": false, "error": "channel_not_found"}"#)
            .create_async()
            .await;

        let err = client(srv.url())
            .post_attachment(&ChannelId("C404".into()), &attachment())
            .await
            .unwrap_err();

        msg_mock.assert_async().await;
        assert_eq!(err.to_string(), "Slack API returned error: channel_not_found");
    }
}
