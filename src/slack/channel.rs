//! Interact with Slack channels, including the ability to programmatically
//! join them.

use super::{api::*, error::SlackError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Channels are addressed by their underlying ID, which can be found in the UI
/// by copying a link to the channel. Slack also accepts a plain channel name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId(pub String);

/// Format without the surrounding newtype wrapper.
///
/// ```
/// let x = ChannelId("C123".into());
/// assert_eq!(format!("{}", x), "C123");
/// ```
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// <https://api.slack.com/methods/conversations.join#args>
#[derive(Serialize)]
struct JoinRequest<'a> {
    channel: &'a ChannelId,
}

/// <https://api.slack.com/methods/conversations.join#examples>
#[derive(Deserialize)]
struct JoinResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
}

impl SlackClient {
    /// We must join public channels before we can message in them.
    pub async fn join_channel(&self, channel: &ChannelId) -> Result<(), SlackError> {
        let res: APIResult<JoinResponse> = self
            .post("/conversations.join")
            .json(&JoinRequest { channel })
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(_) => Ok(()),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}
