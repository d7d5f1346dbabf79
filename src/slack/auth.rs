//! Helpers around Slack's use of OAuth Bearer Authentication, and verifying a
//! token before we rely on it.

use super::{api::*, SlackError};
use serde::Deserialize;
use std::fmt;

/// A newtype wrapper around Slack access tokens.
#[derive(PartialEq, Eq, Clone)]
pub struct SlackAccessToken(pub String);

/// Tokens are secrets, keep them out of logs.
impl fmt::Debug for SlackAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlackAccessToken(..)")
    }
}

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
///
/// ```
/// let token = SlackAccessToken("xoxb-foo".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer xoxb-foo");
/// ```
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}

/// Who the token authenticates as.
///
/// <https://api.slack.com/methods/auth.test#examples>
#[derive(Debug, Deserialize)]
pub struct Identity {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub user: String,
}

impl SlackClient {
    /// Check that the token is valid.
    pub async fn auth_test(&self) -> Result<Identity, SlackError> {
        let res: APIResult<Identity> = self.post("/auth.test").send().await?.json().await?;

        match res {
            APIResult::Ok(id) => Ok(id),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: String) -> SlackClient {
        SlackClient::new(
            base,
            SlackAccessToken("xoxb-foo".to_owned()),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn test_to_auth_header_val() {
        let token = SlackAccessToken("xoxb-foo".into());

        assert_eq!(to_auth_header_val(&token), "Bearer xoxb-foo");
    }

    #[test]
    fn test_debug_hides_token() {
        let token = SlackAccessToken("xoxb-foo".into());

        assert!(!format!("{:?}", token).contains("xoxb-foo"));
    }

    #[tokio::test]
    async fn test_auth_test_ok() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", "/auth.test")
            .match_header("authorization", "Bearer xoxb-foo")
            .with_body(r#"{"ok": true, "team": "Acme", "user": "herald", "team_id": "T1"}"#)
            .create_async()
            .await;

        let id = client(srv.url()).auth_test().await.unwrap();

        mock.assert_async().await;
        assert_eq!(id.team, "Acme");
        assert_eq!(id.user, "herald");
    }

    #[tokio::test]
    async fn test_auth_test_invalid() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", "/auth.test")
            .with_body(r#"{"ok": false, "error": "invalid_auth"}"#)
            .create_async()
            .await;

        let err = client(srv.url()).auth_test().await.unwrap_err();

        mock.assert_async().await;
        assert!(err.is_api_error("invalid_auth"));
        assert_eq!(err.to_string(), "Slack API returned error: invalid_auth");
    }

    #[tokio::test]
    async fn test_auth_test_unreachable() {
        let err = client("http://127.0.0.1:1".to_owned())
            .auth_test()
            .await
            .unwrap_err();

        assert!(matches!(err, SlackError::APIRequestFailed(_)));
    }
}
