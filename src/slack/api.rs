//! Type definitions and helpers for the Slack API.

use super::auth::*;
use serde::Deserialize;

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A Slack Web API client bound to one access token.
///
/// The inner [reqwest::Client] holds a connection pool and is shared with the
/// other platforms, so it's cheap to clone.
#[derive(Clone)]
pub struct SlackClient {
    base: String,
    token: SlackAccessToken,
    http: reqwest::Client,
}

impl SlackClient {
    /// Create a client against the given API base, which is only ever not
    /// [API_BASE] in tests.
    pub fn new(base: String, token: SlackAccessToken, http: reqwest::Client) -> Self {
        SlackClient { base, token, http }
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub(super) fn post<T: ToString>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .post(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channel": "C123ABC456"
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too,
// primarily to ensure appropriate deserialization behaviour in case of an
// otherwise empty successful response.
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Empty {
        #[allow(dead_code)]
        #[serde(deserialize_with = "crate::de::only_true")]
        ok: bool,
    }

    #[test]
    fn test_api_result() {
        let ok: APIResult<Empty> = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(matches!(ok, APIResult::Ok(_)));

        let err: APIResult<Empty> =
            serde_json::from_str(r#"{"ok": false, "error": "channel_not_found"}"#).unwrap();
        match err {
            APIResult::Err(e) => assert_eq!(e.error, "channel_not_found"),
            APIResult::Ok(_) => panic!("expected an error response"),
        }

        assert!(serde_json::from_str::<APIResult<Empty>>(r#"{"ok": false}"#).is_err());
    }
}
