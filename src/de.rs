//! Deserialisation helpers for the loosely-typed APIs we talk to.

use serde::de::{Deserialize, Deserializer, Error};

/// Accept a boolean only if it equals `expected`. Used to pin the `ok` field of
/// Slack's responses so that untagged enums pick the right variant.
fn exactly<'a, D>(deserializer: D, expected: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    let b = bool::deserialize(deserializer)?;

    if b == expected {
        Ok(b)
    } else {
        Err(Error::custom(format!("invalid bool: {}", b)))
    }
}

pub fn only_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    exactly(deserializer, true)
}

pub fn only_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    exactly(deserializer, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct Truthy {
        #[serde(deserialize_with = "only_true")]
        ok: bool,
    }

    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct Falsy {
        #[serde(deserialize_with = "only_false")]
        ok: bool,
    }

    #[test]
    fn test_only_true() {
        assert_eq!(
            serde_json::from_str::<Truthy>(r#"{"ok": true}"#).unwrap(),
            Truthy { ok: true },
        );

        let err = serde_json::from_str::<Truthy>(r#"{"ok": false}"#).unwrap_err();
        assert!(err.to_string().contains("invalid bool: false"));
    }

    #[test]
    fn test_only_false() {
        assert_eq!(
            serde_json::from_str::<Falsy>(r#"{"ok": false}"#).unwrap(),
            Falsy { ok: false },
        );

        assert!(serde_json::from_str::<Falsy>(r#"{"ok": true}"#).is_err());
        assert!(serde_json::from_str::<Falsy>(r#"{"ok": "false"}"#).is_err());
    }
}
