//! Default parameters applied to outgoing messages and update processing.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

/// Text formatting mode for outgoing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    MarkdownV2,
}

/// Bot-wide defaults. Every field is optional; unset fields leave the transport's own default in place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub parse_mode: Option<ParseMode>,
    #[serde(alias = "disable_notifications")]
    pub disable_notification: Option<bool>,
    pub disable_web_page_preview: Option<bool>,
    /// Whether `reply_to` quotes the original message. Default: true.
    pub quote: Option<bool>,
    /// Time zone used when rendering timestamps.
    pub tzinfo: Option<Tz>,
    /// Whether update processing is awaited by the polling loop. Default: true.
    pub block: Option<bool>,
    pub allow_sending_without_reply: Option<bool>,
    pub protect_content: Option<bool>,
}

impl Defaults {
    pub fn block(&self) -> bool {
        self.block.unwrap_or(true)
    }

    pub fn quote(&self) -> bool {
        self.quote.unwrap_or(true)
    }

    /// Renders `at` as RFC 3339 in `tzinfo`, or UTC when no time zone is set.
    pub fn format_timestamp(&self, at: DateTime<Utc>) -> String {
        match self.tzinfo {
            Some(tz) => at.with_timezone(&tz).to_rfc3339(),
            None => at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Deserialize)]
    struct Wrapper {
        defaults: Defaults,
    }

    fn parse(json: &str) -> serde_json::Result<Defaults> {
        serde_json::from_str::<Wrapper>(json).map(|w| w.defaults)
    }

    #[test]
    fn test_empty_defaults() {
        let d = parse(r#"{"defaults": {}}"#).unwrap();
        assert_eq!(d, Defaults::default());
        assert!(d.block());
        assert!(d.quote());
    }

    #[test]
    fn test_full_defaults() {
        let d = parse(
            r#"{"defaults": {
                "parse_mode": "HTML",
                "disable_notifications": true,
                "tzinfo": "Europe/Paris",
                "block": false,
                "protect_content": true
            }}"#,
        )
        .unwrap();
        assert_eq!(d.parse_mode, Some(ParseMode::Html));
        assert_eq!(d.disable_notification, Some(true));
        assert_eq!(d.tzinfo, Some(chrono_tz::Europe::Paris));
        assert!(!d.block());
        assert_eq!(d.protect_content, Some(true));
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        assert!(parse(r#"{"defaults": {"tzinfo": "Mars/Olympus"}}"#).is_err());
    }

    #[test]
    fn test_unknown_parse_mode_rejected() {
        assert!(parse(r#"{"defaults": {"parse_mode": "BBCode"}}"#).is_err());
    }

    #[test]
    fn test_format_timestamp_uses_timezone() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let utc = Defaults::default().format_timestamp(at);
        assert_eq!(utc, "2024-01-01T12:00:00+00:00");

        let paris = Defaults {
            tzinfo: Some(chrono_tz::Europe::Paris),
            ..Defaults::default()
        };
        assert_eq!(paris.format_timestamp(at), "2024-01-01T13:00:00+01:00");
    }
}
