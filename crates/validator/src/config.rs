//! Configuration for date validators.
//!
//! Both types deserialize from partial documents; missing fields fall back to
//! their defaults:
//!
//! ```rust
//! use tessera_validator::config::DateConfig;
//!
//! let config: DateConfig = serde_json::from_str(r#"{"formats": ["dd.MM.yyyy"]}"#).unwrap();
//! assert_eq!(config.default_locale, "en-US");
//! assert_eq!(config.default_timezone, chrono_tz::UTC);
//! ```

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// How a date validator reads strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateConfig {
    /// Token patterns (`yyyy`, `MM`, `dd`, `HH`, `mm`, `ss`) tried in order
    /// after RFC 3339.
    pub formats: Vec<String>,
    pub default_locale: String,
    /// Zone used for strings without an offset.
    pub default_timezone: Tz,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            formats: vec!["yyyy-MM-dd".to_owned()],
            default_locale: "en-US".to_owned(),
            default_timezone: Tz::UTC,
        }
    }
}

/// Output pattern of the date `format` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFormat {
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Zone the instant is rendered in; the instant's own offset when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Tz>,
}

impl DateFormat {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            locale: None,
            timezone: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }
}

impl From<&str> for DateFormat {
    fn from(format: &str) -> Self {
        Self::new(format)
    }
}

impl From<String> for DateFormat {
    fn from(format: String) -> Self {
        Self::new(format)
    }
}
