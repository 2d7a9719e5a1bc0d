//! Date validator
//!
//! Strings are parsed into [`Value::Date`] by the `isValidType` rule, so
//! every later rule sees an instant. `format` turns the instant back into a
//! string; declare it last.

mod calendar;

use chrono::{DateTime, FixedOffset, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::config::{DateConfig, DateFormat};
use crate::foundation::{Infer, Refine, Rule, RuleConfig, RuleOutcome, SchemaError, SchemaKind, Value};
use crate::validators::{join_display, present};

use calendar::{calendar_age, day_name, format_datetime, locale_date, parse_datetime};

crate::schema_type! {
    /// Validates dates and date strings.
    ///
    /// ```rust
    /// use tessera_validator::prelude::*;
    ///
    /// let day = inp().date().format("dd/MM/yyyy");
    ///
    /// assert_eq!(day.validate("2024-01-15").value, Value::from("15/01/2024"));
    /// assert!(!day.validate("2024-13-01").ok);
    /// ```
    pub DateValidator => SchemaKind::Date;
    required: "This field is required.";
    fields { config: DateConfig }
}

/// A check over instants: absent passes, anything else but a date fails.
fn instant_rule<F>(title: &'static str, f: F) -> Rule
where
    F: Fn(&DateTime<FixedOffset>) -> bool + Send + Sync + 'static,
{
    Rule::check(title, move |v: &Value| match v {
        Value::Date(d) => RuleOutcome::from_bool(f(d)),
        other => RuleOutcome::from_bool(other.is_absent()),
    })
}

/// A rewrite of instants with the same absent/non-date handling.
fn instant_rewrite<F>(title: &'static str, f: F) -> Rule
where
    F: Fn(&DateTime<FixedOffset>) -> Value + Send + Sync + 'static,
{
    Rule::check(title, move |v: &Value| match v {
        Value::Date(d) => RuleOutcome::pass().with_value(f(d)),
        other => RuleOutcome::from_bool(other.is_absent()),
    })
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DateValidator {
    pub fn new() -> Self {
        Self::with_config(DateConfig::default())
    }

    /// A date validator that parses strings according to `config`.
    pub fn with_config(config: DateConfig) -> Self {
        let mut validator = Self::empty();
        validator.config = config;
        validator.required().is_valid_type()
    }

    pub const fn config(&self) -> &DateConfig {
        &self.config
    }

    /// Accepts dates and parseable strings, replacing strings with the
    /// parsed instant. Installed by default.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_valid_type(self) -> Self {
        let config = self.config.clone();
        self.with_rule(
            Rule::check("isValidType", move |v: &Value| match v {
                Value::Date(_) => RuleOutcome::pass(),
                Value::String(s) => match parse_datetime(s, &config) {
                    Some(dt) => RuleOutcome::pass().with_value(Value::Date(dt)),
                    None => RuleOutcome::fail(),
                },
                other => RuleOutcome::from_bool(other.is_absent()),
            })
            .with_message("Value must be a valid date"),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_date(self) -> Self {
        self.with_rule(
            present("isDate", |v| matches!(v, Value::Date(_))).with_message("Invalid date format"),
        )
    }

    // ------------------------------------------------------------------------
    // Bounds
    // ------------------------------------------------------------------------

    #[must_use = "builder methods must be chained or built"]
    pub fn min<Z: TimeZone>(self, min: DateTime<Z>) -> Self {
        let min = min.fixed_offset();
        self.with_rule(
            instant_rule("min", move |d| *d >= min)
                .with_config(RuleConfig::Instant(min))
                .with_message(format!("Date must be after or equal to {}", locale_date(&min))),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max<Z: TimeZone>(self, max: DateTime<Z>) -> Self {
        let max = max.fixed_offset();
        self.with_rule(
            instant_rule("max", move |d| *d <= max)
                .with_config(RuleConfig::Instant(max))
                .with_message(format!("Date must be before or equal to {}", locale_date(&max))),
        )
    }

    /// Like [`min`](Self::min), parsing the bound with this validator's config.
    pub fn try_min(self, min: &str) -> Result<Self, SchemaError> {
        let bound = self.parse_bound(min)?;
        Ok(self.min(bound))
    }

    /// Like [`max`](Self::max), parsing the bound with this validator's config.
    pub fn try_max(self, max: &str) -> Result<Self, SchemaError> {
        let bound = self.parse_bound(max)?;
        Ok(self.max(bound))
    }

    fn parse_bound(&self, s: &str) -> Result<DateTime<FixedOffset>, SchemaError> {
        parse_datetime(s, &self.config).ok_or_else(|| SchemaError::InvalidDateBound(s.to_owned()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn future(self) -> Self {
        self.with_rule(
            instant_rule("future", |d| *d > Utc::now()).with_message("Date must be in the future"),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn past(self) -> Self {
        self.with_rule(instant_rule("past", |d| *d < Utc::now()).with_message("Date must be in the past"))
    }

    // ------------------------------------------------------------------------
    // Calendar
    // ------------------------------------------------------------------------

    /// Restricts the date to the given days of the week, in its own offset.
    #[must_use = "builder methods must be chained or built"]
    pub fn weekday(self, days: impl IntoIterator<Item = Weekday>) -> Self {
        use chrono::Datelike;

        let days: Vec<Weekday> = days.into_iter().collect();
        let names: Vec<&str> = days.iter().copied().map(day_name).collect();
        let message = format!("Date must be on {}", join_display(&names, " or "));
        let allowed = days.clone();
        self.with_rule(
            instant_rule("weekday", move |d| allowed.contains(&d.weekday()))
                .with_config(RuleConfig::Weekdays(days))
                .with_message(message),
        )
    }

    /// Requires at least `years` whole calendar years between the date and now.
    #[must_use = "builder methods must be chained or built"]
    pub fn age(self, years: u32) -> Self {
        let min = i64::from(years);
        self.with_rule(
            instant_rule("age", move |d| {
                i64::from(calendar_age(d, &Utc::now().fixed_offset())) >= min
            })
            .with_config(RuleConfig::Count(years as usize))
            .with_message(format!("Must be at least {years} years old")),
        )
    }

    /// Matches by instant, whatever the offset.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of<Z: TimeZone>(self, dates: impl IntoIterator<Item = DateTime<Z>>) -> Self {
        let dates: Vec<DateTime<FixedOffset>> = dates.into_iter().map(|d| d.fixed_offset()).collect();
        let shown: Vec<String> = dates.iter().map(DateTime::to_rfc3339).collect();
        let message = format!("Value must be one of: {}", join_display(&shown, ", "));
        let allowed = dates.clone();
        self.with_rule(
            instant_rule("enum", move |d| allowed.contains(d))
                .with_config(RuleConfig::Instants(dates))
                .with_message(message),
        )
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Replaces the date with a string rendered from `format`'s tokens.
    ///
    /// The instant is rendered in `format.timezone` when set, otherwise in
    /// its own offset. Rules declared afterwards see the string.
    #[must_use = "builder methods must be chained or built"]
    pub fn format(self, format: impl Into<DateFormat>) -> Self {
        let format = format.into();
        let message = format!("Date must match format {}", format.format);
        let pattern = format.clone();
        self.with_rule(
            instant_rewrite("format", move |d| {
                let rendered = match pattern.timezone {
                    Some(tz) => format_datetime(&d.with_timezone(&tz), &pattern.format),
                    None => format_datetime(d, &pattern.format),
                };
                Value::String(rendered)
            })
            .with_config(RuleConfig::Format(format))
            .with_message(message),
        )
    }

    /// Moves the instant into `tz`. The instant itself is unchanged; later
    /// calendar rules and `format` read it in the new zone.
    #[must_use = "builder methods must be chained or built"]
    pub fn timezone(self, tz: Tz) -> Self {
        self.with_rule(
            instant_rewrite("timezone", move |d| Value::Date(d.with_timezone(&tz).fixed_offset()))
                .with_config(RuleConfig::Timezone(tz))
                .with_message(format!("Invalid timezone: {}", tz.name())),
        )
    }

    /// Like [`timezone`](Self::timezone), looking the zone up by IANA name.
    pub fn try_timezone(self, name: &str) -> Result<Self, SchemaError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| SchemaError::UnknownTimezone(name.to_owned()))?;
        Ok(self.timezone(tz))
    }
}

impl Infer for DateValidator {
    type Output = DateTime<FixedOffset>;

    fn extract(value: Value) -> Option<Self::Output> {
        value.as_date().copied()
    }
}

// ============================================================================
// TESTS
// ============================================================================
