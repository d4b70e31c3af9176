//! Standalone validation rules.
//!
//! Each rule is a pure predicate over one value. Failures carry a message
//! template in which `:attribute` is replaced by the field's display name.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use validator::ValidationError;

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// A single reusable check over a field value.
pub trait ValidationRule<T: ?Sized> {
    fn check(&self, value: &T) -> Result<(), RuleFailure>;
}

/// Why a rule rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleFailure {
    #[error("value does not match the slug format")]
    InvalidFormat,
    #[error("date is not in the future")]
    NotFuture,
}

impl RuleFailure {
    pub fn code(&self) -> &'static str {
        match self {
            RuleFailure::InvalidFormat => "slug_format",
            RuleFailure::NotFuture => "future_date",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            RuleFailure::InvalidFormat => "The :attribute format is invalid.",
            RuleFailure::NotFuture => "The :attribute must be a future date.",
        }
    }

    /// Render the template for a given attribute name.
    pub fn message(&self, attribute: &str) -> String {
        self.template().replace(":attribute", attribute)
    }

    pub fn to_validation_error(self, attribute: &str) -> ValidationError {
        let mut err = ValidationError::new(self.code());
        err.message = Some(Cow::Owned(self.message(attribute)));
        err
    }
}

/// Lowercase alphanumerics separated by single hyphens.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugFormat;

impl ValidationRule<str> for SlugFormat {
    fn check(&self, value: &str) -> Result<(), RuleFailure> {
        if SLUG_PATTERN.is_match(value) {
            Ok(())
        } else {
            Err(RuleFailure::InvalidFormat)
        }
    }
}

/// Date strictly after the reference instant (the wall clock unless pinned).
#[derive(Debug, Clone, Copy, Default)]
pub struct FutureDate {
    now: Option<DateTime<Utc>>,
}

impl FutureDate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare against a fixed instant instead of the clock.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }
}

impl ValidationRule<DateTime<Utc>> for FutureDate {
    fn check(&self, value: &DateTime<Utc>) -> Result<(), RuleFailure> {
        let now = self.now.unwrap_or_else(Utc::now);
        if *value > now {
            Ok(())
        } else {
            Err(RuleFailure::NotFuture)
        }
    }
}

/// URL-safe slug for arbitrary text. Idempotent on its own output.
pub fn slugify(text: &str) -> String {
    slug::slugify(text)
}

/// Parse the date formats accepted on the wire.
///
/// RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` (UTC) and bare
/// dates (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn slug_format_accepts_hyphenated_lowercase() {
        for ok in ["hello", "hello-world", "a1-b2-c3", "2024"] {
            assert!(SlugFormat.check(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn slug_format_rejects_bad_shapes() {
        for bad in ["", "-lead", "trail-", "double--hyphen", "Upper", "under_score", "sp ace"] {
            assert_eq!(SlugFormat.check(bad), Err(RuleFailure::InvalidFormat), "{bad}");
        }
    }

    #[test]
    fn future_date_is_strict() {
        let now = Utc::now();
        let rule = FutureDate::at(now);

        assert!(rule.check(&(now + Duration::seconds(1))).is_ok());
        assert_eq!(rule.check(&now), Err(RuleFailure::NotFuture));
        assert_eq!(rule.check(&(now - Duration::days(1))), Err(RuleFailure::NotFuture));
    }

    #[test]
    fn message_embeds_attribute() {
        assert_eq!(
            RuleFailure::NotFuture.message("Publish Date"),
            "The Publish Date must be a future date."
        );
        let err = RuleFailure::InvalidFormat.to_validation_error("Slug");
        assert_eq!(err.code, "slug_format");
        assert_eq!(err.message.as_deref(), Some("The Slug format is invalid."));
    }

    #[test]
    fn slugify_is_idempotent_and_well_formed() {
        for title in ["Hello World!", "  Rust -- is   fun ", "Crème brûlée 2024", "a/b\\c"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
            assert!(SlugFormat.check(once.as_str()).is_ok(), "{once}");
        }
        assert_eq!(slugify("Hello World!"), "hello-world");
    }

    #[test]
    fn parses_supported_date_formats() {
        assert!(parse_date("2000-01-01").is_some());
        assert!(parse_date("2030-05-06 10:20:30").is_some());
        assert!(parse_date("2030-05-06T10:20:30").is_some());
        assert!(parse_date("2030-05-06T10:20:30+02:00").is_some());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("2030-13-40").is_none());
    }
}
