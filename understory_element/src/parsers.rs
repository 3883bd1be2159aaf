// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parser factories for common custom property types.
//!
//! Each factory returns a closure suitable for
//! [`PropertyDeclaration::parser`](crate::PropertyDeclaration::parser).

use alloc::string::String;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value as JsonValue};

use crate::coerce::{self, date_from_text};
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DateOrder {
    DayMonthYear,
    MonthDayYear,
}

/// Returns a date parser that also accepts the numeric forms common in
/// `locale`.
///
/// Text is tried in this order:
///
/// 1. ISO `YYYY-MM-DD`;
/// 2. `DD.MM.YYYY`, except for `en` locales;
/// 3. `MM/DD/YYYY`, except for `ru` locales;
/// 4. RFC 3339.
///
/// Only the primary language subtag of `locale` matters (`en-US` is `en`).
/// Empty text gives `Null`; unreadable text gives `Null` with a warning.
/// Non-text values are handled like the built-in `Date` parser.
///
/// # Example
///
/// ```rust
/// use understory_element::Value;
/// use understory_element::parsers::date_parser;
///
/// let parse = date_parser("ru");
/// let date = parse(Value::from("05.04.2025"));
/// assert_eq!(date.to_text(), "2025-04-05T00:00:00.000Z");
/// assert!(parse(Value::from("04/05/2025")).is_null());
/// ```
pub fn date_parser(locale: &str) -> impl Fn(Value) -> Value + Send + Sync + 'static {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let european = language != "en";
    let us = language != "ru";

    move |value| match value {
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Value::Null;
            }
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(midnight)
                .or_else(|| european.then(|| numeric_date(text, '.', DateOrder::DayMonthYear)).flatten())
                .or_else(|| us.then(|| numeric_date(text, '/', DateOrder::MonthDayYear)).flatten())
                .or_else(|| date_from_text(text));
            match date {
                Some(date) => Value::Date(date),
                None => {
                    log::warn!("cannot read {text:?} as a date");
                    Value::Null
                }
            }
        }
        other => coerce::parse_date(other),
    }
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|date| date.and_utc())
}

/// Reads `D.M.YYYY`-style dates with one- or two-digit day and month.
fn numeric_date(text: &str, separator: char, order: DateOrder) -> Option<DateTime<Utc>> {
    let mut parts = text.split(separator);
    let (first, second, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let short = |part: &str| (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit());
    if !short(first) || !short(second) || year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (first, second, year) = (first.parse().ok()?, second.parse().ok()?, year.parse().ok()?);
    let (day, month) = match order {
        DateOrder::DayMonthYear => (first, second),
        DateOrder::MonthDayYear => (second, first),
    };
    NaiveDate::from_ymd_opt(year, month, day).and_then(midnight)
}

/// Returns an object parser that keeps only the keys of `defaults`.
///
/// Text is read as JSON (empty or invalid text counts as `{}`, the latter
/// with a warning). The result starts from `defaults`; each default key
/// present in the input takes the input's value, unless `rules` lists the
/// allowed values for that key (as a JSON array) and the input value is not
/// among them, in which case a warning is logged and the default stays. Keys
/// that `defaults` does not name are dropped.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use understory_element::Value;
/// use understory_element::parsers::validated_object_parser;
///
/// let parse = validated_object_parser(
///     json!({ "mode": "auto", "size": 1 }),
///     json!({ "mode": ["auto", "manual"] }),
/// );
/// let value = parse(Value::from(r#"{"mode": "turbo", "size": 3, "extra": true}"#));
/// assert_eq!(value, Value::Object(json!({ "mode": "auto", "size": 3 })));
/// ```
pub fn validated_object_parser(
    defaults: JsonValue,
    rules: JsonValue,
) -> impl Fn(Value) -> Value + Send + Sync + 'static {
    let defaults = into_map(defaults, "defaults");
    let rules = into_map(rules, "rules");

    move |value| {
        let input = match value {
            Value::Object(JsonValue::Object(map)) => map,
            Value::String(text) if text.trim().is_empty() => Map::new(),
            Value::String(text) => match serde_json::from_str::<JsonValue>(&text) {
                Ok(JsonValue::Object(map)) => map,
                _ => {
                    log::warn!("invalid JSON object {text:?}");
                    Map::new()
                }
            },
            _ => Map::new(),
        };

        let mut result = defaults.clone();
        for (key, slot) in &mut result {
            let Some(candidate) = input.get(key) else {
                continue;
            };
            match rules.get(key) {
                Some(JsonValue::Array(allowed)) if !allowed.contains(candidate) => {
                    log::warn!("`{key}`: {candidate} is not an allowed value");
                }
                _ => *slot = candidate.clone(),
            }
        }
        Value::Object(JsonValue::Object(result))
    }
}

fn into_map(value: JsonValue, what: &str) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        JsonValue::Null => Map::new(),
        other => {
            log::warn!("{what} must be a JSON object, got {other}");
            Map::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(text: &str) -> Value {
        Value::Date(
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc(),
        )
    }

    #[test]
    fn iso_dates_in_every_locale() {
        for locale in ["en", "ru", "de"] {
            assert_eq!(date_parser(locale)(Value::from("2025-04-05")), ymd("2025-04-05"));
        }
    }

    #[test]
    fn european_dates() {
        let parse = date_parser("de-DE");
        assert_eq!(parse(Value::from("5.4.2025")), ymd("2025-04-05"));
        assert!(date_parser("en")(Value::from("05.04.2025")).is_null());
    }

    #[test]
    fn us_dates() {
        let parse = date_parser("en-US");
        assert_eq!(parse(Value::from("04/05/2025")), ymd("2025-04-05"));
        // Month 13 is never valid.
        assert!(parse(Value::from("13/05/2025")).is_null());
        assert!(date_parser("ru")(Value::from("04/05/2025")).is_null());
    }

    #[test]
    fn rfc3339_fallback_and_empty() {
        let parse = date_parser("en");
        assert_eq!(
            parse(Value::from("2025-04-05T10:00:00+02:00")).to_text(),
            "2025-04-05T08:00:00.000Z"
        );
        assert!(parse(Value::from("  ")).is_null());
        assert!(parse(Value::Null).is_null());
        assert!(parse(Value::from("not a date")).is_null());
    }

    #[test]
    fn validated_object_keeps_allowed_values() {
        let parse = validated_object_parser(
            json!({ "mode": "auto", "size": 1 }),
            json!({ "mode": ["auto", "manual"] }),
        );
        assert_eq!(
            parse(Value::from(r#"{"mode": "manual"}"#)),
            Value::Object(json!({ "mode": "manual", "size": 1 }))
        );
        assert_eq!(
            parse(Value::Object(json!({ "size": [1, 2] }))),
            Value::Object(json!({ "mode": "auto", "size": [1, 2] }))
        );
    }

    #[test]
    fn validated_object_falls_back_to_defaults() {
        let parse = validated_object_parser(json!({ "on": false }), JsonValue::Null);
        let defaults = Value::Object(json!({ "on": false }));
        assert_eq!(parse(Value::Null), defaults);
        assert_eq!(parse(Value::from("")), defaults);
        assert_eq!(parse(Value::from("{oops")), defaults);
        assert_eq!(parse(Value::from("[1]")), defaults);
    }
}
