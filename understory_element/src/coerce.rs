// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coercion types: how attribute text becomes a property value and back.
//!
//! Every property has a [`CoercionType`]. Its parser runs on *every* write,
//! whether the write came from code or from an attribute, and its converter
//! runs whenever a reflected property writes its attribute. The built-in
//! parse and convert functions are exported so custom coercions can build on
//! them.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde_json::Value as JsonValue;

use crate::value::{Value, format_date, format_number};

/// Parser callback: maps any incoming value to the property's stored value.
pub type Parser = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Converter callback: maps a stored value to attribute text.
///
/// Returning `None` removes the attribute.
pub type Converter = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// What the built-in number parser does with text that is not a number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NumberFallback {
    /// Substitute a constant and log a warning.
    Substitute(f64),
    /// Store `NaN` and let the widget decide.
    Nan,
}

impl Default for NumberFallback {
    fn default() -> Self {
        Self::Substitute(0.0)
    }
}

impl NumberFallback {
    fn resolve(self, input: &Value) -> Value {
        match self {
            Self::Substitute(substitute) => {
                log::warn!(
                    "invalid number {input:?}, using {}",
                    format_number(substitute)
                );
                Value::Number(substitute)
            }
            Self::Nan => Value::Number(f64::NAN),
        }
    }
}

/// The coercion type of a declared property.
#[derive(Clone, Default)]
pub enum CoercionType {
    /// Text. `Null` parses to the empty string.
    #[default]
    String,
    /// A finite or infinite `f64`; see [`parse_number`].
    Number,
    /// A presence flag; see [`parse_boolean`].
    Boolean,
    /// A list of numbers, from a JSON array or whitespace-separated text.
    NumberArray,
    /// A list of strings, from a JSON array or whitespace-separated text.
    StringArray,
    /// Arbitrary JSON.
    Object,
    /// A timestamp.
    Date,
    /// No coercion. Values are stored as given.
    Passthrough,
    /// A user-supplied parser and converter pair.
    Custom {
        /// Parses incoming values.
        parser: Parser,
        /// Converts stored values to attribute text.
        converter: Converter,
    },
}

impl CoercionType {
    /// Looks up a built-in type by its declared name.
    ///
    /// `"Array"` is accepted as an alias of `"NumberArray"`. Returns `None` for
    /// unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "String" => Self::String,
            "Number" => Self::Number,
            "Boolean" => Self::Boolean,
            "Array" | "NumberArray" => Self::NumberArray,
            "StringArray" => Self::StringArray,
            "Object" => Self::Object,
            "Date" => Self::Date,
            "Passthrough" => Self::Passthrough,
            _ => return None,
        })
    }

    /// Creates a custom coercion from a parser and a converter.
    #[must_use]
    pub fn custom(
        parser: impl Fn(Value) -> Value + Send + Sync + 'static,
        converter: impl Fn(&Value) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom {
            parser: Arc::new(parser),
            converter: Arc::new(converter),
        }
    }

    /// Returns the declared name of this type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::NumberArray => "NumberArray",
            Self::StringArray => "StringArray",
            Self::Object => "Object",
            Self::Date => "Date",
            Self::Passthrough => "Passthrough",
            Self::Custom { .. } => "Custom",
        }
    }

    /// Runs the parser of this type.
    ///
    /// `fallback` only affects [`CoercionType::Number`].
    #[must_use]
    pub fn parse(&self, value: Value, fallback: NumberFallback) -> Value {
        match self {
            Self::String => parse_string(value),
            Self::Number => parse_number(value, fallback),
            Self::Boolean => parse_boolean(value),
            Self::NumberArray => parse_number_array(value),
            Self::StringArray => parse_string_array(value),
            Self::Object => parse_object(value),
            Self::Date => parse_date(value),
            Self::Passthrough => value,
            Self::Custom { parser, .. } => parser(value),
        }
    }

    /// Runs the converter of this type.
    #[must_use]
    pub fn convert(&self, value: &Value) -> Option<String> {
        match self {
            Self::String | Self::Passthrough => convert_text(value),
            Self::Number => convert_number(value),
            Self::Boolean => convert_boolean(value),
            Self::NumberArray => convert_number_array(value),
            Self::StringArray => convert_string_array(value),
            Self::Object => convert_object(value),
            Self::Date => convert_date(value),
            Self::Custom { converter, .. } => converter(value),
        }
    }
}

impl PartialEq for CoercionType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Custom {
                    parser: p1,
                    converter: c1,
                },
                Self::Custom {
                    parser: p2,
                    converter: c2,
                },
            ) => Arc::ptr_eq(p1, p2) && Arc::ptr_eq(c1, c2),
            (Self::Custom { .. }, _) | (_, Self::Custom { .. }) => false,
            _ => self.name() == other.name(),
        }
    }
}

// Manual Debug impl since callbacks aren't Debug
impl fmt::Debug for CoercionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a number from trimmed text the way a script runtime does.
///
/// Accepts decimal and exponent forms, `0x`/`0o`/`0b` integers and
/// `Infinity`. Spellings such as `inf` or `nan` are rejected.
#[must_use]
pub fn number_from_text(text: &str) -> Option<f64> {
    let text = text.trim();
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_integer(&text[2..], radix);
    }
    let lower = text.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Digits after a `0x`/`0o`/`0b` prefix. No sign is allowed; values past
/// `u64::MAX` are accumulated in floating point.
fn radix_integer(digits: &str, radix: u32) -> Option<f64> {
    if digits.starts_with(['+', '-']) {
        return None;
    }
    match u64::from_str_radix(digits, radix) {
        Ok(n) => Some(n as f64),
        Err(_) if digits.is_empty() => None,
        Err(_) => digits.chars().try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix)
                .map(|digit| acc * f64::from(radix) + f64::from(digit))
        }),
    }
}

/// Built-in `String` parser: `Null` becomes `""`, other values their text.
#[must_use]
pub fn parse_string(value: Value) -> Value {
    match value {
        Value::String(_) => value,
        other => Value::String(other.to_text()),
    }
}

/// Built-in `Number` parser.
///
/// Empty text and `Null` parse to `0`, booleans to `1`/`0`, dates to epoch
/// milliseconds, and `-0` to `0`. Anything unparsable, including `NaN`
/// itself, resolves through `fallback`.
#[must_use]
pub fn parse_number(value: Value, fallback: NumberFallback) -> Value {
    let parsed = match &value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => Some(*n),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => number_from_text(s),
        Value::NumberArray(values) => match values.as_slice() {
            [] => Some(0.0),
            [single] => Some(*single),
            _ => None,
        },
        Value::Date(date) => Some(date.timestamp_millis() as f64),
        Value::StringArray(_) | Value::Object(_) => None,
    };
    match parsed {
        Some(n) if !n.is_nan() => Value::Number(unsigned_zero(n)),
        _ => fallback.resolve(&value),
    }
}

/// Built-in `Boolean` parser.
///
/// `"false"` and `"0"` are false, every other string (including `""`) is true.
/// `Null`, `0` and `NaN` are false.
#[must_use]
pub fn parse_boolean(value: Value) -> Value {
    Value::Bool(truthy(&value))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !(*n == 0.0 || n.is_nan()),
        Value::String(s) => !matches!(s.as_str(), "false" | "0"),
        _ => true,
    }
}

/// `-0` reflects as `"0"`, so it is stored as `0`.
fn unsigned_zero(n: f64) -> f64 {
    if n == 0.0 { 0.0 } else { n }
}

/// Built-in `NumberArray` parser.
///
/// Text starting with `[` is read as a JSON array; other text is split on
/// whitespace. Tokens that are not numbers become `NaN`.
#[must_use]
pub fn parse_number_array(value: Value) -> Value {
    let numbers = match value {
        Value::Null => Vec::new(),
        Value::NumberArray(values) => values,
        Value::Number(n) => vec![n],
        Value::StringArray(tokens) => tokens.iter().map(|t| token_number(t)).collect(),
        Value::String(text) => match json_array(&text) {
            Some(items) => items.iter().map(json_number).collect(),
            None => text.split_whitespace().map(token_number).collect(),
        },
        Value::Object(JsonValue::Array(items)) => items.iter().map(json_number).collect(),
        other => {
            log::warn!("cannot read {} as a number array", other.kind());
            Vec::new()
        }
    };
    Value::NumberArray(numbers.into_iter().map(unsigned_zero).collect())
}

/// Built-in `StringArray` parser.
///
/// Text starting with `[` is read as a JSON array; other text is split on
/// whitespace.
#[must_use]
pub fn parse_string_array(value: Value) -> Value {
    let strings = match value {
        Value::Null => Vec::new(),
        Value::StringArray(values) => values,
        Value::NumberArray(values) => values.into_iter().map(format_number).collect(),
        Value::String(text) => match json_array(&text) {
            Some(items) => items.iter().map(json_text).collect(),
            None => text.split_whitespace().map(String::from).collect(),
        },
        Value::Object(JsonValue::Array(items)) => items.iter().map(json_text).collect(),
        other => vec![other.to_text()],
    };
    Value::StringArray(strings)
}

/// Built-in `Object` parser.
///
/// Text is read as JSON. `Null`, empty text and invalid JSON become `{}`; the
/// last case logs a warning.
#[must_use]
pub fn parse_object(value: Value) -> Value {
    let json = match value {
        Value::Null => empty_object(),
        Value::Object(json) => json,
        Value::String(text) if text.trim().is_empty() => empty_object(),
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("invalid JSON for object property: {err}");
                empty_object()
            }
        },
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Number(n) => {
            serde_json::Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
        }
        Value::NumberArray(values) => JsonValue::from(values),
        Value::StringArray(values) => JsonValue::from(values),
        Value::Date(date) => JsonValue::String(format_date(date)),
    };
    Value::Object(json)
}

/// Built-in `Date` parser.
///
/// Accepts RFC 3339 text, plain `YYYY-MM-DD` dates (midnight UTC) and epoch
/// milliseconds. Empty text gives `Null`; invalid text gives `Null` and logs
/// a warning. Dates are kept to millisecond precision.
#[must_use]
pub fn parse_date(value: Value) -> Value {
    match value {
        Value::Null => value,
        Value::Date(date) => Value::Date(date.trunc_subsecs(3)),
        Value::String(text) if text.trim().is_empty() => Value::Null,
        Value::String(text) => match date_from_text(text.trim()) {
            Some(date) => Value::Date(date),
            None => {
                log::warn!("invalid date {text:?}");
                Value::Null
            }
        },
        Value::Number(n) if n.is_finite() => {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "fractional milliseconds are dropped"
            )]
            let millis = n as i64;
            DateTime::<Utc>::from_timestamp_millis(millis).map_or(Value::Null, Value::Date)
        }
        other => {
            log::warn!("cannot read {} as a date", other.kind());
            Value::Null
        }
    }
}

pub(crate) fn date_from_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc).trunc_subsecs(3));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// Default converter for text-like values: `Null` removes the attribute.
#[must_use]
pub fn convert_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_text()),
    }
}

/// Built-in `Number` converter.
#[must_use]
pub fn convert_number(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(format_number(*n)),
        other => convert_text(other),
    }
}

/// Built-in `Boolean` converter: present (`""`) when true, removed when false.
#[must_use]
pub fn convert_boolean(value: &Value) -> Option<String> {
    truthy(value).then(String::new)
}

/// Built-in `NumberArray` converter: space-joined numbers.
#[must_use]
pub fn convert_number_array(value: &Value) -> Option<String> {
    match value {
        Value::NumberArray(values) => Some(
            values
                .iter()
                .map(|n| format_number(*n))
                .collect::<Vec<_>>()
                .join(" "),
        ),
        other => convert_text(other),
    }
}

/// Built-in `StringArray` converter: a JSON array.
#[must_use]
pub fn convert_string_array(value: &Value) -> Option<String> {
    match value {
        Value::StringArray(values) => Some(JsonValue::from(values.clone()).to_string()),
        other => convert_text(other),
    }
}

/// Built-in `Object` converter: JSON text.
#[must_use]
pub fn convert_object(value: &Value) -> Option<String> {
    match value {
        Value::Object(json) => Some(json.to_string()),
        other => convert_text(other),
    }
}

/// Built-in `Date` converter: ISO-8601 with milliseconds and `Z`.
#[must_use]
pub fn convert_date(value: &Value) -> Option<String> {
    match value {
        Value::Date(date) => Some(format_date(*date)),
        other => convert_text(other),
    }
}

fn token_number(token: &str) -> f64 {
    number_from_text(token).unwrap_or(f64::NAN)
}

fn json_array(text: &str) -> Option<Vec<JsonValue>> {
    let text = text.trim();
    if !text.starts_with('[') {
        return None;
    }
    match serde_json::from_str::<Vec<JsonValue>>(text) {
        Ok(items) => Some(items),
        Err(err) => {
            log::warn!("invalid JSON array {text:?}: {err}");
            Some(Vec::new())
        }
    }
}

fn json_number(item: &JsonValue) -> f64 {
    match item {
        JsonValue::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        JsonValue::String(s) => token_number(s),
        _ => f64::NAN,
    }
}

fn json_text(item: &JsonValue) -> String {
    match item {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn empty_object() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn text(s: &str) -> Value {
        Value::String(s.into())
    }

    fn number(value: Value) -> Value {
        parse_number(value, NumberFallback::default())
    }

    #[test]
    fn names_round_trip() {
        for name in [
            "String",
            "Number",
            "Boolean",
            "NumberArray",
            "StringArray",
            "Object",
            "Date",
            "Passthrough",
        ] {
            let ty = CoercionType::from_name(name).unwrap();
            assert_eq!(ty.name(), name);
        }
        assert_eq!(
            CoercionType::from_name("Array"),
            Some(CoercionType::NumberArray)
        );
        assert!(CoercionType::from_name("Color").is_none());
    }

    #[test]
    fn string_parser() {
        assert_eq!(parse_string(Value::Null), text(""));
        assert_eq!(parse_string(Value::Number(5.0)), text("5"));
        assert_eq!(parse_string(text("ok")), text("ok"));
    }

    #[test]
    fn number_parser_accepts_script_forms() {
        assert_eq!(number(text(" 42 ")), Value::Number(42.0));
        assert_eq!(number(text("2.5e1")), Value::Number(25.0));
        assert_eq!(number(text("0x1f")), Value::Number(31.0));
        assert_eq!(number(text("-Infinity")), Value::Number(f64::NEG_INFINITY));
        assert_eq!(number(text("")), Value::Number(0.0));
        assert_eq!(number(Value::Null), Value::Number(0.0));
        assert_eq!(number(Value::Bool(true)), Value::Number(1.0));
    }

    #[test]
    fn radix_prefixes() {
        assert_eq!(number_from_text("0b101"), Some(5.0));
        assert_eq!(number_from_text("0O17"), Some(15.0));
        assert_eq!(number_from_text("0x+5"), None);
        assert_eq!(number_from_text("0x-5"), None);
        assert_eq!(number_from_text("0x"), None);
        assert_eq!(number_from_text("0x1g"), None);
        assert_eq!(
            number_from_text("0x10000000000000000"),
            Some(18_446_744_073_709_551_616.0)
        );
        assert_eq!(
            number_from_text("0xFFFFFFFFFFFFFFFFFFFF"),
            Some(1_208_925_819_614_629_174_706_176.0)
        );
    }

    #[test]
    fn negative_zero_is_stored_unsigned() {
        assert_eq!(number(Value::Number(-0.0)), Value::Number(0.0));
        assert_eq!(number(text("-0")), Value::Number(0.0));
        assert_eq!(
            parse_number_array(Value::NumberArray(vec![-0.0, 1.0])),
            Value::NumberArray(vec![0.0, 1.0])
        );
        assert_eq!(convert_number(&Value::Number(-0.0)).as_deref(), Some("0"));
    }

    #[test]
    fn number_parser_fallbacks() {
        assert_eq!(number(text("abc")), Value::Number(0.0));
        assert_eq!(number(text("inf")), Value::Number(0.0));
        assert_eq!(number(text("nan")), Value::Number(0.0));
        assert_eq!(number(Value::Number(f64::NAN)), Value::Number(0.0));
        assert_eq!(
            parse_number(text("abc"), NumberFallback::Nan),
            Value::Number(f64::NAN)
        );
        assert_eq!(
            parse_number(text("abc"), NumberFallback::Substitute(-1.0)),
            Value::Number(-1.0)
        );
    }

    #[test]
    fn boolean_policy() {
        assert_eq!(parse_boolean(text("false")), Value::Bool(false));
        assert_eq!(parse_boolean(text("0")), Value::Bool(false));
        assert_eq!(parse_boolean(text("")), Value::Bool(true));
        assert_eq!(parse_boolean(text("true")), Value::Bool(true));
        assert_eq!(parse_boolean(text("1")), Value::Bool(true));
        assert_eq!(parse_boolean(text("yes")), Value::Bool(true));
        assert_eq!(parse_boolean(Value::Null), Value::Bool(false));
        assert_eq!(parse_boolean(Value::Number(0.0)), Value::Bool(false));
        assert_eq!(parse_boolean(Value::Number(f64::NAN)), Value::Bool(false));
        assert_eq!(parse_boolean(Value::Number(3.0)), Value::Bool(true));

        assert_eq!(convert_boolean(&Value::Bool(true)).as_deref(), Some(""));
        assert_eq!(convert_boolean(&Value::Bool(false)), None);
    }

    #[test]
    fn number_array_parser() {
        assert_eq!(
            parse_number_array(text("[2, 3]")),
            Value::NumberArray(vec![2.0, 3.0])
        );
        assert_eq!(
            parse_number_array(text(" 2  3 ")),
            Value::NumberArray(vec![2.0, 3.0])
        );
        let Value::NumberArray(values) = parse_number_array(text("2 x")) else {
            panic!("expected a number array");
        };
        assert_eq!(values[0], 2.0);
        assert!(values[1].is_nan());
        assert_eq!(parse_number_array(text("[2,")), Value::NumberArray(vec![]));
        assert_eq!(
            convert_number_array(&Value::NumberArray(vec![2.0, 3.5])).as_deref(),
            Some("2 3.5")
        );
    }

    #[test]
    fn string_array_parser() {
        let expected = Value::StringArray(vec!["a".into(), "b".into()]);
        assert_eq!(parse_string_array(text(r#"["a","b"]"#)), expected);
        assert_eq!(parse_string_array(text("a b")), expected);
        assert_eq!(
            convert_string_array(&expected).as_deref(),
            Some(r#"["a","b"]"#)
        );
    }

    #[test]
    fn object_parser() {
        assert_eq!(
            parse_object(text(r#"{"a":1}"#)),
            Value::Object(json!({"a": 1}))
        );
        assert_eq!(parse_object(text("{oops")), Value::Object(json!({})));
        assert_eq!(parse_object(Value::Null), Value::Object(json!({})));
        assert_eq!(
            convert_object(&Value::Object(json!({"a": [1, 2]}))).as_deref(),
            Some(r#"{"a":[1,2]}"#)
        );
    }

    #[test]
    fn date_parser() {
        let midnight = Utc.with_ymd_and_hms(2025, 4, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_date(text("2025-04-05")), Value::Date(midnight));
        assert_eq!(
            parse_date(text("2025-04-05T02:00:00+02:00")),
            Value::Date(midnight)
        );
        assert_eq!(parse_date(text("")), Value::Null);
        assert_eq!(parse_date(text("someday")), Value::Null);
        assert_eq!(
            convert_date(&Value::Date(midnight)).as_deref(),
            Some("2025-04-05T00:00:00.000Z")
        );
        assert_eq!(convert_date(&Value::Null), None);
    }

    #[test]
    fn dates_keep_milliseconds() {
        let precise = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let millis = Utc.timestamp_opt(1_700_000_000, 123_000_000).unwrap();
        assert_eq!(parse_date(Value::Date(precise)), Value::Date(millis));
        assert_eq!(
            parse_date(text("2023-11-14T22:13:20.123456789Z")),
            Value::Date(millis)
        );
        let before_epoch = Utc.timestamp_opt(-1, 999_999_999).unwrap();
        let Value::Date(stored) = parse_date(Value::Date(before_epoch)) else {
            panic!("expected a date");
        };
        assert_eq!(
            convert_date(&Value::Date(stored)).as_deref(),
            Some("1969-12-31T23:59:59.999Z")
        );
    }

    #[test]
    fn custom_coercion() {
        let upper = CoercionType::custom(
            |v| Value::String(v.to_text().to_uppercase()),
            |v| Some(v.to_text().to_lowercase()),
        );
        assert_eq!(
            upper.parse(text("abc"), NumberFallback::default()),
            text("ABC")
        );
        assert_eq!(upper.convert(&text("ABC")).as_deref(), Some("abc"));
        assert_eq!(upper, upper.clone());
        assert_ne!(upper, CoercionType::String);
        assert_eq!(format!("{upper:?}"), "Custom");
    }

    #[test]
    fn passthrough_keeps_values() {
        let value = Value::Object(json!([1]));
        assert_eq!(
            CoercionType::Passthrough.parse(value.clone(), NumberFallback::default()),
            value
        );
    }
}
