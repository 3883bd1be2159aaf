// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic property values.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

/// The value of a declared property.
///
/// Every property of an element stores a `Value`. Which variant a property
/// holds is decided by its [`CoercionType`](crate::CoercionType): the parser
/// runs on every write, so a `Number` property only ever holds `Number` (or
/// `Null` before its first write).
///
/// # Equality
///
/// `PartialEq` uses *same-value* semantics: `NaN` equals `NaN`, while `0.0`
/// and `-0.0` are distinct. This is the comparison the change pipeline uses to
/// decide whether a write is a no-op, and it makes writing a property's current
/// value always idempotent.
///
/// ```rust
/// use understory_element::Value;
///
/// assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
/// assert_ne!(Value::Number(0.0), Value::Number(-0.0));
/// assert_eq!(Value::from("ok"), Value::String("ok".into()));
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// No value. Parsers map it to their type's empty value; converters
    /// usually map it to "remove the attribute".
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A number (`f64`, like a JavaScript number).
    Number(f64),
    /// A string.
    String(String),
    /// A list of numbers, such as a `"2 3"` size pair.
    NumberArray(Vec<f64>),
    /// A list of strings.
    StringArray(Vec<String>),
    /// A structured JSON value.
    Object(JsonValue),
    /// A point in time.
    Date(DateTime<Utc>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, if this is a `Number`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numbers, if this is a `NumberArray`.
    #[must_use]
    pub fn as_number_array(&self) -> Option<&[f64]> {
        match self {
            Self::NumberArray(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the strings, if this is a `StringArray`.
    #[must_use]
    pub fn as_string_array(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the JSON value, if this is an `Object`.
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonValue> {
        match self {
            Self::Object(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the timestamp, if this is a `Date`.
    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Returns a short name for the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::NumberArray(_) => "number array",
            Self::StringArray(_) => "string array",
            Self::Object(_) => "object",
            Self::Date(_) => "date",
        }
    }

    /// Renders the value the way a script runtime stringifies it.
    ///
    /// Arrays are comma-joined, objects are JSON, dates are ISO-8601 with
    /// milliseconds. `Null` renders as the empty string.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::NumberArray(values) => join(values.iter().map(|n| format_number(*n)), ","),
            Self::StringArray(values) => values.join(","),
            Self::Object(value) => value.to_string(),
            Self::Date(date) => format_date(*date),
        }
    }

    /// Returns the text written into a CSS custom property, or `None` if the
    /// property should be removed.
    #[must_use]
    pub fn to_css_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            other => Some(other.to_text()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => same_number(*a, *b),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::NumberArray(a), Self::NumberArray(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_number(*x, *y))
            }
            (Self::StringArray(a), Self::StringArray(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            _ => false,
        }
    }
}

/// `Object.is` for numbers: NaN is itself, signed zeros differ.
fn same_number(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

/// Formats a number the way a script runtime does (`5`, `2.5`, `Infinity`).
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        String::from("NaN")
    } else if n.is_infinite() {
        String::from(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        String::from("0")
    } else {
        n.to_string()
    }
}

pub(crate) fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn join(parts: impl Iterator<Item = String>, separator: &str) -> String {
    parts.collect::<Vec<_>>().join(separator)
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Self::NumberArray(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Self::Object(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
