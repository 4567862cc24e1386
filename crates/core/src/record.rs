//! Field access over heterogeneous record types
//!
//! Every list view in the admin screens searches and sorts records by
//! field name. This module turns that lookup into a trait: a record type
//! implements [`Record<K>`] for its own field-key type `K`, and the table
//! engine only ever asks for a [`FieldValue`] by key. Typed entities use a
//! field enum, so invalid keys do not compile; raw JSON objects accept any
//! string key and degrade to [`FieldValue::Null`] when it is missing.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// The value of a single record field, as seen by search and sort.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Missing field or explicit null.
    Null,
    Bool(bool),
    Number(f64),
    Text(Cow<'a, str>),
}

impl FieldValue<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String form used for substring search and collation.
    ///
    /// `Null` becomes the empty string and integral numbers print without a
    /// fractional part, so `9.0` reads as `"9"`.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Number(n) => Cow::Owned(format_number_text(*n)),
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn format_number_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    format!("{}", n)
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

macro_rules! number_field_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(value: $ty) -> Self {
                    FieldValue::Number(value as f64)
                }
            }
        )*
    };
}

number_field_value!(i32, i64, u32, u64, usize, f32, f64);

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
            Value::String(s) => FieldValue::Text(Cow::Borrowed(s.as_str())),
            Value::Array(_) | Value::Object(_) => FieldValue::Text(Cow::Owned(value.to_string())),
        }
    }
}

/// A record whose fields can be looked up by a key of type `K`.
///
/// Lookups never fail: a key that does not resolve to a value yields
/// [`FieldValue::Null`].
pub trait Record<K> {
    fn field(&self, key: &K) -> FieldValue<'_>;
}

impl<K, T> Record<K> for &T
where
    T: Record<K> + ?Sized,
{
    fn field(&self, key: &K) -> FieldValue<'_> {
        (**self).field(key)
    }
}

impl<K> Record<K> for Value
where
    K: AsRef<str>,
{
    fn field(&self, key: &K) -> FieldValue<'_> {
        self.get(key.as_ref())
            .map_or(FieldValue::Null, FieldValue::from)
    }
}
