//! Deserializers for environment values.
//!
//! figment parses env values eagerly, so `WEATHER_LOCATION=29203` arrives as
//! an integer. These helpers accept either form for fields that are really
//! strings.

use redact::Secret;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Unsigned(n) => n.to_string(),
            StringOrNumber::Signed(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

/// Deserialize a string, accepting numbers as their decimal text.
///
/// # Errors
/// If the value is neither a string nor a number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

/// Deserialize a secret string, accepting numbers as their decimal text.
///
/// # Errors
/// If the value is neither a string nor a number.
pub fn secret_string<'de, D>(
    deserializer: D,
) -> Result<Secret<String>, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer).map(Secret::new)
}
