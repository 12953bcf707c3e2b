//! Untyped configuration values used by bulk updates and descriptors.
//!
//! Remote pushes arrive as loosely typed maps; [`ConfigValue`] is the wire
//! shape, and the `as_*` accessors implement the coercion rules generated
//! `apply_from_map` code relies on: numeric kinds accept any numeric input
//! and convert, everything else requires an exact kind match.

use serde::{Deserialize, Serialize};

/// One loosely typed configuration value.
///
/// Serialises untagged, so a JSON payload such as
/// `{"timeout": "30s", "retries": 5}` deserialises directly into a
/// `HashMap<String, ConfigValue>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ConfigValue {
    /// Returns the string payload for exact string values only.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload for exact boolean values only.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerces any numeric value to `i32`.
    ///
    /// Integers out of the `i32` range are rejected rather than wrapped;
    /// floats are truncated towards zero.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ConfigValue::Int(i) => i32::try_from(*i).ok(),
            #[allow(clippy::cast_possible_truncation)]
            ConfigValue::Float(f) => Some(*f as i32),
            _ => None,
        }
    }

    /// Returns an exact in-range integer as an option choice id.
    ///
    /// Choice ids never coerce: floats, strings, and booleans are rejected,
    /// as are integers outside the `i32` range.
    #[must_use]
    pub fn as_choice_id(&self) -> Option<i32> {
        match self {
            ConfigValue::Int(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Coerces any numeric value to `i64`, truncating floats towards zero.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            #[allow(clippy::cast_possible_truncation)]
            ConfigValue::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    /// Coerces any numeric value to `f32`.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            ConfigValue::Int(i) => Some(*i as f32),
            #[allow(clippy::cast_possible_truncation)]
            ConfigValue::Float(f) => Some(*f as f32),
            _ => None,
        }
    }

    /// Coerces any numeric value to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            ConfigValue::Int(i) => Some(*i as f64),
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::Str(v.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::Str(v)
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<i32> for ConfigValue {
    fn from(v: i32) -> Self {
        ConfigValue::Int(i64::from(v))
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Int(v)
    }
}

impl From<f32> for ConfigValue {
    fn from(v: f32) -> Self {
        ConfigValue::Float(f64::from(v))
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float(v)
    }
}
