//! Lenient numeric input
//!
//! Numeric wizard inputs are clamped by the domain instead of rejected at
//! the wire. These helpers accept any JSON number (negative, fractional or
//! larger than the target type) and saturate it to an `i64` so the domain
//! clamp can run.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// An integer that never fails to deserialize from a JSON number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaturatingInt(pub i64);

impl<'de> Deserialize<'de> for SaturatingInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SaturatingIntVisitor;

        impl<'de> Visitor<'de> for SaturatingIntVisitor {
            type Value = SaturatingInt;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number")
            }

            fn visit_i64<E>(self, value: i64) -> Result<SaturatingInt, E>
            where
                E: de::Error,
            {
                Ok(SaturatingInt(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<SaturatingInt, E>
            where
                E: de::Error,
            {
                Ok(SaturatingInt(i64::try_from(value).unwrap_or(i64::MAX)))
            }

            // `as` saturates at the i64 bounds and maps NaN to 0
            fn visit_f64<E>(self, value: f64) -> Result<SaturatingInt, E>
            where
                E: de::Error,
            {
                Ok(SaturatingInt(value as i64))
            }
        }

        deserializer.deserialize_any(SaturatingIntVisitor)
    }
}

/// `deserialize_with` helper for a required lenient integer
pub fn saturating_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    SaturatingInt::deserialize(deserializer).map(|n| n.0)
}

/// `deserialize_with` helper for an optional lenient integer; `null` is `None`
pub fn optional_saturating_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<SaturatingInt>::deserialize(deserializer).map(|n| n.map(|n| n.0))
}
