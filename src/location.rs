//! Geographic coordinate model.
//!
//! `Location` is read from a JSON object whose `lat`/`lon` keys are matched
//! without regard to ASCII case (`lat`, `Lat`, `LAT` are all accepted) and is
//! always written back with the canonical lowercase keys.
//!
//! Coordinates are parsed straight from the number text to `f32` and written
//! back in their shortest form: whole values carry no fractional part (`-200`,
//! `0`), and magnitudes below 1e-6 or from 1e21 up use exponent notation with a
//! signed exponent (`1e-7`, `1.5e+21`).

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// A latitude/longitude pair. No range validation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Location {
    #[serde(rename = "lat", serialize_with = "serialize_coordinate")]
    pub latitude: f32,
    #[serde(rename = "lon", serialize_with = "serialize_coordinate")]
    pub longitude: f32,
}

impl Location {
    pub fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Decodes a request body into a location.
    ///
    /// A bare `null` body decodes to the zero location.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encodes the location as `{"lat":..,"lon":..}`.
    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Shortest text for a coordinate, or `None` for NaN and infinities.
pub fn format_coordinate(value: f32) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let abs = value.abs();
    if abs != 0.0 && (abs < 1e-6 || abs >= 1e21) {
        let text = format!("{:e}", value);
        let signed = match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
        Some(signed)
    } else {
        Some(value.to_string())
    }
}

fn serialize_coordinate<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = format_coordinate(*value).ok_or_else(|| {
        <S::Error as ser::Error>::custom(format_args!("unsupported value: {}", value))
    })?;
    RawValue::from_string(text)
        .map_err(<S::Error as ser::Error>::custom)?
        .serialize(serializer)
}

enum Field {
    Lat,
    Lon,
    Other,
}

impl Field {
    fn from_key(key: &str) -> Self {
        if key.eq_ignore_ascii_case("lat") {
            Field::Lat
        } else if key.eq_ignore_ascii_case("lon") {
            Field::Lon
        } else {
            Field::Other
        }
    }
}

fn json_kind(text: &str) -> &'static str {
    match text.as_bytes().first() {
        Some(b'"') => "string",
        Some(b't') | Some(b'f') => "boolean",
        Some(b'[') => "array",
        Some(b'{') => "object",
        _ => "value",
    }
}

/// Parses a raw JSON value as a coordinate with a single rounding to f32.
///
/// `null` yields `None`; numbers that overflow f32 are rejected.
fn parse_coordinate(raw: &RawValue) -> Result<Option<f32>, String> {
    let text = raw.get().trim();
    if text == "null" {
        return Ok(None);
    }

    let starts_numeric = matches!(text.as_bytes().first(), Some(b'-' | b'0'..=b'9'));
    if !starts_numeric {
        return Err(format!("invalid type: {}, expected f32", json_kind(text)));
    }

    match text.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Err(format!("number {} out of range for f32", text)),
        Err(e) => Err(format!("invalid number {}: {}", text, e)),
    }
}

struct LocationVisitor;

impl<'de> Visitor<'de> for LocationVisitor {
    type Value = Location;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with numeric lat and lon fields")
    }

    fn visit_unit<E>(self) -> Result<Location, E>
    where
        E: de::Error,
    {
        Ok(Location::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Location, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut location = Location::default();

        // Later duplicates overwrite earlier ones; null leaves the field untouched.
        while let Some(key) = map.next_key::<String>()? {
            let target = match Field::from_key(&key) {
                Field::Lat => &mut location.latitude,
                Field::Lon => &mut location.longitude,
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };

            let raw = map.next_value::<Box<RawValue>>()?;
            if let Some(v) = parse_coordinate(&raw).map_err(<A::Error as de::Error>::custom)? {
                *target = v;
            }
        }

        Ok(location)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LocationVisitor)
    }
}
