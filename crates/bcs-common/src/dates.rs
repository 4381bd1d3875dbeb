//! Vendor date and date-time codecs
//!
//! The bulk API sends dates as `YYYY-MM-DD` and timestamps as
//! `YYYY-MM-DDTHH:MM:SS` with no offset and no fractional seconds. Both
//! types here parse those layouts strictly and always serialize back to the
//! exact same layout, so a decode followed by an encode reproduces the
//! original string.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// chrono format string for date-only fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// chrono format string for timezone-less date-time fields.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// Shape masks: `9` is any ASCII digit, everything else must match exactly.
const DATE_LAYOUT: &[u8] = b"9999-99-99";
const DATE_TIME_LAYOUT: &[u8] = b"9999-99-99T99:99:99";

/// A value did not match the expected vendor layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {value:?} as {expected}")]
pub struct DateParseError {
    /// The rejected input
    pub value: String,
    /// Human readable layout that was expected
    pub expected: &'static str,
}

fn matches_layout(value: &str, layout: &[u8]) -> bool {
    value.len() == layout.len()
        && value
            .bytes()
            .zip(layout.iter())
            .all(|(b, &l)| if l == b'9' { b.is_ascii_digit() } else { b == l })
}

/// A calendar date in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateParseError {
            value: s.to_string(),
            expected: "YYYY-MM-DD",
        };
        if !matches_layout(s, DATE_LAYOUT) {
            return Err(err());
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| err())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// A wall-clock timestamp in `YYYY-MM-DDTHH:MM:SS` form, no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    pub fn new(date_time: NaiveDateTime) -> Self {
        Self(date_time)
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(date_time: NaiveDateTime) -> Self {
        Self(date_time)
    }
}

impl FromStr for DateTime {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateParseError {
            value: s.to_string(),
            expected: "YYYY-MM-DDTHH:MM:SS",
        };
        if !matches_layout(s, DATE_TIME_LAYOUT) {
            return Err(err());
        }
        NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
            .map(Self)
            .map_err(|_| err())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_FORMAT))
    }
}

/// Visitor shared by both codecs: accept a JSON string and hand it to `FromStr`.
struct LayoutVisitor<T>(std::marker::PhantomData<T>);

impl<'de, T> Visitor<'de> for LayoutVisitor<T>
where
    T: FromStr<Err = DateParseError>,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a vendor formatted date string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(E::custom)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(LayoutVisitor(std::marker::PhantomData))
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(LayoutVisitor(std::marker::PhantomData))
    }
}
