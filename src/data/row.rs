//! Typed rows of the dashboard dataset

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::constants::display::TIMESTAMP_FORMAT;
use crate::constants::schema;

/// Point in time on the chart X axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Build from Unix seconds, keeping millisecond precision
    pub fn from_unix_seconds(secs: f64) -> Option<Self> {
        if !secs.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis((secs * 1000.0).round() as i64).map(|dt| Self(dt.naive_utc()))
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Microseconds since the Unix epoch
    pub fn unix_micros(&self) -> i64 {
        self.0.and_utc().timestamp_micros()
    }

    /// Parse a timestamp from text, trying common date/time layouts
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Bare numbers are Unix seconds
        if let Ok(secs) = trimmed.parse::<f64>() {
            return Self::from_unix_seconds(secs);
        }

        let datetime_formats = [
            "%Y-%m-%dT%H:%M:%S%.fZ",
            "%Y-%m-%dT%H:%M:%SZ",
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y/%m/%d %H:%M:%S",
            "%d/%m/%Y %H:%M:%S",
            "%m/%d/%Y %H:%M:%S",
        ];
        for format in &datetime_formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(Self(dt));
            }
        }

        let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%b %d, %Y", "%d %b %Y"];
        for format in &date_formats {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return date.and_hms_opt(0, 0, 0).map(Self);
            }
        }

        None
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Timestamp::from_unix_seconds(secs)
                .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", secs))),
            Raw::Text(text) => Timestamp::parse(&text)
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {}", text))),
        }
    }
}

/// One of the four schema columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Timestamp,
    Category,
    Region,
    Value,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Timestamp, Column::Category, Column::Region, Column::Value];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Timestamp => schema::TIMESTAMP,
            Column::Category => schema::CATEGORY,
            Column::Region => schema::REGION,
            Column::Value => schema::VALUE,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single record of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: Timestamp,
    pub category: String,
    pub region: String,
    /// Always finite
    pub value: f64,
}

impl Row {
    pub fn new(
        timestamp: Timestamp,
        category: impl Into<String>,
        region: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            timestamp,
            category: category.into(),
            region: region.into(),
            value,
        }
    }

    pub fn cell(&self, column: Column) -> CellValue {
        match column {
            Column::Timestamp => CellValue::Timestamp(self.timestamp),
            Column::Category => CellValue::Text(self.category.clone()),
            Column::Region => CellValue::Text(self.region.clone()),
            Column::Value => CellValue::Number(self.value),
        }
    }
}

/// A table cell as handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Timestamp(Timestamp),
    Text(String),
    Number(f64),
}
