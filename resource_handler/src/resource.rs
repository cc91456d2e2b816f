use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use chrono::{DateTime, Duration, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use crate::error::ResourceError;

pub const RESOURCE_IDENTIFIER: &str = "resource_identifier";
pub const CREATED_DATE: &str = "createdDate";
pub const MODIFIED_DATE: &str = "modifiedDate";
pub const METADATA: &str = "metadata";
pub const FILES: &str = "files";
pub const OWNER: &str = "owner";

/// A UTC instant, always rendered with microsecond precision and a `Z` suffix.
///
/// The rendering has a fixed width so that string order equals time order;
/// `modifiedDate` is the sort key of the record table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Timestamp(dt)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// The smallest representable instant after this one.
    pub fn next_tick(&self) -> Self {
        Timestamp(self.0 + Duration::microseconds(1))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Anything finer than a microsecond is dropped so a parsed value
        // renders back to the same instant it is compared as.
        let parsed = DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc);
        let micros = parsed.timestamp_subsec_micros();
        let truncated = parsed
            .with_nanosecond(micros * 1_000)
            .unwrap_or(parsed);
        Ok(Timestamp(truncated))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timestamp::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Modify,
    Remove,
    Retrieve,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Insert => "INSERT",
            Operation::Modify => "MODIFY",
            Operation::Remove => "REMOVE",
            Operation::Retrieve => "RETRIEVE",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(Operation::Insert),
            "MODIFY" => Ok(Operation::Modify),
            "REMOVE" => Ok(Operation::Remove),
            "RETRIEVE" => Ok(Operation::Retrieve),
            other => Err(ResourceError::bad_request(format!("Unknown operation {}", other))),
        }
    }
}

/// A resource as received from a client or stored in the record table.
///
/// Every field is optional on the wire; the validator decides which ones an
/// operation needs before the engine reads them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_identifier: Option<String>,
    #[serde(rename = "createdDate", default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,
    #[serde(rename = "modifiedDate", default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Resource {
    pub fn new(metadata: Value, files: Value, owner: impl Into<String>) -> Self {
        Resource {
            metadata: Some(metadata),
            files: Some(files),
            owner: Some(owner.into()),
            ..Default::default()
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.resource_identifier = Some(identifier.into());
        self
    }

    pub fn identifier(&self) -> Option<&str> {
        self.resource_identifier.as_deref()
    }
}

/// The JSON body of an inbound request.
#[derive(Debug, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub resource: Option<Resource>,
}
