use std::str::FromStr;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A DynamoDB stream batch. Only the fields this function logs are read.
#[derive(Debug, Default, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StreamRecord>,
}

#[derive(Debug, Deserialize)]
pub struct StreamRecord {
    #[serde(rename = "eventID")]
    pub event_id: String,
    #[serde(rename = "eventName")]
    pub event_name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Modify,
    Remove,
}

impl FromStr for ChangeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(ChangeKind::Insert),
            "MODIFY" => Ok(ChangeKind::Modify),
            "REMOVE" => Ok(ChangeKind::Remove),
            _ => Err(Error::from("The passed event was of an unknown type"))
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct StreamSummary {
    pub processed: usize,
    pub inserted: usize,
    pub modified: usize,
    pub removed: usize,
    pub unknown: usize,
}

pub async fn function_handler(event: LambdaEvent<StreamEvent>) -> Result<StreamSummary, Error> {
    let mut summary = StreamSummary::default();
    for record in &event.payload.records {
        info!("EventID: {}", record.event_id);
        info!("EventName: {}", record.event_name);
        match ChangeKind::from_str(&record.event_name) {
            Ok(ChangeKind::Insert) => summary.inserted += 1,
            Ok(ChangeKind::Modify) => summary.modified += 1,
            Ok(ChangeKind::Remove) => summary.removed += 1,
            Err(e) => {
                warn!("{}: {}", e, record.event_name);
                summary.unknown += 1
            }
        }
        summary.processed += 1;
    }
    info!("Successfully processed {} records.", summary.processed);
    Ok(summary)
}
