use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RETENTION_DAYS: u32 = 30;
pub const MAX_RETENTION_DAYS: u32 = 36_500;
pub const REPORT_SUBJECT: &str = "AWS Cleanup Success";
pub const DRY_RUN_REPORT_SUBJECT: &str = "AWS Cleanup Dry Run";
pub const CLEANED_STATUS: &str = "cleaned";
pub const AVAILABLE_VOLUME_STATE: &str = "available";
pub const SELF_OWNER: &str = "self";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeState {
    Available,
    InUse,
    Other(String),
}

impl VolumeState {
    pub fn parse(value: &str) -> Self {
        match value {
            AVAILABLE_VOLUME_STATE => Self::Available,
            "in-use" => Self::InUse,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub volume_id: String,
    pub state: VolumeState,
}

impl Volume {
    pub fn new(volume_id: impl Into<String>, state: VolumeState) -> Self {
        Self {
            volume_id: volume_id.into(),
            state,
        }
    }

    pub fn is_unattached(&self) -> bool {
        self.state == VolumeState::Available
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub snapshot_id: String,
    pub start_time: Option<DateTime<Utc>>,
    pub owner_id: Option<String>,
}

impl Snapshot {
    pub fn new(snapshot_id: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            start_time: Some(start_time),
            owner_id: None,
        }
    }
}

/// Status object returned to the Lambda invoker once a run finishes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanupResponse {
    pub status: String,
}

impl CleanupResponse {
    pub fn cleaned() -> Self {
        Self {
            status: CLEANED_STATUS.to_string(),
        }
    }
}

/// Invocation payload. Scheduled events carry their own fields, which are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanupEvent {
    #[serde(default)]
    pub dry_run: Option<bool>,
}
