use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use janitor_core::config::JanitorConfig;
use janitor_core::contract::{Snapshot, Volume, VolumeState};
use janitor_lambda::adapters::compute::ComputeApi;
use janitor_lambda::adapters::notify::Notifier;

pub const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:cloud-janitor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeCall {
    ListVolumes,
    DeleteVolume(String),
    ListSnapshots,
    DeleteSnapshot(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub topic_arn: String,
    pub subject: String,
    pub message: String,
}

/// In-memory account that records every call and can be told to fail one call.
pub struct FakeAccount {
    volumes: Vec<Volume>,
    snapshots: Vec<Snapshot>,
    failing_resource: Option<String>,
    failing_listing: Option<ComputeCall>,
    calls: Mutex<Vec<ComputeCall>>,
}

impl FakeAccount {
    pub fn new(volumes: Vec<Volume>, snapshots: Vec<Snapshot>) -> Self {
        Self {
            volumes,
            snapshots,
            failing_resource: None,
            failing_listing: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, resource_id: &str) -> Self {
        self.failing_resource = Some(resource_id.to_string());
        self
    }

    /// `listing` is `ComputeCall::ListVolumes` or `ComputeCall::ListSnapshots`.
    pub fn failing_listing(mut self, listing: ComputeCall) -> Self {
        self.failing_listing = Some(listing);
        self
    }

    pub fn calls(&self) -> Vec<ComputeCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ComputeCall::DeleteVolume(id) | ComputeCall::DeleteSnapshot(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ComputeCall) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }

    fn check_listing(&self, listing: &ComputeCall) -> Result<(), String> {
        match &self.failing_listing {
            Some(failing) if failing == listing => Err("RequestLimitExceeded".to_string()),
            _ => Ok(()),
        }
    }

    fn check(&self, resource_id: &str) -> Result<(), String> {
        match &self.failing_resource {
            Some(failing) if failing == resource_id => {
                Err(format!("UnauthorizedOperation on {resource_id}"))
            }
            _ => Ok(()),
        }
    }
}

impl ComputeApi for FakeAccount {
    fn list_available_volumes(&self) -> Result<Vec<Volume>, String> {
        self.record(ComputeCall::ListVolumes);
        self.check_listing(&ComputeCall::ListVolumes)?;
        Ok(self
            .volumes
            .iter()
            .filter(|volume| volume.state == VolumeState::Available)
            .cloned()
            .collect())
    }

    fn delete_volume(&self, volume_id: &str) -> Result<(), String> {
        self.record(ComputeCall::DeleteVolume(volume_id.to_string()));
        self.check(volume_id)
    }

    fn list_owned_snapshots(&self) -> Result<Vec<Snapshot>, String> {
        self.record(ComputeCall::ListSnapshots);
        self.check_listing(&ComputeCall::ListSnapshots)?;
        Ok(self.snapshots.clone())
    }

    fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), String> {
        self.record(ComputeCall::DeleteSnapshot(snapshot_id.to_string()));
        self.check(snapshot_id)
    }
}

pub struct CapturingNotifier {
    published: Mutex<Vec<Published>>,
    fail: bool,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().expect("poisoned mutex").clone()
    }
}

impl Notifier for CapturingNotifier {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String> {
        if self.fail {
            return Err("AuthorizationError: not allowed to publish".to_string());
        }
        self.published
            .lock()
            .expect("poisoned mutex")
            .push(Published {
                topic_arn: topic_arn.to_string(),
                subject: subject.to_string(),
                message: message.to_string(),
            });
        Ok(())
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 4, 3, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn snapshot_aged(snapshot_id: &str, days: i64) -> Snapshot {
    Snapshot {
        snapshot_id: snapshot_id.to_string(),
        start_time: Some(now() - Duration::days(days)),
        owner_id: Some("123456789012".to_string()),
    }
}

pub fn available(volume_id: &str) -> Volume {
    Volume::new(volume_id, VolumeState::Available)
}

pub fn config() -> JanitorConfig {
    JanitorConfig {
        topic_arn: TOPIC_ARN.to_string(),
        retention_days: 30,
        dry_run: false,
    }
}
