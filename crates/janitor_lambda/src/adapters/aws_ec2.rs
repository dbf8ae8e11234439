use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::Filter;
use chrono::{DateTime, Utc};
use janitor_core::contract::{Snapshot, Volume, VolumeState, AVAILABLE_VOLUME_STATE, SELF_OWNER};

use crate::adapters::block_on;
use crate::adapters::compute::ComputeApi;

#[derive(Clone)]
pub struct Ec2ComputeApi {
    client: aws_sdk_ec2::Client,
}

impl Ec2ComputeApi {
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

impl ComputeApi for Ec2ComputeApi {
    fn list_available_volumes(&self) -> Result<Vec<Volume>, String> {
        let client = self.client.clone();
        let volumes: Vec<aws_sdk_ec2::types::Volume> = block_on(async move {
            client
                .describe_volumes()
                .filters(
                    Filter::builder()
                        .name("status")
                        .values(AVAILABLE_VOLUME_STATE)
                        .build(),
                )
                .into_paginator()
                .items()
                .send()
                .try_collect()
                .await
        })
        .map_err(|error| DisplayErrorContext(&error).to_string())?;

        Ok(volumes.iter().filter_map(volume_from_sdk).collect())
    }

    fn delete_volume(&self, volume_id: &str) -> Result<(), String> {
        let client = self.client.clone();
        let volume_id = volume_id.to_string();

        block_on(async move {
            client
                .delete_volume()
                .volume_id(volume_id)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| DisplayErrorContext(&error).to_string())
        })
    }

    fn list_owned_snapshots(&self) -> Result<Vec<Snapshot>, String> {
        let client = self.client.clone();
        let snapshots: Vec<aws_sdk_ec2::types::Snapshot> = block_on(async move {
            client
                .describe_snapshots()
                .owner_ids(SELF_OWNER)
                .into_paginator()
                .items()
                .send()
                .try_collect()
                .await
        })
        .map_err(|error| DisplayErrorContext(&error).to_string())?;

        Ok(snapshots.iter().filter_map(snapshot_from_sdk).collect())
    }

    fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), String> {
        let client = self.client.clone();
        let snapshot_id = snapshot_id.to_string();

        block_on(async move {
            client
                .delete_snapshot()
                .snapshot_id(snapshot_id)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| DisplayErrorContext(&error).to_string())
        })
    }
}

/// Records without an identifier cannot be deleted and are skipped.
pub fn volume_from_sdk(volume: &aws_sdk_ec2::types::Volume) -> Option<Volume> {
    let volume_id = volume.volume_id()?;
    let state = volume
        .state()
        .map(|state| VolumeState::parse(state.as_str()))
        .unwrap_or_else(|| VolumeState::Other("unknown".to_string()));
    Some(Volume::new(volume_id, state))
}

pub fn snapshot_from_sdk(snapshot: &aws_sdk_ec2::types::Snapshot) -> Option<Snapshot> {
    let snapshot_id = snapshot.snapshot_id()?;
    let start_time = snapshot
        .start_time()
        .and_then(|time| DateTime::<Utc>::from_timestamp(time.secs(), time.subsec_nanos()));
    Some(Snapshot {
        snapshot_id: snapshot_id.to_string(),
        start_time,
        owner_id: snapshot.owner_id().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use aws_sdk_ec2::primitives::DateTime as SdkDateTime;
    use aws_sdk_ec2::types::VolumeState as SdkVolumeState;

    use super::*;

    #[test]
    fn maps_sdk_volume_state() {
        let volume = aws_sdk_ec2::types::Volume::builder()
            .volume_id("vol-0abc")
            .state(SdkVolumeState::Available)
            .build();
        assert_eq!(
            volume_from_sdk(&volume),
            Some(Volume::new("vol-0abc", VolumeState::Available))
        );

        let attached = aws_sdk_ec2::types::Volume::builder()
            .volume_id("vol-0def")
            .state(SdkVolumeState::InUse)
            .build();
        let mapped = volume_from_sdk(&attached).expect("volume should map");
        assert!(!mapped.is_unattached());
    }

    #[test]
    fn skips_records_without_identifiers() {
        let volume = aws_sdk_ec2::types::Volume::builder()
            .state(SdkVolumeState::Available)
            .build();
        assert_eq!(volume_from_sdk(&volume), None);

        let snapshot = aws_sdk_ec2::types::Snapshot::builder()
            .start_time(SdkDateTime::from_secs(1_700_000_000))
            .build();
        assert_eq!(snapshot_from_sdk(&snapshot), None);
    }

    #[test]
    fn converts_snapshot_start_time_to_utc() {
        let snapshot = aws_sdk_ec2::types::Snapshot::builder()
            .snapshot_id("snap-0123")
            .owner_id("123456789012")
            .start_time(SdkDateTime::from_secs(1_700_000_000))
            .build();

        let mapped = snapshot_from_sdk(&snapshot).expect("snapshot should map");
        assert_eq!(mapped.snapshot_id, "snap-0123");
        assert_eq!(mapped.owner_id.as_deref(), Some("123456789012"));
        assert_eq!(
            mapped.start_time,
            DateTime::<Utc>::from_timestamp(1_700_000_000, 0)
        );
    }
}
