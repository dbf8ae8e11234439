use chrono::{DateTime, Duration, Utc};

use crate::contract::{Snapshot, Volume};

/// Saturates at the earliest representable instant instead of overflowing.
pub fn retention_cutoff(now: DateTime<Utc>, retention_days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(retention_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A snapshot without a creation timestamp is never considered expired.
pub fn is_expired(snapshot: &Snapshot, cutoff: DateTime<Utc>) -> bool {
    snapshot
        .start_time
        .is_some_and(|start_time| start_time < cutoff)
}

pub fn expired_snapshots(snapshots: &[Snapshot], cutoff: DateTime<Utc>) -> Vec<&Snapshot> {
    snapshots
        .iter()
        .filter(|snapshot| is_expired(snapshot, cutoff))
        .collect()
}

pub fn unattached_volumes(volumes: &[Volume]) -> Vec<&Volume> {
    volumes.iter().filter(|volume| volume.is_unattached()).collect()
}
