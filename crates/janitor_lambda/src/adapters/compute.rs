use janitor_core::contract::{Snapshot, Volume};

/// Errors carry the provider's message only; callers add the step and resource.
pub trait ComputeApi {
    /// Volumes in the `available` state, in the order the provider returned them.
    fn list_available_volumes(&self) -> Result<Vec<Volume>, String>;
    fn delete_volume(&self, volume_id: &str) -> Result<(), String>;
    /// Snapshots owned by the calling account.
    fn list_owned_snapshots(&self) -> Result<Vec<Snapshot>, String>;
    fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), String>;
}
