use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    VolumeDeleted { volume_id: String, dry_run: bool },
    SnapshotDeleted { snapshot_id: String, dry_run: bool },
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VolumeDeleted {
                volume_id,
                dry_run: false,
            } => write!(f, "Deleted idle volume: {volume_id}"),
            Self::VolumeDeleted {
                volume_id,
                dry_run: true,
            } => write!(f, "Would delete idle volume: {volume_id}"),
            Self::SnapshotDeleted {
                snapshot_id,
                dry_run: false,
            } => write!(f, "Deleted old snapshot: {snapshot_id}"),
            Self::SnapshotDeleted {
                snapshot_id,
                dry_run: true,
            } => write!(f, "Would delete old snapshot: {snapshot_id}"),
        }
    }
}

/// Ordered record of the actions taken during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    entries: Vec<ReportEntry>,
}

impl CleanupReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn volume_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ReportEntry::VolumeDeleted { .. }))
            .count()
    }

    pub fn snapshot_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ReportEntry::SnapshotDeleted { .. }))
            .count()
    }

    /// Newline-joined lines, one per entry, without a trailing newline.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
