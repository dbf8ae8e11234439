use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use janitor_core::config::JanitorConfig;
use janitor_core::contract::{
    CleanupEvent, CleanupResponse, DRY_RUN_REPORT_SUBJECT, REPORT_SUBJECT,
};
use janitor_core::report::{CleanupReport, ReportEntry};
use janitor_core::retention::{expired_snapshots, retention_cutoff, unattached_volumes};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::adapters::compute::ComputeApi;
use crate::adapters::notify::Notifier;

const COMPONENT: &str = "cleanup_handler";

/// A failing cloud call aborts the rest of the run; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanupError {
    #[error("failed to list available volumes: {message}")]
    ListVolumes { message: String },
    #[error("failed to delete volume {volume_id}: {message}")]
    DeleteVolume { volume_id: String, message: String },
    #[error("failed to list owned snapshots: {message}")]
    ListSnapshots { message: String },
    #[error("failed to delete snapshot {snapshot_id}: {message}")]
    DeleteSnapshot { snapshot_id: String, message: String },
    #[error("failed to publish report to {topic_arn}: {message}")]
    Publish { topic_arn: String, message: String },
    #[error("invalid cleanup event: {0}")]
    InvalidEvent(String),
}

/// Entry point for a raw Lambda payload. The payload may override `dry_run`;
/// every other field is ignored.
pub fn handle_cleanup_event(
    event: Value,
    config: &JanitorConfig,
    now: DateTime<Utc>,
    compute: &impl ComputeApi,
    notifier: &impl Notifier,
) -> Result<CleanupResponse, CleanupError> {
    let event = parse_event(event)?;
    let mut effective = config.clone();
    if let Some(dry_run) = event.dry_run {
        effective.dry_run = dry_run;
    }
    handle_cleanup(&effective, now, compute, notifier)
}

pub fn handle_cleanup(
    config: &JanitorConfig,
    now: DateTime<Utc>,
    compute: &impl ComputeApi,
    notifier: &impl Notifier,
) -> Result<CleanupResponse, CleanupError> {
    let started_at = Instant::now();
    info!(
        component = COMPONENT,
        event = "cleanup_started",
        retention_days = config.retention_days,
        dry_run = config.dry_run,
        "starting cleanup run"
    );

    let mut report = CleanupReport::new();
    match run_cleanup(config, now, compute, notifier, &mut report) {
        Ok(()) => {
            info!(
                component = COMPONENT,
                event = "cleanup_completed",
                volumes_deleted = report.volume_count(),
                snapshots_deleted = report.snapshot_count(),
                duration_ms = elapsed_ms(started_at.elapsed()),
                "cleanup run completed"
            );
            Ok(CleanupResponse::cleaned())
        }
        Err(failure) => {
            error!(
                component = COMPONENT,
                event = "cleanup_failed",
                deletions_before_failure = report.len(),
                duration_ms = elapsed_ms(started_at.elapsed()),
                error = %failure,
                "cleanup run aborted"
            );
            Err(failure)
        }
    }
}

fn run_cleanup(
    config: &JanitorConfig,
    now: DateTime<Utc>,
    compute: &impl ComputeApi,
    notifier: &impl Notifier,
    report: &mut CleanupReport,
) -> Result<(), CleanupError> {
    delete_unattached_volumes(config, compute, report)?;
    delete_expired_snapshots(config, now, compute, report)?;
    publish_report(config, notifier, report)
}

fn delete_unattached_volumes(
    config: &JanitorConfig,
    compute: &impl ComputeApi,
    report: &mut CleanupReport,
) -> Result<(), CleanupError> {
    let volumes = compute
        .list_available_volumes()
        .map_err(|message| CleanupError::ListVolumes { message })?;

    for volume in unattached_volumes(&volumes) {
        if !config.dry_run {
            compute
                .delete_volume(&volume.volume_id)
                .map_err(|message| CleanupError::DeleteVolume {
                    volume_id: volume.volume_id.clone(),
                    message,
                })?;
        }
        info!(
            component = COMPONENT,
            event = "volume_deleted",
            volume_id = %volume.volume_id,
            dry_run = config.dry_run
        );
        report.push(ReportEntry::VolumeDeleted {
            volume_id: volume.volume_id.clone(),
            dry_run: config.dry_run,
        });
    }
    Ok(())
}

fn delete_expired_snapshots(
    config: &JanitorConfig,
    now: DateTime<Utc>,
    compute: &impl ComputeApi,
    report: &mut CleanupReport,
) -> Result<(), CleanupError> {
    let cutoff = retention_cutoff(now, config.retention_days);
    let snapshots = compute
        .list_owned_snapshots()
        .map_err(|message| CleanupError::ListSnapshots { message })?;

    let expired = expired_snapshots(&snapshots, cutoff);
    debug!(
        component = COMPONENT,
        event = "snapshot_retained",
        retained = snapshots.len() - expired.len(),
        cutoff = %cutoff.to_rfc3339()
    );

    for snapshot in expired {
        if !config.dry_run {
            compute
                .delete_snapshot(&snapshot.snapshot_id)
                .map_err(|message| CleanupError::DeleteSnapshot {
                    snapshot_id: snapshot.snapshot_id.clone(),
                    message,
                })?;
        }
        info!(
            component = COMPONENT,
            event = "snapshot_deleted",
            snapshot_id = %snapshot.snapshot_id,
            dry_run = config.dry_run
        );
        report.push(ReportEntry::SnapshotDeleted {
            snapshot_id: snapshot.snapshot_id.clone(),
            dry_run: config.dry_run,
        });
    }
    Ok(())
}

fn publish_report(
    config: &JanitorConfig,
    notifier: &impl Notifier,
    report: &CleanupReport,
) -> Result<(), CleanupError> {
    if report.is_empty() {
        info!(
            component = COMPONENT,
            event = "report_skipped",
            "nothing deleted, no report published"
        );
        return Ok(());
    }

    let subject = if config.dry_run {
        DRY_RUN_REPORT_SUBJECT
    } else {
        REPORT_SUBJECT
    };
    notifier
        .publish(&config.topic_arn, subject, &report.render())
        .map_err(|message| CleanupError::Publish {
            topic_arn: config.topic_arn.clone(),
            message,
        })?;

    info!(
        component = COMPONENT,
        event = "report_published",
        topic_arn = %config.topic_arn,
        lines = report.len()
    );
    Ok(())
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn parse_event(event: Value) -> Result<CleanupEvent, CleanupError> {
    match event {
        Value::Null => Ok(CleanupEvent::default()),
        Value::Object(_) => serde_json::from_value(event)
            .map_err(|error| CleanupError::InvalidEvent(error.to_string())),
        _ => Err(CleanupError::InvalidEvent(
            "payload must be a JSON object".to_string(),
        )),
    }
}
