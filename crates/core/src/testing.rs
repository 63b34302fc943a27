//! Payload builders shared by unit tests

use crate::data::{Build, BuildVariant, Payload, RawVersion, Task, TaskStatusCount};

pub fn task(id: &str, status: &str) -> Task {
    Task {
        id: id.to_string(),
        display_name: format!("{}-name", id),
        status: status.to_string(),
    }
}

pub fn counts(
    succeeded: u32,
    started: u32,
    timed_out: u32,
    undispatched: u32,
    inactive: u32,
) -> TaskStatusCount {
    TaskStatusCount {
        succeeded,
        started,
        timed_out,
        undispatched,
        inactive,
    }
}

/// A build for the variant whose id is the display name lowercased
pub fn build(display_name: &str, tasks: Vec<Task>) -> Build {
    build_with_counts(display_name, tasks, TaskStatusCount::default())
}

pub fn build_with_counts(display_name: &str, tasks: Vec<Task>, status_count: TaskStatusCount) -> Build {
    Build {
        build_variant: BuildVariant {
            id: display_name.to_lowercase(),
            display_name: display_name.to_string(),
        },
        tasks,
        status_count,
    }
}

pub fn standalone(id: &str, builds: Vec<Build>) -> RawVersion {
    RawVersion {
        rolled_up: false,
        ids: vec![id.to_string()],
        messages: vec![format!("commit message for {}", id)],
        authors: vec!["kim".to_string()],
        revisions: vec![format!("{}0123456789abcdef", id)],
        create_times: vec!["1996-05-07T01:15:00".to_string()],
        builds,
    }
}

pub fn rolled_up(ids: &[&str]) -> RawVersion {
    RawVersion {
        rolled_up: true,
        ids: ids.iter().map(|id| id.to_string()).collect(),
        messages: ids.iter().map(|id| format!("inactive {}", id)).collect(),
        authors: ids.iter().map(|_| "lee".to_string()).collect(),
        revisions: ids.iter().map(|id| format!("{}fedcba9876543210", id)).collect(),
        create_times: ids.iter().map(|_| "1996-05-07T13:45:30Z".to_string()).collect(),
        builds: Vec::new(),
    }
}

pub fn payload(versions: Vec<RawVersion>, build_variants: &[&str]) -> Payload {
    Payload {
        versions,
        build_variants: build_variants.iter().map(|v| v.to_string()).collect(),
    }
}
