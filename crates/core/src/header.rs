//! Version header model
//!
//! Each column gets a header: a standalone version shows its commit inline,
//! a rolled-up version shows a count label with member commits listed in a
//! popover. Popover members use a longer revision prefix and the full message.

use crate::data::{Commit, Version};
use crate::links::version_link;
use crate::time::DisplayZone;
use serde::Serialize;

const INLINE_REVISION_LEN: usize = 5;
const INLINE_MESSAGE_LEN: usize = 35;
const POPOVER_REVISION_LEN: usize = 10;

/// Display fields of one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub id: String,
    pub link: String,
    pub revision: String,
    pub author: String,
    pub message: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VersionHeader {
    Standalone(CommitSummary),
    RolledUp {
        label: String,
        members: Vec<CommitSummary>,
    },
}

/// Classify a version and extract its header fields
pub fn classify(version: &Version, zone: &DisplayZone) -> VersionHeader {
    match version {
        Version::Standalone { commit, .. } => VersionHeader::Standalone(summarize_commit(
            commit,
            zone,
            INLINE_REVISION_LEN,
            Some(INLINE_MESSAGE_LEN),
        )),
        Version::RolledUp { commits, .. } => VersionHeader::RolledUp {
            label: rollup_label(commits.len()),
            members: commits
                .iter()
                .map(|commit| summarize_commit(commit, zone, POPOVER_REVISION_LEN, None))
                .collect(),
        },
    }
}

/// "1 inactive version" / "N inactive versions"
pub fn rollup_label(count: usize) -> String {
    let noun = if count == 1 { "version" } else { "versions" };
    format!("{} inactive {}", count, noun)
}

fn summarize_commit(
    commit: &Commit,
    zone: &DisplayZone,
    revision_len: usize,
    message_len: Option<usize>,
) -> CommitSummary {
    let message = match message_len {
        Some(len) => prefix(&commit.message, len),
        None => commit.message.clone(),
    };

    CommitSummary {
        id: commit.id.clone(),
        link: version_link(&commit.id),
        revision: prefix(&commit.revision, revision_len),
        author: commit.author.clone(),
        message,
        time: zone.format(&commit.created_at),
    }
}

fn prefix(s: &str, len: usize) -> String {
    s.chars().take(len).collect()
}
