//! Data structures for the waterfall payload and its versions

use crate::error::{Error, Result};
use crate::time::{parse_timestamp, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

/// Read an absent or `null` list as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Build variant metadata attached to every build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildVariant {
    /// Stable identifier, used for the variant page link
    pub id: String,
    /// Human-readable name, used for row order
    pub display_name: String,
}

/// One unit of work within a build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub display_name: String,
    /// Raw status string (e.g. "success", "failed", "system-failed")
    pub status: String,
}

/// Per-status task counts precomputed by the server
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TaskStatusCount {
    pub succeeded: u32,
    pub started: u32,
    pub timed_out: u32,
    pub undispatched: u32,
    pub inactive: u32,
}

/// The result of running one version against one build variant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Build {
    pub build_variant: BuildVariant,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
    #[serde(rename = "waterfallTaskStatusCount", default)]
    pub status_count: TaskStatusCount,
}

/// A version entry exactly as the server delivers it
///
/// The five commit arrays are parallel: index `k` in each refers to the same
/// commit. Standalone versions carry one entry per array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawVersion {
    #[serde(default)]
    pub rolled_up: bool,
    pub ids: Vec<String>,
    pub messages: Vec<String>,
    pub authors: Vec<String>,
    pub revisions: Vec<String>,
    pub create_times: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub builds: Vec<Build>,
}

/// The complete server payload for one waterfall page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Payload {
    pub versions: Vec<RawVersion>,
    /// Build variant display names, one per grid row
    pub build_variants: Vec<String>,
}

impl Payload {
    /// Parse a payload from its JSON form
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a payload from a JSON file
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_json(&content)
    }
}

/// A single commit shown in a version header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub revision: String,
    pub author: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// One column of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// A single active commit with one build per variant row
    Standalone { commit: Commit, builds: Vec<Build> },
    /// A group of inactive commits collapsed into one column
    RolledUp { commits: Vec<Commit>, builds: Vec<Build> },
}

impl Version {
    /// Convert a payload entry, checking that the commit arrays line up
    pub fn from_raw(index: usize, raw: RawVersion) -> Result<Self> {
        let len = raw.ids.len();
        if [
            raw.messages.len(),
            raw.authors.len(),
            raw.revisions.len(),
            raw.create_times.len(),
        ]
        .iter()
        .any(|&other| other != len)
        {
            return Err(Error::MismatchedCommitFields {
                version: index,
                ids: raw.ids.len(),
                messages: raw.messages.len(),
                authors: raw.authors.len(),
                revisions: raw.revisions.len(),
                create_times: raw.create_times.len(),
            });
        }
        if len == 0 {
            return Err(Error::EmptyVersion(index));
        }
        if !raw.rolled_up && len > 1 {
            return Err(Error::StandaloneWithManyCommits {
                version: index,
                commits: len,
            });
        }

        let mut commits = Vec::with_capacity(len);
        for ((((id, message), author), revision), create_time) in raw
            .ids
            .into_iter()
            .zip(raw.messages)
            .zip(raw.authors)
            .zip(raw.revisions)
            .zip(raw.create_times)
        {
            commits.push(Commit {
                id,
                revision,
                author,
                message,
                created_at: parse_timestamp(&create_time)?,
            });
        }

        if raw.rolled_up {
            Ok(Version::RolledUp {
                commits,
                builds: raw.builds,
            })
        } else {
            let commit = commits.remove(0);
            Ok(Version::Standalone {
                commit,
                builds: raw.builds,
            })
        }
    }

    pub fn is_rolled_up(&self) -> bool {
        matches!(self, Version::RolledUp { .. })
    }

    /// Commits in this column, in payload order
    pub fn commits(&self) -> &[Commit] {
        match self {
            Version::Standalone { commit, .. } => std::slice::from_ref(commit),
            Version::RolledUp { commits, .. } => commits,
        }
    }

    /// Builds in this column; for standalone versions, one per variant row
    pub fn builds(&self) -> &[Build] {
        match self {
            Version::Standalone { builds, .. } | Version::RolledUp { builds, .. } => builds,
        }
    }

    /// Identifier of the first commit, used as the column key
    pub fn id(&self) -> &str {
        match self {
            Version::Standalone { commit, .. } => &commit.id,
            Version::RolledUp { commits, .. } => &commits[0].id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{rolled_up, standalone};

    #[test]
    fn test_payload_from_json() {
        let json = r#"{
            "versions": [{
                "rolled_up": false,
                "ids": ["v1"],
                "messages": ["fix the thing"],
                "authors": ["kim"],
                "revisions": ["0123456789abcdef"],
                "create_times": ["2017-06-20T17:04:59.000Z"],
                "builds": [{
                    "build_variant": {"id": "ubuntu1604", "display_name": "Ubuntu 16.04"},
                    "tasks": [{"id": "t1", "display_name": "compile", "status": "success"}],
                    "waterfallTaskStatusCount": {"succeeded": 1, "started": 0, "timed_out": 0, "undispatched": 0, "inactive": 0}
                }]
            }],
            "build_variants": ["Ubuntu 16.04"]
        }"#;

        let payload = Payload::from_json(json).unwrap();
        assert_eq!(payload.versions.len(), 1);
        let build = &payload.versions[0].builds[0];
        assert_eq!(build.build_variant.id, "ubuntu1604");
        assert_eq!(build.status_count.succeeded, 1);
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let json = r#"{
            "build_variant": {"id": "a", "display_name": "A"},
            "waterfallTaskStatusCount": {"succeeded": 3}
        }"#;

        let build: Build = serde_json::from_str(json).unwrap();
        assert!(build.tasks.is_empty());
        assert_eq!(build.status_count.succeeded, 3);
        assert_eq!(build.status_count.inactive, 0);
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let json = r#"{
            "versions": [
                {
                    "ids": ["v1"],
                    "messages": ["m"],
                    "authors": ["kim"],
                    "revisions": ["0123456789"],
                    "create_times": ["1996-05-07T01:15:00"],
                    "builds": [{
                        "build_variant": {"id": "a", "display_name": "A"},
                        "tasks": null
                    }]
                },
                {
                    "rolled_up": true,
                    "ids": ["r1"],
                    "messages": ["m"],
                    "authors": ["lee"],
                    "revisions": ["abcdef"],
                    "create_times": ["1996-05-07T02:00:00Z"],
                    "builds": null
                }
            ],
            "build_variants": ["A"]
        }"#;

        let payload = Payload::from_json(json).unwrap();
        assert!(payload.versions[0].builds[0].tasks.is_empty());
        assert!(payload.versions[1].builds.is_empty());

        let version = Version::from_raw(1, payload.versions[1].clone()).unwrap();
        assert!(version.is_rolled_up());
        assert!(version.builds().is_empty());
    }

    #[test]
    fn test_standalone_from_raw() {
        let version = Version::from_raw(0, standalone("v1", vec![])).unwrap();
        assert!(!version.is_rolled_up());
        assert_eq!(version.id(), "v1");
        assert_eq!(version.commits().len(), 1);
    }

    #[test]
    fn test_rolled_up_from_raw_keeps_order() {
        let version = Version::from_raw(2, rolled_up(&["a", "b", "c"])).unwrap();
        assert!(version.is_rolled_up());
        let ids: Vec<_> = version.commits().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mismatched_commit_fields() {
        let mut raw = rolled_up(&["a", "b"]);
        raw.authors.pop();

        let err = Version::from_raw(4, raw).unwrap_err();
        assert!(matches!(
            err,
            Error::MismatchedCommitFields {
                version: 4,
                authors: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_version_rejected() {
        let err = Version::from_raw(1, rolled_up(&[])).unwrap_err();
        assert!(matches!(err, Error::EmptyVersion(1)));
    }

    #[test]
    fn test_standalone_with_many_commits_rejected() {
        let mut raw = rolled_up(&["a", "b"]);
        raw.rolled_up = false;

        let err = Version::from_raw(0, raw).unwrap_err();
        assert!(matches!(
            err,
            Error::StandaloneWithManyCommits {
                version: 0,
                commits: 2
            }
        ));
    }
}
