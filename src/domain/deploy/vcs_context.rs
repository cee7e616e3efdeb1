use anyhow::Context;
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub message: String,
}

/// Read-only version-control state of the triggering run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcsContext {
    pub git_ref: String,
    pub sha: String,
    pub commits: Vec<Commit>,
}

#[derive(Deserialize)]
struct EventPayload {
    #[serde(default)]
    commits: Option<Vec<Commit>>,
}

impl VcsContext {
    pub fn new(git_ref: Option<&str>, sha: Option<&str>, commits: Vec<Commit>) -> Self {
        VcsContext {
            git_ref: git_ref.unwrap_or_default().to_string(),
            sha: sha.unwrap_or_default().to_string(),
            commits,
        }
    }
}

/// Load the pushed commits from the webhook event payload file.
///
/// A missing path or file yields no commits; a file that is not valid
/// JSON is an error.
pub fn load_event_commits(event_path: Option<&Path>) -> anyhow::Result<Vec<Commit>> {
    let path = match event_path {
        Some(path) => path,
        None => {
            debug!("No event payload path given, skipping commit scan");
            return Ok(vec![]);
        }
    };

    if !path.exists() {
        warn!("Event payload file {} does not exist", path.display());
        return Ok(vec![]);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event payload {}", path.display()))?;
    let payload: EventPayload = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse event payload {}", path.display()))?;

    Ok(payload.commits.unwrap_or_default())
}
