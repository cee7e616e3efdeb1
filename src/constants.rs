pub const TAG_REF_PREFIX: &str = "refs/tags/";
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";
pub const DEFAULT_BRANCH: &str = "master";

pub const MINOR_MARKER: &str = "#MINOR";
pub const MAJOR_MARKER: &str = "#MAJOR";

pub const DEPLOYMENTS_PATH: &str = "/deployments";

pub const MANDATORY_KEYS: [&str; 2] = ["app", "environment"];
pub const OPTIONAL_KEYS: [&str; 5] = ["branch", "cluster", "domain", "tag", "sha"];
pub const CHANGE_TYPE_KEY: &str = "changeType";
