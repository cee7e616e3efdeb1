use clap::Parser;
use std::path::PathBuf;

/// Trigger a deployment on the orchestration service from a CI run.
///
/// Every input falls back to the environment variables a GitHub Actions
/// runner provides.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// `deploy` or `undeploy`
    #[arg(long, env = "INPUT_COMMAND")]
    pub command: Option<String>,

    /// Deployment args as JSON or YAML
    #[arg(long, env = "INPUT_ARGS")]
    pub args: Option<String>,

    /// Base URL of the deployment service
    #[arg(long, env = "INPUT_HOST")]
    pub host: Option<String>,

    /// Bearer token for the deployment service
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Ref of the triggering run, e.g. refs/heads/main
    #[arg(long = "ref", env = "GITHUB_REF")]
    pub git_ref: Option<String>,

    /// Commit sha of the triggering run
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: Option<String>,

    /// Webhook event payload holding the pushed commits
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,
}
