mod cli;
mod config;
mod constants;

mod api {
    pub mod deployment_service;
    pub mod errors;
}
mod domain {
    pub mod deploy {
        pub mod args_resolver;
        pub mod deploy_app;
        pub mod deployment_args;
        pub mod vcs_context;
    }
}

use crate::api::deployment_service::DeploymentServiceImpl;
use crate::cli::Cli;
use crate::config::Config;
use crate::domain::deploy::deploy_app::{Command, DeployApp};
use crate::domain::deploy::vcs_context::{load_event_commits, VcsContext};
use clap::Parser;
use log::error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{:#}", err);
            error!("{}", message);
            // Marks the step as failed in the runner's log
            println!("::error::{}", escape_workflow_data(&message));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(cli)?;
    let command: Command = config.command.parse()?;

    let commits = match command {
        Command::Deploy => load_event_commits(cli.event_path.as_deref())?,
        Command::Undeploy => vec![],
    };
    let context = VcsContext::new(cli.git_ref.as_deref(), cli.sha.as_deref(), commits);

    let deployment_service = DeploymentServiceImpl::new(&config.host, &config.token);
    DeployApp::new(Box::new(deployment_service))
        .run(command, &config.raw_args, &context)
        .await?;

    Ok(())
}

fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
