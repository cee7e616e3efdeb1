use crate::api::deployment_service::DeploymentService;
use crate::api::errors::ActionError;
use crate::domain::deploy::args_resolver;
use crate::domain::deploy::vcs_context::VcsContext;
use log::info;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Deploy,
    Undeploy,
}

impl FromStr for Command {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deploy" => Ok(Command::Deploy),
            "undeploy" => Ok(Command::Undeploy),
            other => Err(ActionError::UnrecognizedCommand(other.to_string())),
        }
    }
}

pub struct DeployApp<'a> {
    deployment_service: Box<dyn DeploymentService + 'a>,
}

impl<'a> DeployApp<'a> {
    pub fn new(deployment_service: Box<dyn DeploymentService + 'a>) -> Self {
        DeployApp { deployment_service }
    }

    /// Resolve the raw args against the context and act on the command.
    ///
    /// Args are resolved for both commands, so bad args fail an undeploy too.
    pub async fn run(
        &self,
        command: Command,
        raw_args: &str,
        context: &VcsContext,
    ) -> Result<(), ActionError> {
        let args = args_resolver::resolve(raw_args, context)?;

        match command {
            Command::Deploy => {
                info!(
                    "Triggering 'deploy' with POST arguments: {}",
                    serde_json::to_string(&args).unwrap_or_default()
                );
                self.deployment_service.create_deployment(&args).await
            }
            Command::Undeploy => {
                info!("Not implemented");
                Ok(())
            }
        }
    }
}
