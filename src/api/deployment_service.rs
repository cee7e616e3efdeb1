use crate::api::errors::ActionError;
use crate::constants::DEPLOYMENTS_PATH;
use crate::domain::deploy::deployment_args::DeploymentArgs;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeploymentService: Sync + Send {
    /// Post the resolved record to the orchestration service.
    ///
    /// Fires once; any non-2xx status is reported as a transport failure.
    async fn create_deployment(&self, args: &DeploymentArgs) -> Result<(), ActionError>;
}

pub struct DeploymentServiceImpl {
    client: Client,
    base_url: String,
    token: String,
}

impl DeploymentServiceImpl {
    pub fn new(base_url: &str, token: &str) -> Self {
        DeploymentServiceImpl {
            client: Client::new(),
            base_url: base_url.to_string(),
            token: token.to_string(),
        }
    }

    fn deployments_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            DEPLOYMENTS_PATH.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DeploymentService for DeploymentServiceImpl {
    async fn create_deployment(&self, args: &DeploymentArgs) -> Result<(), ActionError> {
        let url = self.deployments_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Deployment service replied: {:?}", response.text().await);
            return Err(ActionError::Transport(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        Ok(())
    }
}
