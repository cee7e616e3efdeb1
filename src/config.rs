use crate::api::errors::ActionError;
use crate::cli::Cli;

/// The required invocation inputs, trimmed and checked for presence.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub command: String,
    pub raw_args: String,
    pub host: String,
    pub token: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ActionError> {
        Ok(Config {
            command: required_input("command", cli.command.as_deref())?,
            raw_args: required_input("args", cli.args.as_deref())?,
            host: required_input("host", cli.host.as_deref())?,
            token: required_input("token", cli.token.as_deref())?,
        })
    }
}

fn required_input(name: &'static str, value: Option<&str>) -> Result<String, ActionError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ActionError::MissingInput(name)),
    }
}
