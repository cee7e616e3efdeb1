use thiserror::Error;

/// Failures surfaced as the invocation's outcome.
///
/// `MissingMandatory` and `InvalidOptional` are the two shapes of an args
/// validation failure; the first failing key wins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Unable to parse args. Found content: \"{raw}\"")]
    Parse { raw: String },

    #[error("Invalid arg value for mandatory key \"{key}\". Found \"{found}\" while expecting a string.")]
    MissingMandatory { key: String, found: String },

    #[error("Expecting string in \"{key}\" optional arg. Found \"{found}\".")]
    InvalidOptional { key: String, found: String },

    #[error("Invalid command \"{0}\".")]
    UnrecognizedCommand(String),

    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ActionError {
    fn from(err: reqwest::Error) -> Self {
        ActionError::Transport(err.to_string())
    }
}
