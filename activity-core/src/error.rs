use thiserror::Error;

/// Failures produced while fetching conditions or turning them into advice.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint could not be reached or answered with a non-success status.
    #[error("Error fetching data. Please check the API endpoint and try again. ({message})")]
    Transport { message: String },

    /// The endpoint answered, but reported an application-level error in the body.
    #[error("Error: {info}")]
    UpstreamRejection {
        info: String,
        code: Option<i64>,
        kind: Option<String>,
    },

    /// An expected field was absent or had the wrong shape.
    #[error("Malformed weather data: {0}")]
    MalformedInput(String),
}

impl Error {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }
}
