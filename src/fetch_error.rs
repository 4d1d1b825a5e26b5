#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection failure, non-success status, or a body that could not be read.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    #[error("Unable to load puzzles")]
    EmptyBody,
}

impl FetchError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
