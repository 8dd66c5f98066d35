#[derive(Debug, thiserror::Error)]
pub enum CardTraderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing API token: set {0}")]
    MissingToken(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CardTraderError>;

/// Why one product group contributed nothing to an expansion result.
///
/// These are recovered locally by the price selector and never abort the
/// batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupSkip {
    #[error("group is not a list of listings")]
    NotAList,

    #[error("listing {index} is not an object")]
    NotAnObject { index: usize },

    #[error("no listing carries field '{field}'")]
    MissingField { field: String },

    #[error("field '{field}' has an unexpected type or value")]
    InvalidField { field: String },
}
