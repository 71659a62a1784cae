use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration: {0}")]
    Config(String),

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api: {endpoint} answered {status}: {message}")]
    Api {
        status: StatusCode,
        endpoint: String,
        message: String,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("contributor statistics for `{repository}` still computing after {attempts} attempts")]
    StatsNotReady { repository: String, attempts: u32 },

    #[error("delivery: {0}")]
    Delivery(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api(status: StatusCode, endpoint: impl ToString, message: impl ToString) -> Self {
        Self::Api {
            status,
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }
}
