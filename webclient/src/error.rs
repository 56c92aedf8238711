use std::path::PathBuf;

use reqwest::StatusCode;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Wrong {fields} (rejected by {requested_url})")]
    WrongCredential {
        fields: &'static str,
        requested_url: String,
    },

    #[error("No Kaggle credential found (set KAGGLE_USERNAME and KAGGLE_KEY, or put kaggle.json in {searched:?})")]
    NoCredential { searched: PathBuf },

    #[error("Cannot read credential file '{path}': {source}")]
    CredentialFile {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("Invalid credential file '{path}': {source}")]
    InvalidCredentialFile {
        path: PathBuf,

        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid credential in environment: {0}")]
    InvalidCredentialEnv(#[from] envy::Error),

    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Invalid competition slug '{0}' (expected lowercase letters, digits and '-')")]
    InvalidCompetitionSlug(String),

    #[error("No such competition '{competition}' (or you have not joined it)")]
    NoSuchCompetition { competition: String },

    #[error("Unexpected response code '{got}' while requesting to {requested_url}: {body}")]
    UnexpectedResponseCode {
        got: StatusCode,
        requested_url: String,
        body: String,
    },

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether retrying with the same credential can never succeed.
    pub fn is_auth_error(&self) -> bool {
        use Error::*;
        matches!(
            self,
            WrongCredential { .. }
                | NoCredential { .. }
                | CredentialFile { .. }
                | InvalidCredentialFile { .. }
                | InvalidCredentialEnv(_)
        )
    }
}
