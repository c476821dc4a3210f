// Error type shared by the library modules. The binary wraps these in
// `anyhow` for context; every variant ends the run with exit code 1.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop an upload run.
#[derive(Error, Debug)]
pub enum Error {
    /// A required environment variable was not set.
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    /// The positional argument does not point at a directory.
    #[error("Error, {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The create endpoint answered with something other than 200.
    #[error("Error creating temporary site {code}, response:\n{body}", code = .status.as_u16())]
    Provisioning { status: StatusCode, body: String },

    /// The create endpoint answered 200 but the body was not a site.
    #[error("invalid site creation response: {source}, response:\n{body}")]
    MalformedSiteResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Every upload URL is built by appending to the site URL, so it must
    /// end in a slash.
    #[error("site url {0:?} does not end with '/'")]
    InvalidUploadRoot(String),

    /// A file upload answered with something other than 200.
    #[error("invalid response from \"{path}\" status={code} response={body}", code = .status.as_u16())]
    Upload {
        path: String,
        status: StatusCode,
        body: String,
    },

    /// A file upload answered 200 but the body was not an upload summary.
    #[error("invalid upload response from \"{path}\": {source}, response={body}")]
    MalformedUploadResponse {
        path: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("upload task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
