use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Download of {url} failed with HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("Server did not declare a content length for {url}, cannot verify the download")]
    MissingContentLength { url: String },

    #[error("Short read: expecting {expected} bytes, got {actual}")]
    ShortRead { expected: u64, actual: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("{} already exists. Use --upgrade to upgrade", .0.display())]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected answer to the install location prompt. Recoverable: the user is asked again.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please enter a number")]
    NotANumber,

    #[error("Please choose between 1 and {count}")]
    OutOfRange { count: usize },
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No writable location found in PATH")]
    NoWritableLocation,

    #[error("Input closed before an install location was chosen")]
    InputClosed,

    #[error("Unsupported platform: '{0}'")]
    UnsupportedPlatform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Not on {expected} (current branch: {actual})")]
    NotOnMainBranch { expected: String, actual: String },

    #[error("Behind upstream")]
    BehindUpstream,

    #[error("Git command failed: {0}")]
    Git(String),

    #[error("Could not parse version file: {0}")]
    VersionFile(#[from] toml::de::Error),

    #[error("Version '{version}' is invalid: {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    #[error("Could not probe release asset: {0}")]
    Probe(#[from] FetchError),

    #[error("Release asset {url} is not available (HTTP status {status})")]
    MissingDelivery { url: String, status: u16 },

    #[error("No line starting with `{0}` found")]
    VersionLineNotFound(String),
}
