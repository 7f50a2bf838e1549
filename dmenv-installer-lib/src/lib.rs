pub mod bump;
pub mod config;
pub mod destination;
pub mod download_client;
pub mod error;
pub mod git;
pub mod github;
pub mod installer;
pub mod logging;
pub mod release;
pub mod ui;

#[cfg(test)]
pub mod test_helpers;
