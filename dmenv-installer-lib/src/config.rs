use crate::error::ResolveError;
use crate::release::{Platform, ReleaseSource, VERSION};
use std::ffi::OsString;

/// Read size used by the downloader when none is given.
pub const DEFAULT_CHUNK_SIZE: usize = 100 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the installed executable, without platform extension
    pub tool_name: String,

    /// Release tag to install (e.g. `v0.4.2`)
    pub release: String,

    /// Where release artifacts are downloaded from
    pub source: ReleaseSource,

    /// Host operating system identifier, as in `std::env::consts::OS`.
    pub os: String,

    /// Number of bytes read from the network per chunk
    pub chunk_size: usize,

    /// Raw value of the search-path variable, if set.
    pub search_path: Option<OsString>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Config {
    /// Captures the process environment once. Nothing else in the crate reads
    /// `PATH` or the host OS directly.
    pub fn from_env() -> Self {
        Self {
            tool_name: "dmenv".to_string(),
            release: VERSION.to_string(),
            source: ReleaseSource::default(),
            os: std::env::consts::OS.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            search_path: std::env::var_os("PATH"),
        }
    }

    pub fn platform(&self) -> Result<Platform, ResolveError> {
        Platform::from_os(&self.os)
    }

    pub fn artifact_url(&self) -> Result<String, ResolveError> {
        Ok(self.source.artifact_url(&self.release, self.platform()?))
    }
}
