use crate::error::ResolveError;
use std::fmt;

/// Release installed when no `--release` is given. Rewritten by `bump-installer`.
pub const VERSION: &str = "v0.4.2";

/// Start of the line `bump-installer` rewrites.
pub const VERSION_LINE_PREFIX: &str = "pub const VERSION: &str =";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Every platform a release ships an artifact for.
    pub const ALL: [Platform; 3] = [Platform::Linux, Platform::MacOs, Platform::Windows];

    /// Parse a host OS identifier, as found in `std::env::consts::OS`.
    /// `darwin` is accepted as an alias for macOS.
    pub fn from_os(os: &str) -> Result<Self, ResolveError> {
        match os {
            "windows" => Ok(Platform::Windows),
            "macos" | "darwin" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            other => Err(ResolveError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Name of the release asset built for this platform
    pub fn artifact_name(&self) -> &'static str {
        match self {
            Platform::Windows => "dmenv-windows.exe",
            Platform::MacOs => "dmenv-osx",
            Platform::Linux => "dmenv-linux",
        }
    }

    /// File name the installed executable gets on this platform
    pub fn executable_name(&self, tool_name: &str) -> String {
        match self {
            Platform::Windows => format!("{tool_name}.exe"),
            Platform::MacOs | Platform::Linux => tool_name.to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        };
        write!(f, "{name}")
    }
}

/// Where release artifacts are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    pub org: String,
    pub project: String,
}

impl Default for ReleaseSource {
    fn default() -> Self {
        Self {
            base_url: "https://github.com".to_string(),
            org: "dmerejkowsky".to_string(),
            project: "dmenv".to_string(),
        }
    }
}

impl ReleaseSource {
    pub fn artifact_url(&self, version: &str, platform: Platform) -> String {
        format!(
            "{}/{}/{}/releases/download/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.org,
            self.project,
            version,
            platform.artifact_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_os() {
        assert_eq!(Platform::from_os("windows").unwrap(), Platform::Windows);
        assert_eq!(Platform::from_os("macos").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_os("darwin").unwrap(), Platform::MacOs);
        assert_eq!(Platform::from_os("linux").unwrap(), Platform::Linux);
        assert!(matches!(
            Platform::from_os("freebsd"),
            Err(ResolveError::UnsupportedPlatform(os)) if os == "freebsd"
        ));
    }

    #[test]
    fn test_executable_name() {
        assert_eq!(Platform::Windows.executable_name("dmenv"), "dmenv.exe");
        assert_eq!(Platform::Linux.executable_name("dmenv"), "dmenv");
        assert_eq!(Platform::MacOs.executable_name("dmenv"), "dmenv");
    }

    #[test]
    fn test_artifact_url() {
        let source = ReleaseSource::default();
        assert_eq!(
            source.artifact_url("v0.4.2", Platform::Linux),
            "https://github.com/dmerejkowsky/dmenv/releases/download/v0.4.2/dmenv-linux"
        );
        assert_eq!(
            source.artifact_url("v0.4.2", Platform::Windows),
            "https://github.com/dmerejkowsky/dmenv/releases/download/v0.4.2/dmenv-windows.exe"
        );

        let local = ReleaseSource {
            base_url: "http://127.0.0.1:1234/".to_string(),
            ..ReleaseSource::default()
        };
        assert_eq!(
            local.artifact_url("v1.0.0", Platform::MacOs),
            "http://127.0.0.1:1234/dmerejkowsky/dmenv/releases/download/v1.0.0/dmenv-osx"
        );
    }

    #[test]
    fn test_version_constant_matches_prefix() {
        let line = format!("{VERSION_LINE_PREFIX} \"{VERSION}\";");
        assert!(line.starts_with("pub const VERSION"));
        assert!(VERSION.starts_with('v'));
    }
}
