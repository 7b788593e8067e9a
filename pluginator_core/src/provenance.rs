//! Build information stamped into every generated file.

use std::fmt;

const UNKNOWN: &str = "unknown";

/// Version and build details of the running pluginator.
///
/// The commit and build date are taken from `PLUGINATOR_GIT_COMMIT` and
/// `PLUGINATOR_BUILD_DATE` at compile time when the release build sets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub version: String,
    pub git_commit: String,
    pub build_date: String,
    pub os: String,
    pub arch: String,
}

impl Provenance {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_commit: option_env!("PLUGINATOR_GIT_COMMIT")
                .unwrap_or(UNKNOWN)
                .to_string(),
            build_date: option_env!("PLUGINATOR_BUILD_DATE")
                .unwrap_or(UNKNOWN)
                .to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// The identifier written into the generated-code header.
    pub fn short(&self) -> String {
        format!("{{{} {}}}", self.version, self.build_date)
    }
}

impl Default for Provenance {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Version:{} GitCommit:{} BuildDate:{} GoOs:{} GoArch:{}}}",
            self.version, self.git_commit, self.build_date, self.os, self.arch
        )
    }
}
