//! Domain value objects: UbuntuVersion, LibcVersion and the fixed
//! container constants.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. This file's
//! only job is to define the types, their string representations, and their
//! `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Port xinetd listens on inside the container.
pub const INTERNAL_PORT: u16 = 9999;

/// Host port mapped onto [`INTERNAL_PORT`] by docker-compose.
pub const EXTERNAL_PORT: u16 = 23333;

/// uid:gid the task runs as inside the chroot.
pub const CHROOT_UID: u32 = 1000;

/// Maximum concurrent instances per source IP.
pub const PER_SOURCE_LIMIT: u32 = 10;

/// CPU seconds each spawned instance may use.
pub const RLIMIT_CPU_SECS: u32 = 20;

// ── UbuntuVersion ────────────────────────────────────────────────────────────

/// Base image version. Only the four LTS-era images the generated
/// Dockerfile is known to work on are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum UbuntuVersion {
    V16,
    V18,
    V20,
    V21,
}

impl UbuntuVersion {
    pub const ALL: [Self; 4] = [Self::V16, Self::V18, Self::V20, Self::V21];

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::V16 => 16,
            Self::V18 => 18,
            Self::V20 => 20,
            Self::V21 => 21,
        }
    }

    /// Docker image reference, e.g. `ubuntu:20.04`.
    pub fn image(self) -> String {
        format!("ubuntu:{}.04", self.as_u8())
    }
}

impl fmt::Display for UbuntuVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl TryFrom<u8> for UbuntuVersion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_u8() == value)
            .ok_or_else(|| format!("unsupported ubuntu version {value}, expected 16, 18, 20 or 21"))
    }
}

impl From<UbuntuVersion> for u8 {
    fn from(value: UbuntuVersion) -> Self {
        value.as_u8()
    }
}

impl FromStr for UbuntuVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a version number"))?;
        Self::try_from(n)
    }
}

// ── LibcVersion ──────────────────────────────────────────────────────────────

/// Version string selecting `libc-<v>.so` / `ld-<v>.so` from the toolkit.
///
/// Invariant: non-empty, no path separators, no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LibcVersion(String);

impl LibcVersion {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let reason = if raw.is_empty() {
            Some("version cannot be empty")
        } else if raw.contains('/') || raw.contains('\\') {
            Some("version cannot contain path separators")
        } else if raw == "." || raw == ".." {
            Some("version cannot be a relative path component")
        } else if raw.chars().any(char::is_whitespace) {
            Some("version cannot contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidLibcVersion {
                version: raw,
                reason: reason.into(),
            }),
            None => Ok(Self(raw)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `libc-<v>.so`
    pub fn libc_file(&self) -> String {
        format!("libc-{}.so", self.0)
    }

    /// `ld-<v>.so`
    pub fn ld_file(&self) -> String {
        format!("ld-{}.so", self.0)
    }
}

impl fmt::Display for LibcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
