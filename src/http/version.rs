//! Broker API version carried in `X-Broker-API-Version`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const X_BROKER_API_VERSION: &str = "x-broker-api-version";

/// The only major version this layer speaks.
pub const SUPPORTED_MAJOR: u32 = 2;

/// `<major>.<minor>` as sent by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    /// First version with get-instance, get-binding, binding last operation
    /// and asynchronous bindings.
    pub const V2_14: ApiVersion = ApiVersion::new(2, 14);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn at_least(&self, required: ApiVersion) -> bool {
        *self >= required
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiVersionError {
    #[error("X-Broker-API-Version Header not set")]
    Missing,

    #[error("X-Broker-API-Version Header must contain a version")]
    Malformed,

    #[error("X-Broker-API-Version Header must be 2.x")]
    UnsupportedMajor,
}

impl FromStr for ApiVersion {
    type Err = ApiVersionError;

    /// Parses the leading `<major>.<minor>`; anything after the minor number
    /// (a patch component, for instance) is ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ApiVersionError::Missing);
        }

        let mut parts = raw.splitn(3, '.');
        let major = parts.next().and_then(|p| p.parse::<u32>().ok());
        let minor = parts.next().and_then(|p| p.parse::<u32>().ok());

        match (major, minor) {
            (Some(major), Some(minor)) => Ok(ApiVersion::new(major, minor)),
            _ => Err(ApiVersionError::Malformed),
        }
    }
}

/// Parse and check the header value. `None` means the header was absent.
pub fn negotiate(header: Option<&str>) -> Result<ApiVersion, ApiVersionError> {
    let version: ApiVersion = header.ok_or(ApiVersionError::Missing)?.parse()?;
    if version.major != SUPPORTED_MAJOR {
        return Err(ApiVersionError::UnsupportedMajor);
    }
    Ok(version)
}
