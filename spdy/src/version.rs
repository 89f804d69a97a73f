use std::{fmt::Display, str::FromStr};

use crate::error::VersionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpdyVersion {
    Spdy2,
    Spdy3,
    Spdy31,
}

impl SpdyVersion {
    /// Major protocol version, the number carried in control frame headers.
    pub fn version(&self) -> u16 {
        match self {
            Self::Spdy2 => 2,
            Self::Spdy3 | Self::Spdy31 => 3,
        }
    }

    pub fn minor_version(&self) -> u16 {
        match self {
            Self::Spdy31 => 1,
            _ => 0,
        }
    }
}

impl Display for SpdyVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.minor_version() {
            0 => write!(f, "spdy/{}", self.version()),
            minor => write!(f, "spdy/{}.{}", self.version(), minor),
        }
    }
}

impl TryFrom<u16> for SpdyVersion {
    type Error = VersionError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Spdy2),
            3 => Ok(Self::Spdy3),
            _ => Err(VersionError::Unsupported(value.to_string())),
        }
    }
}

impl FromStr for SpdyVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_prefix("spdy/")
            .or_else(|| trimmed.strip_prefix("SPDY/"))
            .unwrap_or(trimmed);

        match number {
            "2" => Ok(Self::Spdy2),
            "3" => Ok(Self::Spdy3),
            "3.1" => Ok(Self::Spdy31),
            _ => Err(VersionError::Unsupported(s.to_string())),
        }
    }
}

impl TryFrom<String> for SpdyVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
