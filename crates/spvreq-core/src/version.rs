//! Packed target versions (`0|major|minor|revision`).

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version(pub u32);

impl Version {
    /// Version not pinned; satisfies every threshold.
    pub const UNSPECIFIED: Version = Version(0);

    pub const fn new(major: u8, minor: u8) -> Self {
        Version(((major as u32) << 16) | ((minor as u32) << 8))
    }

    pub const fn major(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn minor(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn is_unspecified(self) -> bool {
        self.0 == 0
    }

    /// `self >= threshold`, where an unspecified `self` always passes.
    pub const fn at_least(self, threshold: Version) -> bool {
        self.0 == 0 || self.0 >= threshold.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unspecified() {
            f.write_str("unspecified")
        } else {
            write!(f, "{}.{}", self.major(), self.minor())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version '{0}' (expected <major>.<minor>)")]
pub struct ParseVersionError(pub String);

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseVersionError(s.to_string());
        let (major, minor) = s.split_once('.').ok_or_else(bad)?;
        let major: u8 = major.parse().map_err(|_| bad())?;
        let minor: u8 = minor.parse().map_err(|_| bad())?;
        if major == 0 && minor == 0 {
            return Err(bad());
        }
        Ok(Version::new(major, minor))
    }
}
