//! Semantic version parsing and comparison

use std::fmt;
use std::str::FromStr;

/// A major.minor.patch version
///
/// Missing components parse as zero, so "1.2" == "1.2.0". A leading `v`
/// (the usual release-tag prefix) is accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('v');
        if trimmed.is_empty() {
            return Err(format!("Empty version string: '{}'", s));
        }

        let mut parts = trimmed.split('.');
        let mut component = |name: &str| -> Result<u32, String> {
            match parts.next() {
                None => Ok(0),
                Some(p) => p
                    .parse()
                    .map_err(|_| format!("Invalid {} component in version '{}'", name, s)),
            }
        };

        let major = component("major")?;
        let minor = component("minor")?;
        let patch = component("patch")?;

        if parts.next().is_some() {
            return Err(format!("Too many components in version '{}'", s));
        }

        Ok(Self { major, minor, patch })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Whether `latest` is strictly newer than `current`
pub fn is_newer(latest: &Version, current: &Version) -> bool {
    latest > current
}
