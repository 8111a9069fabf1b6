//! Named log levels.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A named log level used to select the diagnostic-channel emission method.
///
/// Severities form a closed set: a resolved level always maps to a print
/// operation the channel supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Plain log output (the default level).
    Log,
    /// Informational output.
    Info,
    /// Warning output.
    Warn,
    /// Error output.
    Error,
}

impl Severity {
    /// Returns the lowercase name of this severity.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(Self::Log),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(Error::unknown_severity(other)),
        }
    }
}
