//! Severity levels and their notification colours.
//!
//! Levels carry the conventional numeric values used by host logging
//! frameworks (`DEBUG` = 10 through `CRITICAL` = 50). Records may also carry
//! arbitrary numeric levels; those have no name of their own and map to the
//! catch-all colour.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Colour used for `DEBUG` records.
pub const DEBUG_COLOR: &str = "#B6B8D6";
/// Colour used for `INFO` records.
pub const INFO_COLOR: &str = "#BBDBD1";
/// Colour used for `WARNING` records.
pub const WARNING_COLOR: &str = "#D5A021";
/// Colour used for `ERROR` records.
pub const ERROR_COLOR: &str = "#EE6352";
/// Colour used for `CRITICAL` records.
pub const CRITICAL_COLOR: &str = "#D62828";
/// Colour used for any level outside the named set.
pub const FALLBACK_COLOR: &str = "#8F9491";

/// Threshold value that lets every record through.
pub const NOTSET: u32 = 0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotifyLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl NotifyLevel {
    /// Numeric severity of the level.
    pub const fn levelno(self) -> u32 {
        match self {
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
        }
    }

    /// Upper-case name used in records and as the default pretext.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Hex colour for attachments produced at this level.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Debug => DEBUG_COLOR,
            Self::Info => INFO_COLOR,
            Self::Warning => WARNING_COLOR,
            Self::Error => ERROR_COLOR,
            Self::Critical => CRITICAL_COLOR,
        }
    }
}

impl fmt::Display for NotifyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name or number does not denote a known level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLevelError {
    #[error("unknown level name: {0:?}")]
    UnknownName(String),
    #[error("no named level has value {0}")]
    UnknownNumber(u32),
}

impl FromStr for NotifyLevel {
    type Err = ParseLevelError;

    /// Level names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            other => Err(ParseLevelError::UnknownName(other.to_owned())),
        }
    }
}

impl TryFrom<u32> for NotifyLevel {
    type Error = ParseLevelError;

    fn try_from(levelno: u32) -> Result<Self, ParseLevelError> {
        match levelno {
            10 => Ok(Self::Debug),
            20 => Ok(Self::Info),
            30 => Ok(Self::Warning),
            40 => Ok(Self::Error),
            50 => Ok(Self::Critical),
            other => Err(ParseLevelError::UnknownNumber(other)),
        }
    }
}

impl From<NotifyLevel> for u32 {
    fn from(level: NotifyLevel) -> Self {
        level.levelno()
    }
}

/// Name reported for a numeric level, e.g. `"WARNING"` or `"Level 15"`.
pub fn level_name(levelno: u32) -> String {
    match NotifyLevel::try_from(levelno) {
        Ok(level) => level.as_str().to_owned(),
        Err(_) => format!("Level {levelno}"),
    }
}

/// Colour for a numeric level; anything outside the five named levels
/// gets [`FALLBACK_COLOR`].
pub fn color_for_levelno(levelno: u32) -> &'static str {
    NotifyLevel::try_from(levelno).map_or(FALLBACK_COLOR, NotifyLevel::color)
}
