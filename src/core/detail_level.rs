//! How much metadata accompanies each formatted record

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DetailLevel {
    /// Only the tag and the message
    None,
    /// Timestamp and level code are added
    Basic,
    /// Timestamp, caller location and level code are added
    #[default]
    Detailed,
}

impl DetailLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            DetailLevel::None => "None",
            DetailLevel::Basic => "Basic",
            DetailLevel::Detailed => "Detailed",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for DetailLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(DetailLevel::None),
            "basic" => Ok(DetailLevel::Basic),
            "detailed" => Ok(DetailLevel::Detailed),
            _ => Err(LoggerError::parse("detail level", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_ordering() {
        assert!(DetailLevel::None < DetailLevel::Basic);
        assert!(DetailLevel::Basic < DetailLevel::Detailed);
    }

    #[test]
    fn test_parse_roundtrip() {
        for level in [DetailLevel::None, DetailLevel::Basic, DetailLevel::Detailed] {
            assert_eq!(level.to_string().parse::<DetailLevel>().unwrap(), level);
        }
        assert!("verbose".parse::<DetailLevel>().is_err());
    }

    #[test]
    fn test_default_is_detailed() {
        assert_eq!(DetailLevel::default(), DetailLevel::Detailed);
    }
}
