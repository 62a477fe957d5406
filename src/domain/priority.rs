//! Notification priority
//!
//! Pushover-style priority levels, -2 (silent) through +2 (emergency).

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notification priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Priority {
    /// No notification is generated on the device
    Lowest,
    /// Quiet notification, no sound or vibration
    Low,
    /// Default device behavior
    Normal,
    /// Bypasses quiet hours
    High,
    /// Repeats until acknowledged
    Emergency,
}

impl Priority {
    /// Priority used for threshold breach alerts
    pub const BREACH: Self = Self::Emergency;
    /// Priority used for rate-limit pause notices
    pub const PAUSE: Self = Self::Low;

    /// Get the wire value (-2..=2)
    pub const fn as_i8(&self) -> i8 {
        match self {
            Self::Lowest => -2,
            Self::Low => -1,
            Self::Normal => 0,
            Self::High => 1,
            Self::Emergency => 2,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::BREACH
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lowest => write!(f, "lowest"),
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
            Self::Emergency => write!(f, "emergency"),
        }
    }
}

impl TryFrom<i8> for Priority {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(Self::Lowest),
            -1 => Ok(Self::Low),
            0 => Ok(Self::Normal),
            1 => Ok(Self::High),
            2 => Ok(Self::Emergency),
            other => Err(DomainError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for i8 {
    fn from(priority: Priority) -> Self {
        priority.as_i8()
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    /// Accepts either a level name or its numeric value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowest" => Ok(Self::Lowest),
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "emergency" | "critical" => Ok(Self::Emergency),
            other => other
                .parse::<i8>()
                .map_err(|_| DomainError::UnknownPriority(s.to_string()))
                .and_then(Self::try_from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(Priority::Lowest.as_i8(), -2);
        assert_eq!(Priority::PAUSE.as_i8(), -1);
        assert_eq!(Priority::BREACH.as_i8(), 2);
    }

    #[test]
    fn test_try_from_out_of_range() {
        assert!(matches!(
            Priority::try_from(3),
            Err(DomainError::InvalidPriority(3))
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("-1".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("Critical".parse::<Priority>().unwrap(), Priority::Emergency);
        assert!("loud".parse::<Priority>().is_err());
        assert!("5".parse::<Priority>().is_err());
    }

    #[test]
    fn test_default_is_breach_priority() {
        assert_eq!(Priority::default(), Priority::Emergency);
    }
}
