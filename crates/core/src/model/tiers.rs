use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised when a tier value is outside its fixed set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TierError {
    #[error("invalid effort level: {0}")]
    InvalidEffortLevel(u8),
    #[error("invalid effort letter: {0}")]
    InvalidEffortLetter(String),
    #[error("invalid effort label: {0}")]
    InvalidEffortLabel(String),
    #[error("invalid priority: {0}")]
    InvalidPriority(String),
}

//
// ─── EFFORT ───────────────────────────────────────────────────────────────────
//

/// Coarse task-size estimate.
///
/// Three parallel encodings exist and each is a total bijection:
/// - backend level: `1`, `2`, `3`
/// - quick-add letter: `S`, `M`, `L`
/// - badge label: `30m`, `60m`, `120m`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Effort {
    Small,
    #[default]
    Medium,
    Large,
}

impl Effort {
    pub const ALL: [Effort; 3] = [Effort::Small, Effort::Medium, Effort::Large];

    /// Converts a backend effort level (1-3).
    ///
    /// # Errors
    ///
    /// Returns `TierError::InvalidEffortLevel` for any other value.
    pub fn from_level(level: u8) -> Result<Self, TierError> {
        match level {
            1 => Ok(Self::Small),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Large),
            other => Err(TierError::InvalidEffortLevel(other)),
        }
    }

    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Effort::Small => 1,
            Effort::Medium => 2,
            Effort::Large => 3,
        }
    }

    /// Parses a quick-add letter. Case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `TierError::InvalidEffortLetter` unless the input is one of S/M/L.
    pub fn from_letter(raw: &str) -> Result<Self, TierError> {
        match raw.to_uppercase().as_str() {
            "S" => Ok(Self::Small),
            "M" => Ok(Self::Medium),
            "L" => Ok(Self::Large),
            _ => Err(TierError::InvalidEffortLetter(raw.to_owned())),
        }
    }

    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            Effort::Small => "S",
            Effort::Medium => "M",
            Effort::Large => "L",
        }
    }

    /// Parses a badge label such as `60m`.
    ///
    /// # Errors
    ///
    /// Returns `TierError::InvalidEffortLabel` for unknown labels.
    pub fn from_label(raw: &str) -> Result<Self, TierError> {
        Self::ALL
            .into_iter()
            .find(|effort| effort.label() == raw)
            .ok_or_else(|| TierError::InvalidEffortLabel(raw.to_owned()))
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Effort::Small => "30m",
            Effort::Medium => "60m",
            Effort::Large => "120m",
        }
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        match self {
            Effort::Small => 30,
            Effort::Medium => 60,
            Effort::Large => 120,
        }
    }

    /// Planned hours used by the capacity bar.
    #[must_use]
    pub fn hours(self) -> f64 {
        f64::from(self.minutes()) / 60.0
    }
}

impl TryFrom<u8> for Effort {
    type Error = TierError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_level(value)
    }
}

impl From<Effort> for u8 {
    fn from(value: Effort) -> Self {
        value.level()
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

//
// ─── PRIORITY ─────────────────────────────────────────────────────────────────
//

/// Task priority tier. Wire form is lowercase (`low`, `medium`, `high`),
/// display form is `Low`, `Med`, `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// # Errors
    ///
    /// Returns `TierError::InvalidPriority` for anything but `low`/`medium`/`high`.
    pub fn from_wire(raw: &str) -> Result<Self, TierError> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_wire() == raw)
            .ok_or_else(|| TierError::InvalidPriority(raw.to_owned()))
    }

    #[must_use]
    pub fn short_label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Med",
            Priority::High => "High",
        }
    }

    /// # Errors
    ///
    /// Returns `TierError::InvalidPriority` for anything but `Low`/`Med`/`High`.
    pub fn from_short_label(raw: &str) -> Result<Self, TierError> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.short_label() == raw)
            .ok_or_else(|| TierError::InvalidPriority(raw.to_owned()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effort_level_round_trip_is_lossless() {
        for level in 1..=3u8 {
            let effort = Effort::from_level(level).unwrap();
            assert_eq!(effort.level(), level);
        }
        for effort in Effort::ALL {
            assert_eq!(Effort::from_level(effort.level()).unwrap(), effort);
        }
    }

    #[test]
    fn effort_letter_and_label_round_trip() {
        let expected = [("S", "30m"), ("M", "60m"), ("L", "120m")];
        for (effort, (letter, label)) in Effort::ALL.into_iter().zip(expected) {
            assert_eq!(effort.letter(), letter);
            assert_eq!(effort.label(), label);
            assert_eq!(Effort::from_letter(letter).unwrap(), effort);
            assert_eq!(Effort::from_label(label).unwrap(), effort);
        }
    }

    #[test]
    fn effort_rejects_values_outside_the_set() {
        assert_eq!(Effort::from_level(0), Err(TierError::InvalidEffortLevel(0)));
        assert_eq!(Effort::from_level(4), Err(TierError::InvalidEffortLevel(4)));
        assert!(Effort::from_letter("XL").is_err());
        assert!(Effort::from_label("90m").is_err());
    }

    #[test]
    fn effort_letter_is_case_insensitive() {
        assert_eq!(Effort::from_letter("l").unwrap(), Effort::Large);
    }

    #[test]
    fn effort_serializes_as_level() {
        assert_eq!(serde_json::to_string(&Effort::Large).unwrap(), "3");
        let parsed: Effort = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Effort::Small);
        assert!(serde_json::from_str::<Effort>("7").is_err());
    }

    #[test]
    fn effort_hours_follow_minutes() {
        assert!((Effort::Small.hours() - 0.5).abs() < f64::EPSILON);
        assert!((Effort::Large.hours() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn priority_mapping_is_a_bijection() {
        let expected = [("low", "Low"), ("medium", "Med"), ("high", "High")];
        for (priority, (wire, short)) in Priority::ALL.into_iter().zip(expected) {
            assert_eq!(priority.as_wire(), wire);
            assert_eq!(priority.short_label(), short);
            assert_eq!(Priority::from_wire(wire).unwrap(), priority);
            assert_eq!(Priority::from_short_label(short).unwrap(), priority);
        }
        assert!(Priority::from_wire("urgent").is_err());
        assert!(Priority::from_short_label("Medium").is_err());
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }
}
