//! Validated combat attributes.
//!
//! Each stat is a newtype that can only hold an in-range value, so an `Npc`
//! can never carry health 0 or armor 150 no matter how it was built or
//! loaded from storage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

macro_rules! bounded_stat {
    ($(#[$meta:meta])* $name:ident, $label:literal, $min:expr, $max:expr, $default:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(u8);

        impl $name {
            pub const MIN: u8 = $min;
            pub const MAX: u8 = $max;

            /// # Errors
            ///
            /// Returns `DomainError::Validation` when `value` is outside the
            /// allowed range.
            pub fn new(value: i64) -> Result<Self, DomainError> {
                if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
                    return Err(DomainError::validation(format!(
                        "{} must be between {} and {} (got {})",
                        $label,
                        Self::MIN,
                        Self::MAX,
                        value
                    )));
                }
                Ok(Self(value as u8))
            }

            pub fn value(&self) -> u8 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = DomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(stat: $name) -> i64 {
                i64::from(stat.0)
            }
        }
    };
}

bounded_stat!(
    /// Hit points, 1..=200.
    Health, "Health", 1, 200, 100
);
bounded_stat!(
    /// Armor points, 0..=100.
    Armor, "Armor", 0, 100, 0
);
bounded_stat!(
    /// Aim accuracy percentage, 0..=100.
    Accuracy, "Accuracy", 0, 100, 50
);

/// The three combat stats an NPC carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    pub health: Health,
    pub armor: Armor,
    pub accuracy: Accuracy,
}

impl CombatStats {
    /// Validate raw stat values, defaulting any that are absent.
    pub fn from_raw(
        health: Option<i64>,
        armor: Option<i64>,
        accuracy: Option<i64>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            health: health.map(Health::new).transpose()?.unwrap_or_default(),
            armor: armor.map(Armor::new).transpose()?.unwrap_or_default(),
            accuracy: accuracy.map(Accuracy::new).transpose()?.unwrap_or_default(),
        })
    }
}
