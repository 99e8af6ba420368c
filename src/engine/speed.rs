//! Playback interval between scheduled generations

use super::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Milliseconds per generation, always within `[Speed::MIN_MS, Speed::MAX_MS]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Speed(u64);

impl Speed {
    pub const MIN_MS: u64 = 10;
    pub const MAX_MS: u64 = 3000;
    pub const DEFAULT: Speed = Speed(100);

    /// Where `slower()` lands after passing the maximum
    const SLOWER_WRAP_MS: u64 = 1100;

    pub fn new(millis: u64) -> Result<Self, EngineError> {
        if (Self::MIN_MS..=Self::MAX_MS).contains(&millis) {
            Ok(Speed(millis))
        } else {
            Err(EngineError::InvalidArgument(format!(
                "speed {}ms is outside [{}, {}]ms",
                millis,
                Self::MIN_MS,
                Self::MAX_MS
            )))
        }
    }

    /// Nearest valid speed to `millis`
    pub fn clamped(millis: u64) -> Self {
        Speed(millis.clamp(Self::MIN_MS, Self::MAX_MS))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn interval(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Lengthen the interval by 100ms; at the maximum, fall back to 1100ms.
    pub fn slower(self) -> Self {
        if self.0 < Self::MAX_MS {
            Speed((self.0 + 100).min(Self::MAX_MS))
        } else {
            Speed(Self::SLOWER_WRAP_MS)
        }
    }

    /// Shorten the interval: by 200ms above 200ms, by 50ms within
    /// `[50, 100]`, otherwise straight to the 10ms floor.
    pub fn faster(self) -> Self {
        if self.0 > 200 {
            Speed(self.0 - 200)
        } else if (50..=100).contains(&self.0) {
            Speed((self.0 - 50).max(Self::MIN_MS))
        } else {
            Speed(Self::MIN_MS)
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for Speed {
    type Error = EngineError;

    fn try_from(millis: u64) -> Result<Self, Self::Error> {
        Speed::new(millis)
    }
}

impl From<Speed> for u64 {
    fn from(speed: Speed) -> u64 {
        speed.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms/gen", self.0)
    }
}
