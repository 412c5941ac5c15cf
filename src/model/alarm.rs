use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Bitmask of alarm panels an alarm may appear in.
///
/// Bit meanings are site configuration; the constants below mirror the
/// collector's default channel table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct AlarmChannels(pub u32);

impl AlarmChannels {
    pub const NONE: Self = Self(0);
    pub const GENERIC: Self = Self::bit(0);
    pub const POWER: Self = Self::bit(1);
    pub const LIGHTS: Self = Self::bit(2);
    pub const SECURE: Self = Self::bit(3);
    pub const WEATHER: Self = Self::bit(4);
    pub const AC: Self = Self::bit(5);
    pub const YARD: Self = Self::bit(6);
    pub const GNHAST: Self = Self::bit(7);
    pub const SYSTEM: Self = Self::bit(8);
    pub const EMERG: Self = Self::bit(9);
    pub const MESSAGING: Self = Self::bit(10);
    pub const USER1: Self = Self::bit(24);
    pub const USER2: Self = Self::bit(25);
    pub const USER3: Self = Self::bit(26);
    pub const USER4: Self = Self::bit(27);
    pub const USER5: Self = Self::bit(28);
    pub const USER6: Self = Self::bit(29);
    pub const USER7: Self = Self::bit(30);
    pub const USER8: Self = Self::bit(31);
    pub const ALL: Self = Self(u32::MAX);

    /// Single-channel mask. Bits past 31 do not exist and give `NONE`.
    pub const fn bit(n: u32) -> Self {
        match 1u32.checked_shl(n) {
            Some(v) => Self(v),
            None => Self::NONE,
        }
    }

    pub fn intersects(&self, other: AlarmChannels) -> bool {
        self.0 & other.0 != 0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl BitOr for AlarmChannels {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// One alarm state change as pushed by the server. Severity 0 clears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmUpdate {
    pub alarm_id: String,
    pub severity: i32,
    pub channel: AlarmChannels,
    pub text: String,
}

impl AlarmUpdate {
    pub fn new(
        alarm_id: impl Into<String>,
        severity: i32,
        channel: AlarmChannels,
        text: impl Into<String>,
    ) -> Self {
        Self {
            alarm_id: alarm_id.into(),
            severity,
            channel,
            text: text.into(),
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.severity == 0
    }
}

/// A live alarm held by the [`AlarmStore`](crate::AlarmStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEntry {
    pub alarm_id: String,
    pub severity: i32,
    pub channel: AlarmChannels,
    pub text: String,
    pub raised_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
