use serde::{Deserialize, Serialize};

use crate::{AlarmEntry, AlarmUpdate, Projection, ReadingUpdate};

/// A decoded push record, routed by the presence of an alarm id.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateRecord {
    Reading(ReadingUpdate),
    Alarm(AlarmUpdate),
}

pub enum ValueUpdate<T> {
    Equal,
    Changed { old: Option<T>, new: T },
}

impl<T> ValueUpdate<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// What applying a single record changed, handed to the render sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewChange {
    Reading {
        device_id: String,
        projection: Projection,
        changed: bool,
    },
    AlarmRaised(AlarmEntry),
    AlarmChanged {
        from: AlarmEntry,
        to: AlarmEntry,
    },
    AlarmCleared {
        alarm_id: String,
    },
}

impl ViewChange {
    pub fn is_alarm(&self) -> bool {
        !matches!(self, Self::Reading { .. })
    }
}
