use std::ops::Deref;

use chrono::Utc;
use serde::Serialize;

use crate::{AlarmChannels, AlarmEntry, AlarmPanel, AlarmUpdate};

pub enum AlarmChange {
    New(AlarmEntry),
    Changed { old: AlarmEntry, new: AlarmEntry },
    Cleared(AlarmEntry),
    Equal,
    /// A cleared update for an alarm that was never active.
    NoChange,
}

/// One row of a fixed-size alarm panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AlarmSlot {
    Active {
        alarm_id: String,
        severity: i32,
        channel: AlarmChannels,
        text: String,
    },
    Empty,
}

impl AlarmSlot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Active { text, .. } => text,
            Self::Empty => "",
        }
    }
}

/// Active alarms, kept ascending by severity. Ties keep arrival order.
#[derive(Default, Clone, Debug)]
pub struct AlarmStore(Vec<AlarmEntry>);

impl Deref for AlarmStore {
    type Target = [AlarmEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AlarmStore {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn upsert(&mut self, update: AlarmUpdate) -> AlarmChange {
        let now = Utc::now();
        let position = self.0.iter().position(|e| e.alarm_id == update.alarm_id);
        let change = match position {
            Some(idx) if update.is_cleared() => AlarmChange::Cleared(self.0.remove(idx)),
            Some(idx) => {
                let entry = &mut self.0[idx];
                if entry.severity == update.severity
                    && entry.channel == update.channel
                    && entry.text == update.text
                {
                    return AlarmChange::Equal;
                }
                let old = entry.clone();
                entry.text = update.text;
                entry.severity = update.severity;
                entry.channel = update.channel;
                entry.updated_at = now;
                AlarmChange::Changed {
                    old,
                    new: entry.clone(),
                }
            }
            None if update.is_cleared() => {
                log::debug!("Ignoring clear for unknown alarm [{}]", update.alarm_id);
                return AlarmChange::NoChange;
            }
            None => {
                let entry = AlarmEntry {
                    alarm_id: update.alarm_id,
                    severity: update.severity,
                    channel: update.channel,
                    text: update.text,
                    raised_at: now,
                    updated_at: now,
                };
                self.0.push(entry.clone());
                AlarmChange::New(entry)
            }
        };
        self.0.sort_by_key(|e| e.severity);
        change
    }

    pub fn get(&self, alarm_id: &str) -> Option<&AlarmEntry> {
        self.0.iter().find(|e| e.alarm_id == alarm_id)
    }

    pub fn contains(&self, alarm_id: &str) -> bool {
        self.get(alarm_id).is_some()
    }

    /// Fill a panel: matching alarms in severity order, then empty slots so
    /// stale rows get blanked.
    pub fn project(&self, panel: &AlarmPanel) -> Vec<AlarmSlot> {
        let mut slots: Vec<AlarmSlot> = self
            .0
            .iter()
            .filter(|e| e.severity >= panel.min_severity && e.severity <= panel.max_severity)
            .filter(|e| e.channel.intersects(panel.channel_mask))
            .take(panel.slot_count)
            .map(|e| AlarmSlot::Active {
                alarm_id: e.alarm_id.clone(),
                severity: e.severity,
                channel: e.channel,
                text: truncate_chars(&e.text, panel.text_width),
            })
            .collect();
        slots.resize(panel.slot_count, AlarmSlot::Empty);
        slots
    }

    pub fn clear(&mut self) {
        log::debug!("Clearing {} alarms", self.0.len());
        self.0.clear();
    }

    pub fn as_slice(&self) -> &[AlarmEntry] {
        &self.0
    }
}

fn truncate_chars(text: &str, width: usize) -> String {
    match text.char_indices().nth(width) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
