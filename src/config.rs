use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{AlarmChannels, HISTORY_CAPACITY, LARGE_VALUE_THRESHOLD};

/// Default number of characters of alarm text shown in a panel row.
pub const ALARM_TEXT_WIDTH: usize = 48;

/// A fixed-size alarm widget: which alarms it shows and how many rows it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AlarmPanel {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_min_severity")]
    pub min_severity: i32,
    #[serde(default = "default_max_severity")]
    pub max_severity: i32,
    #[serde(default = "default_channel_mask")]
    pub channel_mask: AlarmChannels,
    pub slot_count: usize,
    #[serde(default = "default_text_width")]
    pub text_width: usize,
}

fn default_min_severity() -> i32 {
    1
}

fn default_max_severity() -> i32 {
    i32::MAX
}

fn default_channel_mask() -> AlarmChannels {
    AlarmChannels::ALL
}

fn default_text_width() -> usize {
    ALARM_TEXT_WIDTH
}

impl AlarmPanel {
    pub fn new(name: impl Into<String>, slot_count: usize) -> Self {
        Self {
            name: name.into(),
            min_severity: default_min_severity(),
            max_severity: default_max_severity(),
            channel_mask: default_channel_mask(),
            slot_count,
            text_width: default_text_width(),
        }
    }

    pub fn severity(mut self, min: i32, max: i32) -> Self {
        self.min_severity = min;
        self.max_severity = max;
        self
    }

    pub fn channel_mask(mut self, mask: AlarmChannels) -> Self {
        self.channel_mask = mask;
        self
    }

    pub fn text_width(mut self, width: usize) -> Self {
        self.text_width = width;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TelemetryConfig {
    pub history_capacity: usize,
    pub large_value_threshold: f64,
    pub alarm_panels: Vec<AlarmPanel>,
    pub channel_size: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryConfig {
    pub fn new() -> Self {
        Self {
            history_capacity: HISTORY_CAPACITY,
            large_value_threshold: LARGE_VALUE_THRESHOLD,
            alarm_panels: Vec::new(),
            channel_size: 64,
        }
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn large_value_threshold(mut self, threshold: f64) -> Self {
        self.large_value_threshold = threshold;
        self
    }

    pub fn alarm_panel(mut self, panel: AlarmPanel) -> Self {
        self.alarm_panels.push(panel);
        self
    }

    pub fn channel_size(mut self, channel_size: usize) -> Self {
        if channel_size == 0 {
            log::warn!("Channel size 0 is not allowed, keeping {}", self.channel_size);
            return self;
        }
        self.channel_size = channel_size;
        self
    }

    pub fn panel(&self, name: &str) -> Option<&AlarmPanel> {
        self.alarm_panels.iter().find(|p| p.name == name)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(TelemetryConfig)
    }
}
