use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DeviceKind, NumberFormat, ReadingUpdate, ReadingValue, Subkind};

pub const DEGREE_GLYPH: &str = "\u{b0}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSuffix {
    #[default]
    None,
    Degrees,
    Percent,
}

impl UnitSuffix {
    pub fn for_subkind(subkind: Subkind) -> Self {
        match subkind {
            Subkind::Temp | Subkind::Dir => Self::Degrees,
            Subkind::Humid | Subkind::Wetness | Subkind::Percentage => Self::Percent,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Degrees => DEGREE_GLYPH,
            Self::Percent => "%",
        }
    }
}

/// Display representation of a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// On/off text plus the checked state of a bound toggle, if the device
    /// kind has one.
    Switch { on: bool, indicator: Option<bool> },
    /// Level in percent; also the position of a bound slider.
    Dimmer { percent: u32 },
    Numeric { text: String, unit: UnitSuffix },
}

impl Projection {
    pub fn text(&self) -> String {
        match self {
            Projection::Switch { on: true, .. } => "ON".to_string(),
            Projection::Switch { on: false, .. } => "OFF".to_string(),
            Projection::Dimmer { percent } => format!("{}%", percent),
            Projection::Numeric { text, unit } => format!("{}{}", text, unit.as_str()),
        }
    }

    pub fn indicator(&self) -> Option<bool> {
        match self {
            Projection::Switch { indicator, .. } => *indicator,
            _ => None,
        }
    }

    pub fn control_position(&self) -> Option<u32> {
        match self {
            Projection::Dimmer { percent } => Some(*percent),
            _ => None,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

pub fn project_reading(reading: &ReadingUpdate, format: &NumberFormat) -> Projection {
    let binary = reading.subkind.is_binary();
    match reading.kind {
        DeviceKind::Switch | DeviceKind::Sensor if binary => {
            let on = reading.value.is_on();
            Projection::Switch {
                on,
                indicator: (reading.kind == DeviceKind::Switch).then_some(on),
            }
        }
        DeviceKind::Dimmer if binary => Projection::Dimmer {
            percent: dimmer_percent(&reading.value),
        },
        _ => {
            let raw = match &reading.value {
                ReadingValue::Decimal(raw) | ReadingValue::Binary { raw, .. } => raw,
            };
            Projection::Numeric {
                text: format.format(raw),
                unit: UnitSuffix::for_subkind(reading.subkind),
            }
        }
    }
}

fn dimmer_percent(value: &ReadingValue) -> u32 {
    let level = match value {
        ReadingValue::Binary { level, .. } => *level,
        ReadingValue::Decimal(raw) => raw.trim().parse::<f64>().unwrap_or(0.0),
    };
    let percent = (level * 100.0).trunc();
    if percent.is_nan() || percent <= 0.0 {
        0
    } else {
        percent.min(u32::MAX as f64) as u32
    }
}
