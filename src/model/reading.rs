use serde::{Deserialize, Serialize};

/// Device category as reported by the collector (`type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceKind {
    #[default]
    None,
    Switch,
    Dimmer,
    Sensor,
    Timer,
    Blind,
}

impl DeviceKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::None,
            1 => Self::Switch,
            2 => Self::Dimmer,
            3 => Self::Sensor,
            4 => Self::Timer,
            5 => Self::Blind,
            other => {
                log::debug!("Unknown device type code {}, treating as none", other);
                Self::None
            }
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// Physical or logical quantity a device reports (`subt` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Subkind {
    #[default]
    None,
    Switch,
    Outlet,
    Temp,
    Humid,
    Counter,
    Pressure,
    Speed,
    Dir,
    Ph,
    Wetness,
    Hub,
    Lux,
    Voltage,
    WattSec,
    Watt,
    Amps,
    RainRate,
    Weather,
    AlarmStatus,
    Number,
    Percentage,
    FlowRate,
    Distance,
    Volume,
    Timer,
    ThMode,
    ThState,
    SmNumber,
    Blind,
    Collector,
    Trigger,
    Orp,
    Salinity,
    Bool,
}

const SUBKINDS: [Subkind; 35] = [
    Subkind::None,
    Subkind::Switch,
    Subkind::Outlet,
    Subkind::Temp,
    Subkind::Humid,
    Subkind::Counter,
    Subkind::Pressure,
    Subkind::Speed,
    Subkind::Dir,
    Subkind::Ph,
    Subkind::Wetness,
    Subkind::Hub,
    Subkind::Lux,
    Subkind::Voltage,
    Subkind::WattSec,
    Subkind::Watt,
    Subkind::Amps,
    Subkind::RainRate,
    Subkind::Weather,
    Subkind::AlarmStatus,
    Subkind::Number,
    Subkind::Percentage,
    Subkind::FlowRate,
    Subkind::Distance,
    Subkind::Volume,
    Subkind::Timer,
    Subkind::ThMode,
    Subkind::ThState,
    Subkind::SmNumber,
    Subkind::Blind,
    Subkind::Collector,
    Subkind::Trigger,
    Subkind::Orp,
    Subkind::Salinity,
    Subkind::Bool,
];

impl Subkind {
    pub fn from_code(code: i64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|idx| SUBKINDS.get(idx).copied())
            .unwrap_or_else(|| {
                log::debug!("Unknown subtype code {}, treating as none", code);
                Self::None
            })
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }

    /// Subkinds whose value is an on/off flag (or a dimmer level).
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Switch | Self::Outlet | Self::Bool)
    }
}

/// Reading value, resolved once from the subkind when the record is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReadingValue {
    /// Flag or level for binary subkinds. Switches use `!= 0`, dimmers read it
    /// as a fraction in `[0, 1]`. The wire text is kept for generic display.
    Binary { level: f64, raw: String },
    /// Raw decimal text, kept verbatim for formatting.
    Decimal(String),
}

impl ReadingValue {
    pub fn resolve(subkind: Subkind, raw: String) -> Self {
        if subkind.is_binary() {
            Self::Binary {
                level: parse_flag(&raw),
                raw,
            }
        } else {
            Self::Decimal(raw)
        }
    }

    pub fn is_on(&self) -> bool {
        match self {
            Self::Binary { level, .. } => *level != 0.0,
            Self::Decimal(raw) => parse_flag(raw) != 0.0,
        }
    }

    /// Numeric sample for trend history, if the value has one.
    pub fn as_sample(&self) -> Option<f64> {
        match self {
            Self::Binary { level, .. } => Some(*level),
            Self::Decimal(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}

// "" is what the collector sends for a device without data.
fn parse_flag(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => 1.0,
        Ok(v) => v,
        Err(_) => 1.0,
    }
}

/// One telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingUpdate {
    pub device_id: String,
    pub kind: DeviceKind,
    pub subkind: Subkind,
    pub value: ReadingValue,
}

impl ReadingUpdate {
    pub fn new(
        device_id: impl Into<String>,
        kind: DeviceKind,
        subkind: Subkind,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            kind,
            subkind,
            value: ReadingValue::resolve(subkind, raw_value.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subkind_codes_follow_collector_table() {
        assert_eq!(Subkind::from_code(3), Subkind::Temp);
        assert_eq!(Subkind::from_code(8), Subkind::Dir);
        assert_eq!(Subkind::from_code(9), Subkind::Ph);
        assert_eq!(Subkind::from_code(31), Subkind::Trigger);
        assert_eq!(Subkind::from_code(32), Subkind::Orp);
        assert_eq!(Subkind::from_code(33), Subkind::Salinity);
        assert_eq!(Subkind::from_code(34), Subkind::Bool);
        assert_eq!(Subkind::from_code(35), Subkind::None);
        assert!(!Subkind::Trigger.is_binary());
        assert!(Subkind::Bool.is_binary());
        assert_eq!(Subkind::from_code(-1), Subkind::None);
        assert_eq!(Subkind::Wetness.code(), 10);
    }

    #[test]
    fn binary_values_resolve_at_decode() {
        let r = ReadingUpdate::new("d1", DeviceKind::Switch, Subkind::Switch, "1");
        assert_eq!(
            r.value,
            ReadingValue::Binary {
                level: 1.0,
                raw: "1".to_string()
            }
        );
        assert!(r.value.is_on());

        let empty = ReadingValue::resolve(Subkind::Switch, String::new());
        assert!(!empty.is_on());

        let text = ReadingValue::resolve(Subkind::Outlet, "on".to_string());
        assert!(text.is_on());
    }

    #[test]
    fn decimal_values_keep_raw_text() {
        let r = ReadingUpdate::new("t1", DeviceKind::Sensor, Subkind::Temp, "21.456");
        assert_eq!(r.value, ReadingValue::Decimal("21.456".to_string()));
        assert_eq!(r.value.as_sample(), Some(21.456));
        assert_eq!(ReadingValue::Decimal("N/A".into()).as_sample(), None);
    }
}
