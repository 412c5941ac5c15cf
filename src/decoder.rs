use serde::Deserialize;
use thiserror::Error;

use crate::{AlarmChannels, AlarmUpdate, DeviceKind, ReadingUpdate, Subkind, UpdateRecord};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed push payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record {index} carries neither a device id nor an alarm id")]
    MissingIdentity { index: usize },
    #[error("Alarm record {index} [{alarm_id}] has no severity")]
    MissingSeverity { index: usize, alarm_id: String },
    #[error("Record {index}: field `{field}` is not a valid integer: {value}")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: String,
    },
}

/// The collector quotes every field, but plain JSON numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Flag(b) => String::from(if b { "1" } else { "0" }),
        }
    }

    fn to_integer(&self, index: usize, field: &'static str) -> Result<i64, DecodeError> {
        let invalid = |value: String| DecodeError::InvalidNumber {
            index,
            field,
            value,
        };
        match self {
            Scalar::Integer(i) => Ok(*i),
            Scalar::Text(s) => s.trim().parse::<i64>().map_err(|_| invalid(s.clone())),
            Scalar::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(*f as i64),
            Scalar::Float(f) => Err(invalid(f.to_string())),
            Scalar::Flag(b) => Err(invalid(b.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    uid: Option<Scalar>,
    #[serde(rename = "type")]
    kind: Option<Scalar>,
    subt: Option<Scalar>,
    value: Option<Scalar>,
    aluid: Option<Scalar>,
    altext: Option<Scalar>,
    alsev: Option<Scalar>,
    alchan: Option<Scalar>,
}

impl RawRecord {
    fn into_update(self, index: usize) -> Result<UpdateRecord, DecodeError> {
        if let Some(aluid) = self.aluid {
            let alarm_id = aluid.into_text();
            let severity = match &self.alsev {
                Some(sev) => sev.to_integer(index, "alsev")?,
                None => return Err(DecodeError::MissingSeverity { index, alarm_id }),
            };
            let severity = i32::try_from(severity).map_err(|_| DecodeError::InvalidNumber {
                index,
                field: "alsev",
                value: severity.to_string(),
            })?;
            let channel = match &self.alchan {
                Some(chan) => {
                    let bits = chan.to_integer(index, "alchan")?;
                    u32::try_from(bits).map_err(|_| DecodeError::InvalidNumber {
                        index,
                        field: "alchan",
                        value: bits.to_string(),
                    })?
                }
                None => 0,
            };
            let text = self.altext.map(Scalar::into_text).unwrap_or_default();
            return Ok(UpdateRecord::Alarm(AlarmUpdate::new(
                alarm_id,
                severity,
                AlarmChannels(channel),
                text,
            )));
        }

        let Some(uid) = self.uid else {
            return Err(DecodeError::MissingIdentity { index });
        };
        let kind = match &self.kind {
            Some(k) => DeviceKind::from_code(k.to_integer(index, "type")?),
            None => DeviceKind::None,
        };
        let subkind = match &self.subt {
            Some(s) => Subkind::from_code(s.to_integer(index, "subt")?),
            None => Subkind::None,
        };
        let value = self.value.map(Scalar::into_text).unwrap_or_default();
        Ok(UpdateRecord::Reading(ReadingUpdate::new(
            uid.into_text(),
            kind,
            subkind,
            value,
        )))
    }
}

/// Decode one push payload. Any malformed record fails the whole batch.
pub fn decode_batch(payload: &str) -> Result<Vec<UpdateRecord>, DecodeError> {
    let raw: Vec<RawRecord> = serde_json::from_str(payload)?;
    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_update(index))
        .collect::<Result<Vec<_>, _>>()?;
    log::trace!("Decoded batch with {} records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_accept_json_numbers() {
        let records =
            decode_batch(r#"[{"uid": "d1", "type": 1, "subt": 1, "value": 1}]"#).unwrap();
        assert_eq!(
            records,
            vec![UpdateRecord::Reading(ReadingUpdate::new(
                "d1",
                DeviceKind::Switch,
                Subkind::Switch,
                "1"
            ))]
        );
    }

    #[test]
    fn fractional_code_is_rejected() {
        let err = decode_batch(r#"[{"uid": "d1", "type": 1.5}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidNumber { field: "type", .. }));
    }
}
