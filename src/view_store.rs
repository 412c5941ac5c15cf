use chrono::{DateTime, Utc};
use std::{
    collections::{hash_map::Keys, HashMap},
    ops::Deref,
};

use crate::{DeviceKind, Projection, ReadingUpdate, Subkind, ValueUpdate};

/// What a device widget currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceView {
    pub kind: DeviceKind,
    pub subkind: Subkind,
    pub projection: Projection,
    pub last_received: DateTime<Utc>,
    pub last_changed: DateTime<Utc>,
}

#[derive(Default, Clone, Debug)]
pub struct ViewStore(HashMap<String, DeviceView>);

impl Deref for ViewStore {
    type Target = HashMap<String, DeviceView>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(
        &mut self,
        reading: &ReadingUpdate,
        projection: Projection,
    ) -> ValueUpdate<Projection> {
        let now = Utc::now();
        if let Some(view) = self.0.get_mut(&reading.device_id) {
            view.last_received = now;
            view.kind = reading.kind;
            view.subkind = reading.subkind;
            if view.projection != projection {
                let old = std::mem::replace(&mut view.projection, projection.clone());
                view.last_changed = now;
                ValueUpdate::Changed {
                    old: Some(old),
                    new: projection,
                }
            } else {
                ValueUpdate::Equal
            }
        } else {
            self.0.insert(
                reading.device_id.clone(),
                DeviceView {
                    kind: reading.kind,
                    subkind: reading.subkind,
                    projection: projection.clone(),
                    last_received: now,
                    last_changed: now,
                },
            );
            ValueUpdate::Changed {
                old: None,
                new: projection,
            }
        }
    }

    pub fn get_view(&self, device_id: &str) -> Option<&DeviceView> {
        self.0.get(device_id)
    }

    pub fn displayed_text(&self, device_id: &str) -> Option<String> {
        self.0.get(device_id).map(|view| view.projection.text())
    }

    pub fn devices(&self) -> Keys<'_, String, DeviceView> {
        self.0.keys()
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }
}
