use crate::{
    decode_batch, project_reading, AlarmChange, AlarmPanel, AlarmSlot, AlarmStore, DecodeError,
    HistoryKey, HistoryStore, NumberFormat, PreferenceSource, ReadingUpdate, TelemetryConfig,
    Trend, TrendStyle, UpdateRecord, ViewChange, ViewStore,
};

/// Receives computed display state after every applied batch. Implementors
/// only read the session.
pub trait RenderSink {
    fn render(&mut self, changes: &[ViewChange], session: &TelemetrySession);
}

impl<F> RenderSink for F
where
    F: FnMut(&[ViewChange], &TelemetrySession),
{
    fn render(&mut self, changes: &[ViewChange], session: &TelemetrySession) {
        self(changes, session)
    }
}

/// All live state of one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct TelemetrySession {
    config: TelemetryConfig,
    alarms: AlarmStore,
    history: HistoryStore,
    views: ViewStore,
}

impl TelemetrySession {
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            history: HistoryStore::with_capacity(config.history_capacity),
            alarms: AlarmStore::new(),
            views: ViewStore::new(),
            config,
        }
    }

    pub fn number_format<P: PreferenceSource + ?Sized>(&self, prefs: &P) -> NumberFormat {
        NumberFormat::new(prefs.abbreviate())
            .large_value_threshold(self.config.large_value_threshold)
    }

    pub fn apply<P: PreferenceSource + ?Sized>(
        &mut self,
        record: UpdateRecord,
        prefs: &P,
    ) -> Option<ViewChange> {
        match record {
            UpdateRecord::Reading(reading) => Some(self.apply_reading(reading, prefs)),
            UpdateRecord::Alarm(update) => {
                log::trace!("Alarm update [{}] sev {}", update.alarm_id, update.severity);
                match self.alarms.upsert(update) {
                    AlarmChange::New(entry) => Some(ViewChange::AlarmRaised(entry)),
                    AlarmChange::Changed { old, new } => {
                        Some(ViewChange::AlarmChanged { from: old, to: new })
                    }
                    AlarmChange::Cleared(entry) => Some(ViewChange::AlarmCleared {
                        alarm_id: entry.alarm_id,
                    }),
                    AlarmChange::Equal | AlarmChange::NoChange => None,
                }
            }
        }
    }

    fn apply_reading<P: PreferenceSource + ?Sized>(
        &mut self,
        reading: ReadingUpdate,
        prefs: &P,
    ) -> ViewChange {
        let projection = project_reading(&reading, &self.number_format(prefs));
        log::trace!("Reading {} -> {}", reading.device_id, projection);
        if let Some(sample) = reading.value.as_sample() {
            let key = HistoryKey::new(reading.device_id.as_str(), reading.subkind);
            self.history.push(&key, sample);
        }
        let changed = self.views.store(&reading, projection.clone()).is_changed();
        ViewChange::Reading {
            device_id: reading.device_id,
            projection,
            changed,
        }
    }

    pub fn apply_batch<P: PreferenceSource + ?Sized>(
        &mut self,
        records: Vec<UpdateRecord>,
        prefs: &P,
    ) -> Vec<ViewChange> {
        records
            .into_iter()
            .filter_map(|record| self.apply(record, prefs))
            .collect()
    }

    /// Decode and apply one payload. On a decode error nothing is applied.
    pub fn ingest<P: PreferenceSource + ?Sized>(
        &mut self,
        payload: &str,
        prefs: &P,
    ) -> Result<Vec<ViewChange>, DecodeError> {
        let records = decode_batch(payload)?;
        Ok(self.apply_batch(records, prefs))
    }

    /// Ingest a payload and hand the result to `sink`. Returns the number of
    /// changes rendered.
    pub fn process<P, S>(
        &mut self,
        payload: &str,
        prefs: &P,
        sink: &mut S,
    ) -> Result<usize, DecodeError>
    where
        P: PreferenceSource + ?Sized,
        S: RenderSink + ?Sized,
    {
        let changes = self.ingest(payload, prefs)?;
        sink.render(&changes, self);
        Ok(changes.len())
    }

    pub fn alarm_slots(&self, panel: &AlarmPanel) -> Vec<AlarmSlot> {
        self.alarms.project(panel)
    }

    /// Slots of a panel from the configuration, by name.
    pub fn panel_slots(&self, name: &str) -> Option<Vec<AlarmSlot>> {
        self.config.panel(name).map(|panel| self.alarms.project(panel))
    }

    /// Trend of the series the device currently reports.
    pub fn trend(&self, device_id: &str, style: TrendStyle) -> Option<Trend> {
        let view = self.views.get_view(device_id)?;
        self.history
            .trend(&HistoryKey::new(device_id, view.subkind), style)
    }

    pub fn displayed_text(&self, device_id: &str) -> Option<String> {
        self.views.displayed_text(device_id)
    }

    pub fn alarms(&self) -> &AlarmStore {
        &self.alarms
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn views(&self) -> &ViewStore {
        &self.views
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}
