#[cfg(test)]
mod tests {
    use hc_live_telemetry::*;

    fn alarm(id: &str, severity: i32, text: &str) -> AlarmUpdate {
        AlarmUpdate::new(id, severity, AlarmChannels::GENERIC, text)
    }

    fn severities(store: &AlarmStore) -> Vec<i32> {
        store.iter().map(|e| e.severity).collect()
    }

    #[test]
    fn test_channel_bits_out_of_range_are_empty() {
        assert_eq!(AlarmChannels::bit(31), AlarmChannels::USER8);
        assert_eq!(AlarmChannels::bit(32), AlarmChannels::NONE);
        assert_eq!(AlarmChannels::bit(u32::MAX), AlarmChannels::NONE);
        assert!(!AlarmChannels::bit(40).intersects(AlarmChannels::ALL));
    }

    #[test]
    fn test_cleared_unknown_alarm_is_not_stored() {
        let mut store = AlarmStore::new();
        let change = store.upsert(alarm("a1", 0, "gone"));
        assert!(matches!(change, AlarmChange::NoChange));
        assert!(!store.contains("a1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_repeated_upserts_keep_one_entry() {
        let mut store = AlarmStore::new();
        assert!(matches!(store.upsert(alarm("a1", 3, "first")), AlarmChange::New(_)));
        for sev in [5, 2, 7, 2] {
            store.upsert(alarm("a1", sev, "again"));
            assert_eq!(store.iter().filter(|e| e.alarm_id == "a1").count(), 1);
        }
        let entry = store.get("a1").unwrap();
        assert_eq!(entry.severity, 2);
        assert_eq!(entry.text, "again");
    }

    #[test]
    fn test_update_overwrites_text_severity_and_channel() {
        let mut store = AlarmStore::new();
        store.upsert(alarm("a1", 3, "first"));
        let change = store.upsert(AlarmUpdate::new("a1", 4, AlarmChannels::POWER, "second"));
        match change {
            AlarmChange::Changed { old, new } => {
                assert_eq!(old.text, "first");
                assert_eq!(new.text, "second");
                assert_eq!(new.channel, AlarmChannels::POWER);
                assert_eq!(new.raised_at, old.raised_at);
            }
            _ => panic!("expected a change"),
        }
        assert!(matches!(
            store.upsert(AlarmUpdate::new("a1", 4, AlarmChannels::POWER, "second")),
            AlarmChange::Equal
        ));
    }

    #[test]
    fn test_clearing_existing_alarm_removes_it() {
        let mut store = AlarmStore::new();
        store.upsert(alarm("a1", 3, "x"));
        store.upsert(alarm("a2", 1, "y"));
        let change = store.upsert(alarm("a1", 0, ""));
        assert!(matches!(change, AlarmChange::Cleared(ref e) if e.alarm_id == "a1"));
        assert_eq!(store.len(), 1);
        assert!(store.contains("a2"));
    }

    #[test]
    fn test_store_stays_sorted_by_severity_and_stable_on_ties() {
        let mut store = AlarmStore::new();
        store.upsert(alarm("a", 5, ""));
        store.upsert(alarm("b", 2, ""));
        store.upsert(alarm("c", 5, ""));
        store.upsert(alarm("d", -1, ""));
        store.upsert(alarm("e", 2, ""));
        assert_eq!(severities(&store), vec![-1, 2, 2, 5, 5]);
        let ids: Vec<&str> = store.iter().map(|e| e.alarm_id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b", "e", "a", "c"]);

        store.upsert(alarm("a", 1, ""));
        assert_eq!(severities(&store), vec![-1, 1, 2, 2, 5]);
    }

    #[test]
    fn test_projection_filters_sorts_and_pads() {
        let mut store = AlarmStore::new();
        store.upsert(AlarmUpdate::new("power", 90, AlarmChannels::POWER, "Mains lost"));
        store.upsert(AlarmUpdate::new("door", 40, AlarmChannels::SECURE, "Front door open"));
        store.upsert(AlarmUpdate::new("rain", 20, AlarmChannels::WEATHER, "Rain started"));
        store.upsert(AlarmUpdate::new("low", 1, AlarmChannels::SECURE, "Battery low"));

        let panel = AlarmPanel::new("security", 3)
            .severity(10, 100)
            .channel_mask(AlarmChannels::SECURE | AlarmChannels::POWER);
        let slots = store.project(&panel);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].text(), "Front door open");
        assert_eq!(slots[1].text(), "Mains lost");
        assert!(slots[2].is_empty());
    }

    #[test]
    fn test_projection_severity_bounds_are_inclusive() {
        let mut store = AlarmStore::new();
        store.upsert(alarm("lo", 10, "lo"));
        store.upsert(alarm("hi", 20, "hi"));
        store.upsert(alarm("out", 21, "out"));
        let panel = AlarmPanel::new("p", 5).severity(10, 20);
        let slots = store.project(&panel);
        let texts: Vec<&str> = slots
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                AlarmSlot::Active { alarm_id, .. } => alarm_id.as_str(),
                AlarmSlot::Empty => "",
            })
            .collect();
        assert_eq!(texts, vec!["lo", "hi"]);
    }

    #[test]
    fn test_projection_overflow_truncates_and_text_width() {
        let mut store = AlarmStore::new();
        for i in 1..=6 {
            store.upsert(alarm(&format!("a{}", i), i, "a rather long alarm message"));
        }
        let panel = AlarmPanel::new("p", 4).text_width(8);
        let slots = store.project(&panel);
        assert_eq!(slots.len(), 4);
        assert!(slots.iter().all(|s| s.text() == "a rather"));
        let sevs: Vec<i32> = slots
            .iter()
            .map(|s| match s {
                AlarmSlot::Active { severity, .. } => *severity,
                AlarmSlot::Empty => 0,
            })
            .collect();
        assert_eq!(sevs, vec![1, 2, 3, 4]);
        // the store itself keeps the full text
        assert_eq!(store.get("a1").unwrap().text, "a rather long alarm message");
    }

    #[test]
    fn test_channel_mask_without_intersection_is_empty() {
        let mut store = AlarmStore::new();
        store.upsert(AlarmUpdate::new("a", 5, AlarmChannels::YARD, "sprinkler"));
        let panel = AlarmPanel::new("p", 2).channel_mask(AlarmChannels::LIGHTS);
        assert!(store.project(&panel).iter().all(AlarmSlot::is_empty));
    }
}
