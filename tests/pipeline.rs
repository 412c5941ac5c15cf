#[cfg(all(test, feature = "tokio"))]
mod tests {
    use hc_live_telemetry::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::watch;

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<String>>>);

    impl RenderSink for RecordingSink {
        fn render(&mut self, changes: &[ViewChange], session: &TelemetrySession) {
            let mut seen = self.0.lock().unwrap();
            for change in changes {
                if let ViewChange::Reading { device_id, .. } = change {
                    seen.push(format!(
                        "{}={}",
                        device_id,
                        session.displayed_text(device_id).unwrap_or_default()
                    ));
                }
            }
        }
    }

    fn switch_batch(value: &str) -> String {
        format!(
            r#"[{{"uid" : "d1", "type" : "1", "subt" : "1", "value" : "{}" }}]"#,
            value
        )
    }

    #[tokio::test]
    async fn test_pipeline_applies_batches_in_order() {
        let config = TelemetryConfig::new();
        let (tx, rx) = telemetry_channel(&config);
        let sink = RecordingSink::default();
        let handle = run_telemetry_pipeline(
            TelemetrySession::new(config),
            DisplayPreferences::default(),
            sink.clone(),
            rx,
            CancellationToken::new(),
        );

        tx.send(switch_batch("1")).await.unwrap();
        tx.send("not json".to_string()).await.unwrap();
        tx.send(switch_batch("0")).await.unwrap();
        drop(tx);

        let (session, stats) = handle.join().await.unwrap();
        assert_eq!(session.displayed_text("d1").as_deref(), Some("OFF"));
        assert_eq!(
            stats,
            PipelineStats {
                batches: 3,
                dropped: 1,
                changes: 2
            }
        );
        assert_eq!(
            *sink.0.lock().unwrap(),
            vec!["d1=ON".to_string(), "d1=OFF".to_string()]
        );
    }

    #[tokio::test]
    async fn test_pipeline_stop_returns_session() {
        let (tx, rx) = telemetry_channel(&TelemetryConfig::new());
        let handle = run_telemetry_pipeline(
            TelemetrySession::default(),
            DisplayPreferences::default(),
            |_: &[ViewChange], _: &TelemetrySession| {},
            rx,
            CancellationToken::new(),
        );
        let (session, stats) = handle.stop().await.unwrap();
        assert_eq!(stats, PipelineStats::default());
        assert_eq!(session.views().count(), 0);
        // receiver is gone once the task has exited
        assert!(tx.send(switch_batch("1")).await.is_err());
    }

    #[tokio::test]
    async fn test_preference_changes_apply_to_next_batch() {
        let (tx, rx) = telemetry_channel(&TelemetryConfig::new());
        let (prefs_tx, prefs_rx) = watch::channel(DisplayPreferences::new(false));
        let sink = RecordingSink::default();
        let handle = run_telemetry_pipeline(
            TelemetrySession::default(),
            prefs_rx,
            sink.clone(),
            rx,
            CancellationToken::new(),
        );
        let batch = r#"[{"uid" : "p", "type" : "3", "subt" : "20", "value" : "2500.5" }]"#;

        tx.send(batch.to_string()).await.unwrap();
        // wait until the first batch is rendered before flipping the preference
        while sink.0.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }
        prefs_tx.send(DisplayPreferences::new(true)).unwrap();
        tx.send(batch.to_string()).await.unwrap();
        drop(tx);

        handle.join().await.unwrap();
        assert_eq!(
            *sink.0.lock().unwrap(),
            vec!["p=2500.5".to_string(), "p=2.5k".to_string()]
        );
    }
}
