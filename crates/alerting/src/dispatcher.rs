//! Alert dispatcher: fans fired events out to banner, log and speech

use std::sync::Arc;
use std::time::Instant;

use dms::AlertEvent;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::banner::AlertBanner;
use crate::log::AlertLog;
use crate::speech::SpeechSink;
use crate::{AlertError, AlertingConfig};

/// Counters reported when the dispatcher's channel closes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub handled: usize,
    pub log_failures: usize,
}

/// Consumes alert events on the async side of the host.
///
/// Only reads events; the debounce state lives with the detection worker.
pub struct AlertDispatcher {
    log: AlertLog,
    speech: Option<Arc<dyn SpeechSink>>,
    banner: Arc<RwLock<AlertBanner>>,
}

impl AlertDispatcher {
    pub fn new(config: &AlertingConfig, speech: Arc<dyn SpeechSink>) -> Result<Self, AlertError> {
        info!("Creating alert dispatcher with config: {:?}", config);
        Ok(Self {
            log: AlertLog::new(config.log_path.clone()),
            speech: config.speech_enabled.then_some(speech),
            banner: Arc::new(RwLock::new(AlertBanner::new(config.banner_duration()?))),
        })
    }

    /// Shared banner, polled by the display
    pub fn banner(&self) -> Arc<RwLock<AlertBanner>> {
        Arc::clone(&self.banner)
    }

    pub fn log(&self) -> &AlertLog {
        &self.log
    }

    /// Deliver one event. Returns the detached speech task, if one was started.
    pub async fn handle(&self, event: &AlertEvent) -> Result<Option<JoinHandle<()>>, AlertError> {
        metrics::counter!("dms_alerts_total", "class" => event.class.name()).increment(1);

        self.banner.write().await.show(event.class, Instant::now());

        let speech = self.speech.as_ref().map(|sink| {
            let sink = Arc::clone(sink);
            let message = event.message.clone();
            tokio::task::spawn_blocking(move || {
                if let Err(e) = sink.speak(&message) {
                    warn!("Speech failed: {}", e);
                }
            })
        });

        self.log.append(event).await?;
        Ok(speech)
    }

    /// Handle events until every sender is dropped
    pub async fn run(self, mut events: mpsc::Receiver<AlertEvent>) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        while let Some(event) = events.recv().await {
            summary.handled += 1;
            if let Err(e) = self.handle(&event).await {
                summary.log_failures += 1;
                error!("Failed to log {} alert: {}", event.class, e);
            }
        }

        info!("Alert dispatcher stopped after {} alerts", summary.handled);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dms::AlertClass;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSpeech {
        spoken: Mutex<Vec<String>>,
    }

    impl SpeechSink for RecordingSpeech {
        fn speak(&self, message: &str) -> Result<(), AlertError> {
            self.spoken.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    fn config(dir: &tempfile::TempDir) -> AlertingConfig {
        AlertingConfig {
            log_path: dir.path().join("alert_log.txt"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_handle_delivers_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let speech = Arc::new(RecordingSpeech::default());
        let dispatcher = AlertDispatcher::new(&config(&dir), speech.clone()).unwrap();

        let task = dispatcher
            .handle(&AlertEvent::new(AlertClass::Drowsiness, 2.0))
            .await
            .unwrap()
            .unwrap();
        task.await.unwrap();

        assert_eq!(*speech.spoken.lock().unwrap(), vec!["You seem drowsy. Please stay alert."]);
        assert_eq!(
            dispatcher.banner().read().await.text_at(Instant::now()),
            Some("DROWSINESS ALERT!")
        );
        let logged = dispatcher.log().read().await.unwrap().unwrap();
        assert!(logged.ends_with("] Drowsiness Alert Triggered\n"));
    }

    #[tokio::test]
    async fn test_speech_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let speech = Arc::new(RecordingSpeech::default());
        let cfg = AlertingConfig { speech_enabled: false, ..config(&dir) };
        let dispatcher = AlertDispatcher::new(&cfg, speech.clone()).unwrap();

        let task = dispatcher
            .handle(&AlertEvent::new(AlertClass::Yawning, 0.0))
            .await
            .unwrap();
        assert!(task.is_none());
        assert!(speech.spoken.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_drains_channel() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AlertingConfig { speech_enabled: false, ..config(&dir) };
        let dispatcher = AlertDispatcher::new(&cfg, Arc::new(RecordingSpeech::default())).unwrap();
        let log = dispatcher.log().clone();

        let (tx, rx) = mpsc::channel(8);
        tx.send(AlertEvent::new(AlertClass::Drowsiness, 1.0)).await.unwrap();
        tx.send(AlertEvent::new(AlertClass::Yawning, 1.0)).await.unwrap();
        drop(tx);

        let summary = dispatcher.run(rx).await;
        assert_eq!(summary, DispatchSummary { handled: 2, log_failures: 0 });

        let contents = log.read().await.unwrap().unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Drowsiness Alert Triggered"));
        assert!(lines[1].ends_with("Yawning Alert Triggered"));
    }

    #[tokio::test]
    async fn test_log_failure_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let cfg = AlertingConfig {
            log_path: dir.path().to_path_buf(),
            speech_enabled: false,
            ..Default::default()
        };
        let dispatcher = AlertDispatcher::new(&cfg, Arc::new(RecordingSpeech::default())).unwrap();

        let (tx, rx) = mpsc::channel(8);
        tx.send(AlertEvent::new(AlertClass::Yawning, 1.0)).await.unwrap();
        drop(tx);

        let summary = dispatcher.run(rx).await;
        assert_eq!(summary, DispatchSummary { handled: 1, log_failures: 1 });
    }
}
