//! Drowsiness Monitor Host
//!
//! Wires the DMS detection worker to alert delivery: the worker runs on its
//! own OS thread, alerts cross an mpsc channel, and the dispatcher and
//! banner display run on the tokio runtime.

pub mod logging;
pub mod replay;
pub mod settings;

pub use logging::init_logging;
pub use replay::{ReplayError, ReplaySession};
pub use settings::{LoggingConfig, Settings};

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use alerting::{AlertBanner, AlertDispatcher, AlertLog, ConsoleSpeech, DispatchSummary, SpeechSink};
use anyhow::{anyhow, Context};
use camera_capture::FrameSource;
use dms::{DetectionLoop, FrameEvaluator, LandmarkProvider, LoopSummary};
use tokio::sync::{mpsc, RwLock};
use tracing::info;

/// Alerts buffered between the worker and the dispatcher
pub const ALERT_CHANNEL_CAPACITY: usize = 64;

/// How often the display polls the banner
const BANNER_POLL: Duration = Duration::from_millis(100);

/// Outcome of one detection session
#[derive(Debug, Clone, Copy)]
pub struct SessionReport {
    pub detection: LoopSummary,
    pub dispatch: DispatchSummary,
}

/// Run detection over a recorded landmark session
pub async fn run_replay(settings: &Settings, path: &Path, realtime: bool) -> anyhow::Result<SessionReport> {
    let session = ReplaySession::load(path)
        .with_context(|| format!("failed to load recording {}", path.display()))?;
    let (frames, landmarks) = session.split(realtime);
    run_session(settings, frames, landmarks, Arc::new(ConsoleSpeech)).await
}

/// Run one detection session until the source ends or Ctrl-C is pressed
pub async fn run_session<S, P>(
    settings: &Settings,
    source: S,
    provider: P,
    speech: Arc<dyn SpeechSink>,
) -> anyhow::Result<SessionReport>
where
    S: FrameSource + Send + 'static,
    P: LandmarkProvider + Send + 'static,
{
    let evaluator = FrameEvaluator::new(settings.detection.clone()).context("invalid detection settings")?;
    let dispatcher = AlertDispatcher::new(&settings.alerts, speech).context("invalid alert settings")?;
    let banner = dispatcher.banner();

    let detection = DetectionLoop::new(source, provider, evaluator);
    let stop = detection.stop_handle();
    let (tx, rx) = mpsc::channel(ALERT_CHANNEL_CAPACITY);

    let worker = std::thread::Builder::new()
        .name("dms-worker".to_string())
        .spawn(move || detection.run(tx))
        .context("failed to spawn detection worker")?;

    let dispatch = tokio::spawn(dispatcher.run(rx));
    let display = tokio::spawn(display_banner(banner));
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Stop requested");
            stop.stop();
        }
    });

    let detection = tokio::task::spawn_blocking(move || worker.join())
        .await?
        .map_err(|_| anyhow!("detection worker panicked"))?;
    // The worker dropped its sender, so the dispatcher drains and exits.
    let dispatch = dispatch.await?;

    signal.abort();
    display.abort();

    Ok(SessionReport { detection, dispatch })
}

/// Print banner text when it appears and when it clears
async fn display_banner(banner: Arc<RwLock<AlertBanner>>) {
    let mut shown: Option<&'static str> = None;
    let mut ticker = tokio::time::interval(BANNER_POLL);

    loop {
        ticker.tick().await;
        let text = banner.read().await.text_at(Instant::now());
        if text != shown {
            match text {
                Some(text) => println!("{text}"),
                None => println!(),
            }
            shown = text;
        }
    }
}

/// Contents of the alert log for display
pub async fn view_log(settings: &Settings) -> anyhow::Result<String> {
    let log = AlertLog::new(settings.alerts.log_path.clone());
    log.view()
        .await
        .with_context(|| format!("failed to read {}", log.path().display()))
}
