//! Sampling driver
//!
//! One tick: pull a frame, step the detector, dispatch the result. Ticks never
//! overlap; the detector step itself is synchronous.
//!
//! Sources may block (file or pipe reads), so each read runs on the blocking
//! pool and races the stop signal.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use alerting::{AlertDispatcher, OverlaySink, Status};
use landmarks::{LandmarkSource, SourceError};
use posture::{LandmarkFrame, SlouchDetector};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Stop was requested through a [`MonitorHandle`]
    Stopped,
    /// The landmark source has no more frames
    Exhausted,
}

/// Totals for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub alerts: u64,
    pub source_faults: u64,
    /// Detector evidence counter when the run ended
    pub final_counter: u32,
    pub reason: StopReason,
}

/// Stops a running monitor from another task
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    stop_tx: Arc<watch::Sender<bool>>,
}

impl MonitorHandle {
    pub fn stop(&self) {
        info!("Stop requested");
        self.stop_tx.send_replace(true);
    }
}

/// The posture monitor: landmark source, detector, and presentation
pub struct Monitor<S> {
    config: MonitorConfig,
    source: Arc<Mutex<S>>,
    dispatcher: AlertDispatcher,
    overlay: Option<Box<dyn OverlaySink + Send>>,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
}

impl<S: LandmarkSource + Send + 'static> Monitor<S> {
    pub fn new(config: MonitorConfig, source: S, dispatcher: AlertDispatcher) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        Self {
            config,
            source: Arc::new(Mutex::new(source)),
            dispatcher,
            overlay: None,
            stop_tx: Arc::new(stop_tx),
            stop_rx,
        }
    }

    /// Attach a debug overlay; used only when `debug_overlay` is enabled
    pub fn with_overlay(mut self, overlay: impl OverlaySink + Send + 'static) -> Self {
        self.overlay = Some(Box::new(overlay));
        self
    }

    pub fn handle(&self) -> MonitorHandle {
        MonitorHandle {
            stop_tx: self.stop_tx.clone(),
        }
    }

    /// Shared landmark source. A read abandoned by a stop may still hold the
    /// lock until it returns.
    pub fn source(&self) -> &Arc<Mutex<S>> {
        &self.source
    }

    pub fn dispatcher(&self) -> &AlertDispatcher {
        &self.dispatcher
    }

    /// Run until stopped or the source is exhausted.
    ///
    /// Every run starts from a fresh detector state.
    pub async fn run(&mut self) -> RunSummary {
        self.stop_tx.send_replace(false);
        self.stop_rx.borrow_and_update();

        let mut detector = SlouchDetector::new(self.config.detector.clone());
        let mut summary = RunSummary {
            ticks: 0,
            alerts: 0,
            source_faults: 0,
            final_counter: 0,
            reason: StopReason::Stopped,
        };

        info!(
            interval_ms = self.config.tick_interval_ms,
            sustain = self.config.detector.sustain_count,
            cooldown_ms = self.config.detector.cooldown_ms,
            "Starting posture monitor, threshold {:.3}",
            detector.threshold()
        );
        self.dispatcher.set_status(Status::Monitoring);

        let mut interval = tokio::time::interval(self.config.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                changed = self.stop_rx.changed() => {
                    if changed.is_err() || *self.stop_rx.borrow() {
                        summary.reason = StopReason::Stopped;
                        break;
                    }
                }

                instant = interval.tick() => {
                    let Some(fetched) = self.next_frame().await else {
                        summary.reason = StopReason::Stopped;
                        break;
                    };
                    if !self.tick(&mut detector, fetched, instant.into_std(), &mut summary) {
                        summary.reason = StopReason::Exhausted;
                        break;
                    }
                }
            }
        }

        summary.final_counter = detector.state().counter;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.clear();
        }
        self.dispatcher.set_status(Status::Stopped);
        info!(
            "Posture monitor stopped ({:?}): {} ticks, {} alerts, {} source faults",
            summary.reason, summary.ticks, summary.alerts, summary.source_faults
        );
        summary
    }

    /// Read the next frame off the runtime. `None` if a stop arrives first.
    async fn next_frame(&mut self) -> Option<Result<LandmarkFrame, SourceError>> {
        let source = Arc::clone(&self.source);
        let mut read = tokio::task::spawn_blocking(move || match source.lock() {
            Ok(mut source) => source.get_landmarks(),
            Err(_) => Err(SourceError::Unavailable("landmark source poisoned".into())),
        });

        loop {
            tokio::select! {
                biased;

                changed = self.stop_rx.changed() => {
                    if changed.is_err() || *self.stop_rx.borrow() {
                        debug!("Stop requested during landmark read");
                        return None;
                    }
                }

                joined = &mut read => {
                    return Some(joined.unwrap_or_else(|e| {
                        Err(SourceError::Unavailable(format!("landmark read failed: {e}")))
                    }));
                }
            }
        }
    }

    /// Process one tick. Returns `false` once the source is exhausted.
    fn tick(
        &mut self,
        detector: &mut SlouchDetector,
        fetched: Result<LandmarkFrame, SourceError>,
        now: Instant,
        summary: &mut RunSummary,
    ) -> bool {
        let frame = match fetched {
            Ok(frame) => frame,
            Err(e) if e.is_end_of_stream() => return false,
            Err(e) => {
                // A failed tick counts as a tick without a face
                warn!("Landmark source fault: {}", e);
                summary.source_faults += 1;
                metrics::counter!("posture_source_faults_total").increment(1);
                LandmarkFrame::absent()
            }
        };

        summary.ticks += 1;
        metrics::counter!("posture_ticks_total").increment(1);

        if self.config.debug_overlay {
            if let Some(overlay) = self.overlay.as_mut() {
                overlay.draw(&frame);
            }
        }

        let result = detector.step(&frame, now);
        if result.alert_requested {
            summary.alerts += 1;
            metrics::counter!("posture_alerts_total").increment(1);
        }
        debug!(tick = summary.ticks, state = ?result.state, counter = result.counter, "Tick");

        self.dispatcher.dispatch(&result, now);
        true
    }
}
