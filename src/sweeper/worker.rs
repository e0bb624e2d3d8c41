// Region worker: the per-quadrant scan loop
use super::dispatch::{Dispatcher, click_point};
use super::error::SweeperResult;
use super::ledger::SharedLedger;
use super::match_image::{
    FrameScan, MatchConfig, ScreenRegion, TemplateSet, analyze_frame, overlaps_hazard,
};
use super::signal::StopSignal;
use super::types::{WorkerReport, WorkerState};
use crate::config::Pacing;
use crate::screen::{CaptureError, ScreenCapture};
use std::sync::Arc;

/// Scans one screen region until the stop signal is raised.
///
/// Each pass captures the region, finds hazards and targets on the blocking
/// pool, then clicks every target that is clear of hazards and not already
/// in the shared ledger.
pub struct RegionWorker {
    region: ScreenRegion,
    templates: Arc<TemplateSet>,
    match_config: Arc<MatchConfig>,
    capture: Arc<dyn ScreenCapture>,
    dispatcher: Dispatcher,
    ledger: SharedLedger,
    stop: StopSignal,
    pacing: Pacing,
    state: WorkerState,
    report: WorkerReport,
}

impl RegionWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region: ScreenRegion,
        templates: Arc<TemplateSet>,
        match_config: Arc<MatchConfig>,
        capture: Arc<dyn ScreenCapture>,
        dispatcher: Dispatcher,
        ledger: SharedLedger,
        stop: StopSignal,
        pacing: Pacing,
    ) -> Self {
        let report = WorkerReport::new(region.name.clone());
        Self {
            region,
            templates,
            match_config,
            capture,
            dispatcher,
            ledger,
            stop,
            pacing,
            state: WorkerState::Scanning,
            report,
        }
    }

    fn change_state(&mut self, new_state: WorkerState) {
        if self.state != new_state {
            log::debug!(
                "🧭 Worker {}: {:?} -> {:?}",
                self.region.name,
                self.state,
                new_state
            );
            self.state = new_state;
        }
    }

    /// Run the loop to completion and report what happened.
    ///
    /// Only a panic inside frame analysis ends the loop early with an error;
    /// capture and click failures are counted and retried.
    pub async fn run(mut self) -> SweeperResult<WorkerReport> {
        log::info!("🚀 Worker started on {}", self.region);

        loop {
            if self.stop.is_stopped() {
                self.change_state(WorkerState::Stopped);
            }
            if self.state == WorkerState::Stopped {
                break;
            }

            self.report.iterations += 1;

            let scan = match self.capture_and_analyze().await? {
                Ok(scan) => scan,
                Err(e) => {
                    self.report.capture_failures += 1;
                    log::warn!("⚠️ Worker {}: capture failed: {}", self.region.name, e);
                    self.stop.sleep(self.pacing.capture_retry()).await;
                    continue;
                }
            };

            self.dispatch_targets(&scan).await;
            self.stop.sleep(self.pacing.tick_interval()).await;
        }

        log::info!("⏹️ Worker stopped. {}", self.report);
        Ok(self.report)
    }

    /// Capture the region and analyse it off the async threads. The outer
    /// result carries task failures, the inner one capture failures.
    async fn capture_and_analyze(&self) -> SweeperResult<Result<FrameScan, CaptureError>> {
        let capture = Arc::clone(&self.capture);
        let templates = Arc::clone(&self.templates);
        let config = Arc::clone(&self.match_config);
        let region = self.region.clone();

        let outcome = tokio::task::spawn_blocking(move || -> Result<FrameScan, CaptureError> {
            let frame = capture.capture(&region)?;
            if frame.width() == 0 || frame.height() == 0 {
                return Err(CaptureError::EmptyFrame {
                    region: region.name.clone(),
                });
            }
            Ok(analyze_frame(&frame, &templates, &config))
        })
        .await?;

        Ok(outcome)
    }

    async fn dispatch_targets(&mut self, scan: &FrameScan) {
        for hits in &scan.targets {
            for detection in &hits.detections {
                let point = click_point(&self.region, &detection.bbox);

                if overlaps_hazard(&detection.bbox, &scan.hazards, self.match_config.hazard_overlap) {
                    self.report.hazard_skips += 1;
                    log::debug!(
                        "  🧨 {} at {} overlaps a hazard, skipped",
                        hits.template,
                        point
                    );
                    continue;
                }

                if !self.ledger.claim(point).await {
                    self.report.duplicates += 1;
                    continue;
                }

                match self.dispatcher.click(point).await {
                    Ok(()) => {
                        self.report.clicks += 1;
                        log::info!(
                            "🖱️ {} clicked {} at {} (score {:.3}, scale {:.2})",
                            self.region.name,
                            hits.template,
                            point,
                            detection.score,
                            detection.scale
                        );
                    }
                    Err(e) => {
                        // The point stays claimed so a broken backend is not hammered
                        self.report.click_failures += 1;
                        log::warn!("⚠️ Worker {}: click at {} failed: {}", self.region.name, point, e);
                    }
                }
            }
        }
    }
}
