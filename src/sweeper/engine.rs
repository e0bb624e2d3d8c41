//! Engine wiring: quadrant workers over one shared ledger and stop signal

use super::dispatch::Dispatcher;
use super::error::{SweeperError, SweeperResult};
use super::ledger::SharedLedger;
use super::match_image::{ScreenRegion, TemplateSet};
use super::signal::StopSignal;
use super::types::WorkerReport;
use super::worker::RegionWorker;
use crate::config::SweeperConfig;
use crate::screen::{PointerInjector, ScreenCapture};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Configured, not yet running engine
pub struct Sweeper {
    config: SweeperConfig,
    templates: Arc<TemplateSet>,
    capture: Arc<dyn ScreenCapture>,
    pointer: Arc<dyn PointerInjector>,
}

impl Sweeper {
    /// Validate the configuration and bundle the collaborators.
    pub fn new(
        config: SweeperConfig,
        templates: TemplateSet,
        capture: Arc<dyn ScreenCapture>,
        pointer: Arc<dyn PointerInjector>,
    ) -> SweeperResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            templates: Arc::new(templates),
            capture,
            pointer,
        })
    }

    /// Regions the workers will own, in spawn order
    pub fn regions(&self) -> [ScreenRegion; 4] {
        self.config.capture_area.quadrants()
    }

    /// Spawn one worker per quadrant on the current tokio runtime.
    pub fn spawn(&self) -> RunningSweeper {
        let stop = StopSignal::new();
        let ledger = SharedLedger::new(self.config.ledger_capacity);
        let match_config = Arc::new(self.config.matching.clone());
        let dispatcher = Dispatcher::new(Arc::clone(&self.pointer), self.config.pacing.click_settle());

        let handles: Vec<_> = self
            .regions()
            .into_iter()
            .map(|region| {
                let worker = RegionWorker::new(
                    region,
                    Arc::clone(&self.templates),
                    Arc::clone(&match_config),
                    Arc::clone(&self.capture),
                    dispatcher.clone(),
                    ledger.clone(),
                    stop.clone(),
                    self.config.pacing,
                );
                tokio::spawn(worker.run())
            })
            .collect();

        log::info!(
            "🎮 Sweeping {} with {} workers, {} target templates",
            self.config.capture_area,
            handles.len(),
            self.templates.targets.len()
        );

        RunningSweeper {
            handles,
            stop,
            ledger,
        }
    }
}

/// Handle to the spawned workers
pub struct RunningSweeper {
    handles: Vec<JoinHandle<SweeperResult<WorkerReport>>>,
    stop: StopSignal,
    ledger: SharedLedger,
}

impl RunningSweeper {
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Raise the stop signal and wait for every worker to finish. A worker
    /// that panicked shows up as an error in its slot; the others still report.
    pub async fn shutdown(self) -> Vec<SweeperResult<WorkerReport>> {
        self.stop.stop();

        let mut reports = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            let report = match handle.await {
                Ok(result) => result,
                Err(e) => Err(SweeperError::from(e)),
            };
            reports.push(report);
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;
    use crate::screen::{CaptureError, CaptureResult, InputResult};
    use crate::sweeper::match_image::{MatchConfig, Template};
    use crate::sweeper::types::ClickPoint;
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::time::{Duration, sleep, timeout};

    fn texture(width: u32, height: u32, seed: u32) -> GrayImage {
        let mut state = seed;
        GrayImage::from_fn(width, height, |_, _| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            Luma([((state >> 16) % 200) as u8])
        })
    }

    fn to_rgba(gray: &GrayImage) -> RgbaImage {
        RgbaImage::from_fn(gray.width(), gray.height(), |x, y| {
            let v = gray.get_pixel(x, y)[0];
            Rgba([v, v, v, 255])
        })
    }

    /// Serves a fixed frame per region name, a blank frame otherwise.
    #[derive(Default)]
    struct FakeScreen {
        frames: HashMap<String, RgbaImage>,
        failing: Vec<String>,
        calls: AtomicU64,
    }

    impl ScreenCapture for FakeScreen {
        fn capture(&self, region: &ScreenRegion) -> CaptureResult<RgbaImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&region.name) {
                return Err(CaptureError::Backend {
                    description: "display asleep".to_string(),
                });
            }
            Ok(self.frames.get(&region.name).cloned().unwrap_or_else(|| {
                RgbaImage::from_pixel(region.width, region.height, Rgba([0, 0, 0, 255]))
            }))
        }
    }

    #[derive(Default)]
    struct RecordingPointer {
        clicks: Mutex<Vec<ClickPoint>>,
    }

    impl PointerInjector for RecordingPointer {
        fn click(&self, x: i32, y: i32) -> InputResult<()> {
            self.clicks.lock().unwrap().push(ClickPoint::new(x, y));
            Ok(())
        }
    }

    impl RecordingPointer {
        fn clicks(&self) -> Vec<ClickPoint> {
            self.clicks.lock().unwrap().clone()
        }
    }

    /// 200x200 area at (50,50): the top-left quadrant starts at (50,50)
    fn test_config() -> SweeperConfig {
        SweeperConfig {
            capture_area: ScreenRegion::new(50, 50, 200, 200, "test_area"),
            matching: MatchConfig::single_scale(),
            pacing: Pacing {
                tick_interval_ms: 5,
                click_settle_ms: 1,
                capture_retry_ms: 5,
            },
            ..SweeperConfig::default()
        }
    }

    /// Top-left frame with a coin whose centre maps to global (100,100)
    fn coin_scene(coin: &GrayImage) -> GrayImage {
        let mut scene = GrayImage::from_pixel(100, 100, Luma([25]));
        image::imageops::replace(&mut scene, coin, 45, 45);
        scene
    }

    fn templates(hazard: GrayImage, coin: GrayImage) -> TemplateSet {
        TemplateSet::new(
            Template::from_gray("bomb", hazard).unwrap(),
            vec![Template::from_gray("coins", coin).unwrap()],
        )
        .unwrap()
    }

    fn start(
        screen: FakeScreen,
        templates: TemplateSet,
    ) -> (RunningSweeper, Arc<RecordingPointer>, Arc<FakeScreen>) {
        let screen = Arc::new(screen);
        let pointer = Arc::new(RecordingPointer::default());
        let sweeper = Sweeper::new(test_config(), templates, screen.clone(), pointer.clone()).unwrap();
        (sweeper.spawn(), pointer, screen)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_same_point_clicked_once_across_iterations() {
        let coin = texture(10, 10, 41);
        let mut screen = FakeScreen::default();
        screen.frames.insert("top_left".to_string(), to_rgba(&coin_scene(&coin)));

        // A flat hazard template never matches
        let (running, pointer, screen) =
            start(screen, templates(GrayImage::from_pixel(8, 8, Luma([7])), coin));

        sleep(Duration::from_millis(300)).await;
        let reports = running.shutdown().await;

        assert_eq!(pointer.clicks(), vec![ClickPoint::new(100, 100)]);

        let top_left = reports
            .into_iter()
            .map(|r| r.unwrap())
            .find(|r| r.region == "top_left")
            .unwrap();
        assert!(top_left.iterations > 1, "{top_left}");
        assert_eq!(top_left.clicks, 1);
        assert_eq!(top_left.duplicates, top_left.iterations - 1);
        assert!(screen.calls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_hazard_blocks_click() {
        let coin = texture(10, 10, 41);
        let scene = coin_scene(&coin);
        let hazard = image::imageops::crop_imm(&scene, 40, 40, 22, 22).to_image();

        let mut screen = FakeScreen::default();
        screen.frames.insert("top_left".to_string(), to_rgba(&scene));
        let (running, pointer, _screen) = start(screen, templates(hazard, coin));

        sleep(Duration::from_millis(200)).await;
        let ledger = running.ledger().clone();
        let reports = running.shutdown().await;

        assert!(pointer.clicks().is_empty());
        assert_eq!(ledger.len().await, 0);
        let hazard_skips: u64 = reports.iter().map(|r| r.as_ref().unwrap().hazard_skips).sum();
        assert!(hazard_skips >= 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_capture_failure_is_retried_without_affecting_others() {
        let coin = texture(10, 10, 41);
        let mut screen = FakeScreen::default();
        screen.frames.insert("top_left".to_string(), to_rgba(&coin_scene(&coin)));
        screen.failing.push("bottom_right".to_string());

        let (running, pointer, _screen) =
            start(screen, templates(GrayImage::from_pixel(8, 8, Luma([7])), coin));

        sleep(Duration::from_millis(300)).await;
        let reports: Vec<WorkerReport> = running
            .shutdown()
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        let failing = reports.iter().find(|r| r.region == "bottom_right").unwrap();
        assert!(failing.capture_failures > 1);
        assert_eq!(failing.capture_failures, failing.iterations);
        assert_eq!(pointer.clicks(), vec![ClickPoint::new(100, 100)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stop_terminates_all_workers_promptly() {
        let coin = texture(10, 10, 41);
        let (running, _pointer, _screen) = start(
            FakeScreen::default(),
            templates(GrayImage::from_pixel(8, 8, Luma([7])), coin),
        );
        assert_eq!(running.worker_count(), 4);

        sleep(Duration::from_millis(120)).await;
        let stop = running.stop_signal();

        // One tick plus one frame analysis is far below this bound
        let reports = timeout(Duration::from_secs(2), running.shutdown())
            .await
            .expect("workers should stop promptly");

        assert!(stop.is_stopped());
        assert_eq!(reports.len(), 4);
        let mut regions: Vec<String> = reports.into_iter().map(|r| r.unwrap().region).collect();
        regions.sort();
        assert_eq!(regions, vec!["bottom_left", "bottom_right", "top_left", "top_right"]);
    }

    #[tokio::test]
    async fn test_stop_before_first_iteration() {
        let coin = texture(10, 10, 41);
        let screen = Arc::new(FakeScreen::default());
        let pointer = Arc::new(RecordingPointer::default());
        let sweeper = Sweeper::new(
            test_config(),
            templates(GrayImage::from_pixel(8, 8, Luma([7])), coin),
            screen.clone(),
            pointer,
        )
        .unwrap();

        let running = sweeper.spawn();
        running.stop_signal().stop();
        let reports = running.shutdown().await;

        for report in reports {
            assert_eq!(report.unwrap().iterations, 0);
        }
        assert_eq!(screen.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = test_config();
        config.matching.scale_factors.clear();

        let result = Sweeper::new(
            config,
            templates(texture(4, 4, 1), texture(4, 4, 2)),
            Arc::new(FakeScreen::default()),
            Arc::new(RecordingPointer::default()),
        );
        assert!(matches!(result, Err(SweeperError::Config(_))));
    }
}
