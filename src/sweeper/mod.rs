// Sweeper module
// Concurrent scan-and-click engine: one worker per screen quadrant, a shared
// click ledger for deduplication and a shared stop signal.

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod match_image;
pub mod signal;
pub mod types;
pub mod worker;

// Re-export the main types and functions for easy access
pub use dispatch::{Dispatcher, click_point};
pub use engine::{RunningSweeper, Sweeper};
pub use error::{ConfigError, SweeperError, SweeperResult, TemplateError};
pub use ledger::{ClickLedger, DEFAULT_LEDGER_CAPACITY, SharedLedger};
pub use signal::StopSignal;
pub use types::{ClickPoint, WorkerReport, WorkerState};
pub use worker::RegionWorker;
