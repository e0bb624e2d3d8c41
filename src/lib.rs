pub mod config;
pub mod screen;
pub mod sweeper;

pub use config::{Pacing, SweeperConfig};
pub use sweeper::{RunningSweeper, Sweeper, SweeperError, SweeperResult};
