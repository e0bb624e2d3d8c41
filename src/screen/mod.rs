// Screen module - the engine's view of the outside world.
// Capture and pointer injection are consumed through the traits in `types`;
// the desktop implementations are only compiled with the `desktop` feature.

#[cfg(feature = "desktop")]
pub mod desktop;
pub mod error;
pub mod types;

// Re-export the main types for easy access
#[cfg(feature = "desktop")]
pub use desktop::{DesktopCapture, DesktopPointer};
pub use error::{CaptureError, CaptureResult, InputError, InputResult};
pub use types::{PointerInjector, ScreenCapture};
