//! Seams to the platform: where frames go and where amplitude comes from.

use crate::error::PresenceError;
use crate::scene::{Scene, SurfaceSize};
use crate::tap::AmplitudeTap;

/// A drawable region the engine is attached to.
pub trait PresenceSurface {
    /// Current physical size. A zero area means "not drawable right now".
    fn size(&self) -> SurfaceSize;

    fn present(&mut self, scene: &Scene<'_>) -> Result<(), PresenceError>;
}

/// Audio acquisition owned by an attached engine.
///
/// `start` is called from `attach` and `stop` from `detach` (or when the
/// engine is dropped). Implementations either push RMS values into the tap
/// from their own thread, or sample in `poll`, which runs at the start of
/// every tick.
pub trait AudioCapture {
    fn start(&mut self, tap: AmplitudeTap) -> Result<(), PresenceError>;

    fn poll(&mut self) {}

    fn stop(&mut self);
}
