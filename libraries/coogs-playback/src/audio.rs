//! Platform-agnostic audio element trait
//!
//! Abstracts the single media element the play bar drives (an HTML
//! `<audio>` tag in the browser, a native player elsewhere).

use crate::error::Result;
use coogs_core::Track;
use std::time::Duration;

/// Media element controlled by the play bar
///
/// Implementors own the actual audio output. The play bar is the only caller,
/// so implementations can assume a single driver.
pub trait AudioElement {
    /// Load a new source for `track`, resetting playback time to zero
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Drop the current source
    fn unload(&mut self);

    /// Start or resume playback
    ///
    /// Can fail when the platform refuses playback (autoplay policy).
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Set output volume as a linear fraction in `[0.0, 1.0]`
    fn set_volume(&mut self, volume: f64);

    /// Loop the current source
    fn set_loop(&mut self, looping: bool);

    /// Move the playhead
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Current playhead
    fn current_time(&self) -> Duration;

    /// Source duration, once known
    fn duration(&self) -> Option<Duration>;
}
