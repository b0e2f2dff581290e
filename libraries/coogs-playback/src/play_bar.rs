//! Play bar
//!
//! Binds one audio element to the player store. The bar keeps the bits of
//! state that only matter to this one view (seeking, volume slider) out of
//! the shared store.

use crate::audio::AudioElement;
use crate::player::PlayerStore;
use coogs_core::SongId;
use std::time::Duration;
use tracing::{debug, warn};

/// Transport controls bound to a single audio element
///
/// Seeking:
/// ```text
/// pointer down -> begin_seek()      time updates from the element are ignored
/// pointer move -> preview_seek(t)   only the displayed time moves
/// pointer up   -> commit_seek(t)    element seeks, updates resume
/// ```
pub struct PlayBar<A: AudioElement> {
    audio: A,

    /// Song currently loaded into the element
    loaded_song: Option<SongId>,

    /// Player play generation the element position matches
    applied_generation: u64,

    /// Play flag last applied to the element
    applied_playing: bool,

    is_seeking: bool,
    is_volume_slider_visible: bool,
    displayed_time: Duration,
}

impl<A: AudioElement> PlayBar<A> {
    /// Create a play bar owning `audio`
    pub fn new(audio: A) -> Self {
        Self {
            audio,
            loaded_song: None,
            applied_generation: 0,
            applied_playing: false,
            is_seeking: false,
            is_volume_slider_visible: false,
            displayed_time: Duration::ZERO,
        }
    }

    /// Bring the element in line with the player
    ///
    /// A new song is loaded; the loaded song started again (replay, repeat,
    /// previous) is rewound to zero. Element failures are logged and leave
    /// the bar in a degraded but usable state.
    pub fn sync(&mut self, player: &PlayerStore) {
        let Some(track) = player.current_track() else {
            if self.loaded_song.take().is_some() {
                self.audio.pause();
                self.audio.unload();
                self.applied_playing = false;
                self.displayed_time = Duration::ZERO;
            }
            return;
        };

        if self.loaded_song != track.song_id {
            debug!(song_id = ?track.song_id, "Loading track into audio element");
            match self.audio.load(track) {
                Ok(()) => {
                    self.loaded_song = track.song_id;
                    self.applied_generation = player.play_generation();
                    self.applied_playing = false;
                    self.displayed_time = Duration::ZERO;
                }
                Err(e) => {
                    warn!(song_id = ?track.song_id, error = %e, "Failed to load track");
                    return;
                }
            }
        } else if self.applied_generation != player.play_generation() {
            debug!(song_id = ?track.song_id, "Rewinding restarted track");
            if let Err(e) = self.audio.seek(Duration::ZERO) {
                warn!(error = %e, "Failed to rewind track");
            }
            self.applied_generation = player.play_generation();
            self.displayed_time = Duration::ZERO;
        }

        self.audio.set_loop(player.repeat());
        self.audio.set_volume(player.element_volume());

        let should_play = player.is_playing();
        if should_play != self.applied_playing {
            if should_play {
                if let Err(e) = self.audio.play() {
                    warn!(error = %e, "Audio element refused to play");
                    return;
                }
            } else {
                self.audio.pause();
            }
            self.applied_playing = should_play;
        }
    }

    /// Play/pause button
    pub fn on_play_pause(&mut self, player: &mut PlayerStore) {
        player.toggle();
        self.sync(player);
    }

    /// Next button
    pub fn on_next(&mut self, player: &mut PlayerStore) {
        player.next();
        self.sync(player);
    }

    /// Previous button
    pub fn on_previous(&mut self, player: &mut PlayerStore) {
        player.previous();
        self.sync(player);
    }

    /// Element `timeupdate` event
    pub fn on_time_update(&mut self, player: &mut PlayerStore) {
        if self.is_seeking {
            return;
        }
        let time = self.audio.current_time();
        self.displayed_time = time;
        player.set_elapsed(time);
    }

    /// Element `ended` event
    pub fn on_ended(&mut self, player: &mut PlayerStore) {
        // The element pauses itself at the end of a source
        self.applied_playing = false;

        player.on_track_ended();
        self.sync(player);
    }

    /// Pointer down on the progress bar
    pub fn begin_seek(&mut self) {
        self.is_seeking = true;
    }

    /// Pointer moved while seeking
    pub fn preview_seek(&mut self, position: Duration) {
        if self.is_seeking {
            self.displayed_time = self.clamp_to_duration(position);
        }
    }

    /// Pointer up: commit the chosen time to the element
    pub fn commit_seek(&mut self, position: Duration, player: &mut PlayerStore) {
        let position = self.clamp_to_duration(position);
        self.is_seeking = false;

        if self.loaded_song.is_none() {
            return;
        }

        match self.audio.seek(position) {
            Ok(()) => {
                self.displayed_time = position;
                player.set_elapsed(position);
            }
            Err(e) => {
                warn!(error = %e, ?position, "Seek failed");
                self.displayed_time = self.audio.current_time();
            }
        }
    }

    /// Volume slider moved
    pub fn set_volume(&mut self, player: &mut PlayerStore, level: u8) {
        player.set_volume(level);
        self.audio.set_volume(player.element_volume());
    }

    /// Mute button
    pub fn toggle_mute(&mut self, player: &mut PlayerStore) {
        player.toggle_mute();
        self.audio.set_volume(player.element_volume());
    }

    /// Volume icon clicked
    pub fn toggle_volume_slider(&mut self) {
        self.is_volume_slider_visible = !self.is_volume_slider_visible;
    }

    /// Whether the user is dragging the progress bar
    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    /// Whether the volume slider is shown
    pub fn is_volume_slider_visible(&self) -> bool {
        self.is_volume_slider_visible
    }

    /// Time shown next to the progress bar
    pub fn displayed_time(&self) -> Duration {
        self.displayed_time
    }

    /// Progress in `[0.0, 1.0]`, zero while duration is unknown
    pub fn progress(&self) -> f64 {
        match self.audio.duration() {
            Some(total) if !total.is_zero() => {
                (self.displayed_time.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// The bound element
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// The bound element, mutably (platform event plumbing)
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn clamp_to_duration(&self, position: Duration) -> Duration {
        match self.audio.duration() {
            Some(total) => position.min(total),
            None => position,
        }
    }
}
