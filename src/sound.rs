//! Sound selection.
//!
//! Tracks which clip should be playing and whether audio is paused. The
//! actual playback lives outside the crate behind [`AudioSink`].

use crate::eruption::SoundId;

/// Playback backend, implemented by the audio frontend.
pub trait AudioSink {
    fn play(&mut self, sound: SoundId);
    fn pause(&mut self, sound: SoundId);
}

/// Sink that discards everything. Used when no audio frontend is attached.
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _sound: SoundId) {}
    fn pause(&mut self, _sound: SoundId) {}
}

/// Chooses which sound plays.
///
/// Audio starts paused; browsers only allow playback after a user action,
/// so the frontend calls [`SoundSelector::resume`] when the user enables it.
#[derive(Debug)]
pub struct SoundSelector {
    known: Vec<SoundId>,
    paused: bool,
    last_played: Option<SoundId>,
}

impl SoundSelector {
    /// Create a selector for the given clips. The first one is the initial selection.
    pub fn new(known: &[SoundId]) -> Self {
        Self {
            known: known.to_vec(),
            paused: true,
            last_played: known.first().copied(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_played(&self) -> Option<SoundId> {
        self.last_played
    }

    /// Select a sound; it starts immediately unless audio is paused.
    pub fn set_sound(&mut self, sound: SoundId, sink: &mut dyn AudioSink) {
        self.last_played = Some(sound);
        if !self.paused {
            self.play(Some(sound), sink);
        }
    }

    /// Stop everything and play `sound`. `None` just stops everything.
    pub fn play(&mut self, sound: Option<SoundId>, sink: &mut dyn AudioSink) {
        let Some(sound) = sound else {
            self.pause(sink);
            return;
        };
        if !self.known.contains(&sound) {
            log::warn!("Sound {} not initialised", sound);
            return;
        }
        self.pause(sink);
        sink.play(sound);
        self.last_played = Some(sound);
        self.paused = false;
    }

    /// Pause all known sounds.
    pub fn pause(&mut self, sink: &mut dyn AudioSink) {
        for &sound in &self.known {
            sink.pause(sound);
        }
        self.paused = true;
    }

    /// Resume the last selected sound.
    pub fn resume(&mut self, sink: &mut dyn AudioSink) {
        if self.last_played.is_some() {
            self.play(self.last_played, sink);
        }
        self.paused = false;
    }
}

impl Default for SoundSelector {
    fn default() -> Self {
        Self::new(&SoundId::ALL)
    }
}
