//! Fire-and-forget audio cues.

use log::trace;

/// Sound effects the simulation asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// An entity lost health.
    Hit,
    /// A projectile was fired.
    Shot,
}

/// Audio sink. Playback is never acknowledged.
#[cfg_attr(test, mockall::automock)]
pub trait AudioOutput {
    /// Plays `cue`.
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl AudioOutput for Silence {
    fn play(&mut self, cue: AudioCue) {
        trace!("audio cue {cue:?} dropped");
    }
}

/// Records cues in order, for headless runs and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CueLog {
    /// Cues received so far.
    pub cues: Vec<AudioCue>,
}

impl CueLog {
    /// Number of times `cue` was played.
    #[must_use]
    pub fn count(&self, cue: AudioCue) -> usize {
        self.cues.iter().filter(|played| **played == cue).count()
    }
}

impl AudioOutput for CueLog {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}
