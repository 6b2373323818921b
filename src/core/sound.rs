//! Audio-level math and the play/stop toggle, independent of WebAudio.

use crate::constants::{SOUND_OFF_LABEL, SOUND_ON_LABEL};

/// Mean of the analyser's byte frequency data. An analyser that has not
/// produced anything yet reads as silence.
pub fn average_frequency(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

/// Normalised loudness written to `uHoverState`.
#[inline]
pub fn hover_state(average: f32, divisor: f32) -> f32 {
    if divisor <= 0.0 {
        return 0.0;
    }
    average / divisor
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCommand {
    Play,
    Stop,
}

/// State behind the sound button. Starts off; every click flips it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoundToggle {
    on: bool,
}

impl SoundToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Text the button shows for the current state.
    pub fn label(&self) -> &'static str {
        if self.on {
            SOUND_OFF_LABEL
        } else {
            SOUND_ON_LABEL
        }
    }

    /// Flip the state and return what the audio source has to do.
    pub fn toggle(&mut self) -> SoundCommand {
        let cmd = if self.on {
            SoundCommand::Stop
        } else {
            SoundCommand::Play
        };
        self.on = !self.on;
        cmd
    }
}
