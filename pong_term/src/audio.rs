//! Synthesized sound effects and music via rodio

use std::time::Duration;

use pong_core::{Cue, SoundHandle};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

// ── Notes ───────────────────────────────────────────────────────────────────

const A4: f32 = 440.0;
const B4: f32 = 493.88;
const C5: f32 = 523.25;
const D5: f32 = 587.33;
const E5: f32 = 659.25;

const BEAT: u64 = 300; // ms per quarter note

/// Opening phrase of Korobeiniki as (frequency, beats * 2)
const MELODY: [(f32, u64); 19] = [
    (E5, 2),
    (B4, 1),
    (C5, 1),
    (D5, 2),
    (C5, 1),
    (B4, 1),
    (A4, 2),
    (A4, 1),
    (C5, 1),
    (E5, 2),
    (D5, 1),
    (C5, 1),
    (B4, 3),
    (C5, 1),
    (D5, 2),
    (E5, 2),
    (C5, 2),
    (A4, 2),
    (A4, 4),
];

/// Tone sequence for each cue: (frequency, milliseconds)
fn cue_tones(cue: Cue) -> &'static [(f32, u64)] {
    match cue {
        Cue::Hit => &[(440.0, 50)],
        Cue::Point => &[(330.0, 90), (220.0, 160)],
        Cue::Win => &[(523.25, 120), (659.25, 120), (783.99, 260)],
        Cue::Lose => &[(392.0, 150), (311.13, 150), (196.0, 320)],
        Cue::Select => &[(660.0, 35)],
    }
}

fn tone(freq: f32, ms: u64, volume: f32) -> impl Source<Item = f32> + Send + 'static {
    SineWave::new(freq)
        .take_duration(Duration::from_millis(ms))
        .amplify(volume)
}

pub struct SoundOut {
    // Dropping the stream stops all output
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    music: Option<Sink>,
    next_note: usize,
}

impl SoundOut {
    /// Open the default output device, falling back to silence
    pub fn open() -> Self {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Self {
                _stream: Some(stream),
                handle: Some(handle),
                music: None,
                next_note: 0,
            },
            Err(err) => {
                tracing::warn!("No audio output available: {}", err);
                Self::muted()
            }
        }
    }

    pub fn muted() -> Self {
        Self {
            _stream: None,
            handle: None,
            music: None,
            next_note: 0,
        }
    }

    /// Handles are the cue discriminant; every cue is synthesized
    pub fn load(&self, cue: Cue) -> SoundHandle {
        SoundHandle(cue as u32)
    }

    pub fn play(&self, sound: SoundHandle) {
        let Some(handle) = &self.handle else {
            return;
        };
        let Some(cue) = cue_from_handle(sound) else {
            tracing::debug!("Unknown sound handle {:?}", sound);
            return;
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                for &(freq, ms) in cue_tones(cue) {
                    sink.append(tone(freq, ms, 0.2));
                }
                sink.detach();
            }
            Err(err) => tracing::warn!("Failed to play {}: {}", cue.name(), err),
        }
    }

    pub fn start_music(&mut self) {
        let Some(handle) = &self.handle else {
            return;
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                self.music = Some(sink);
                self.next_note = 0;
                self.pump_music();
            }
            Err(err) => tracing::warn!("Failed to start music: {}", err),
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }

    /// Keep a couple of notes queued so the melody loops without gaps
    pub fn pump_music(&mut self) {
        let Some(sink) = &self.music else {
            return;
        };
        while sink.len() < 2 {
            let (freq, halves) = MELODY[self.next_note];
            sink.append(tone(freq, BEAT * halves / 2, 0.06));
            self.next_note = (self.next_note + 1) % MELODY.len();
        }
    }
}

fn cue_from_handle(sound: SoundHandle) -> Option<Cue> {
    [Cue::Hit, Cue::Point, Cue::Win, Cue::Lose, Cue::Select]
        .into_iter()
        .find(|&cue| cue as u32 == sound.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_map_back_to_cues() {
        let out = SoundOut::muted();
        for cue in [Cue::Hit, Cue::Point, Cue::Win, Cue::Lose, Cue::Select] {
            assert_eq!(cue_from_handle(out.load(cue)), Some(cue));
        }
        assert_eq!(cue_from_handle(SoundHandle(99)), None);
    }

    #[test]
    fn test_muted_output_is_silent_noop() {
        let mut out = SoundOut::muted();
        out.start_music();
        out.play(SoundHandle(0));
        out.pump_music();
        out.stop_music();
        assert!(out.music.is_none());
    }
}
