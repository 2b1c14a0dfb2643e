//! Audio Module
//!
//! Procedurally synthesized sound effects played through rodio. No audio
//! files: the balloon pop is a short pitch-sweep generated sample by sample.
//! If no output device exists the whole module degrades to silence.

use std::time::Duration;

use log::warn;
use rodio::{OutputStream, OutputStreamHandle, Source};

const SAMPLE_RATE: u32 = 44_100;
/// Pop length in seconds.
const POP_DURATION: f32 = 0.12;
/// Amplitude decay constant; higher dies faster.
const POP_DECAY: f32 = 32.0;

/// A synthesized balloon pop: a sine sweep from bright to low with an
/// exponential decay envelope.
pub struct PopSource {
    sample: u32,
    total: u32,
    phase: f32,
    pitch: f32,
}

impl PopSource {
    /// `pitch` scales the sweep; 1.0 is the standard pop, higher is brighter.
    pub fn new(pitch: f32) -> Self {
        Self {
            sample: 0,
            total: (POP_DURATION * SAMPLE_RATE as f32) as u32,
            phase: 0.0,
            pitch: pitch.clamp(0.5, 2.0),
        }
    }
}

impl Iterator for PopSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.sample >= self.total {
            return None;
        }
        let t = self.sample as f32 / SAMPLE_RATE as f32;
        let progress = self.sample as f32 / self.total as f32;

        // Frequency sweeps down as the balloon lets go
        let freq = self.pitch * (620.0 - 440.0 * progress);
        self.phase = (self.phase + freq / SAMPLE_RATE as f32).fract();

        let envelope = (-t * POP_DECAY).exp();
        self.sample += 1;
        Some((self.phase * std::f32::consts::TAU).sin() * envelope * 0.6)
    }
}

impl Source for PopSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total - self.sample) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(POP_DURATION))
    }
}

/// Handle to the audio output device.
///
/// Keeps the rodio stream alive for the life of the app; dropped streams go
/// silent immediately.
pub struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    /// Open the default output device. Returns `None` (and logs a warning)
    /// on platforms without one; callers simply skip playback.
    pub fn init() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
            }),
            Err(err) => {
                warn!("audio unavailable, continuing silent: {err}");
                None
            }
        }
    }

    /// Fire-and-forget a pop. Playback errors are ignored; a dropped sound
    /// never interrupts gameplay.
    pub fn play_pop(&self, pitch: f32) {
        let _ = self.handle.play_raw(PopSource::new(pitch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_sample_count_matches_duration() {
        let samples: Vec<f32> = PopSource::new(1.0).collect();
        assert_eq!(samples.len(), (POP_DURATION * SAMPLE_RATE as f32) as usize);
    }

    #[test]
    fn test_pop_samples_bounded() {
        for sample in PopSource::new(2.0) {
            assert!(sample.abs() <= 1.0);
        }
    }

    #[test]
    fn test_pop_envelope_decays() {
        let samples: Vec<f32> = PopSource::new(1.0).collect();
        let head: f32 = samples[..400].iter().map(|s| s.abs()).fold(0.0, f32::max);
        let tail: f32 = samples[samples.len() - 400..]
            .iter()
            .map(|s| s.abs())
            .fold(0.0, f32::max);
        assert!(head > tail * 4.0, "pop should decay: head {head}, tail {tail}");
    }

    #[test]
    fn test_pitch_is_clamped() {
        let source = PopSource::new(100.0);
        assert!(source.pitch <= 2.0);
    }
}
