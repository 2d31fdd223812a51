//! Audio format shared by tracks and the resampler.

/// Describes a PCM audio format.
/// Samples are always 16-bit signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Sample rate in Hz (e.g., 24000, 48000).
    pub sample_rate: u32,
    /// True for stereo (2 channels), false for mono (1 channel).
    pub stereo: bool,
}

impl Format {
    /// Largest absolute sample value for 16-bit audio.
    pub const MAX_AMPLITUDE: f64 = 32768.0;

    /// Creates a new format with the given sample rate and mono audio.
    pub const fn mono(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: false }
    }

    /// Creates a new format with the given sample rate and stereo audio.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: true }
    }

    /// Returns the number of channels (1 for mono, 2 for stereo).
    pub fn channels(&self) -> u16 {
        if self.stereo { 2 } else { 1 }
    }

    /// Number of whole frames covering `ms` milliseconds (rounded down).
    pub fn frames_in_ms(&self, ms: u64) -> usize {
        (ms as u128 * self.sample_rate as u128 / 1000) as usize
    }

    /// Duration of `frames` frames in milliseconds, rounded half to even.
    pub fn ms_in_frames(&self, frames: usize) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (frames as f64 * 1000.0 / self.sample_rate as f64).round_ties_even() as u64
    }

    /// Returns the format both `self` and `other` can be losslessly widened to:
    /// the higher sample rate and the larger channel count.
    pub fn widest(&self, other: &Format) -> Format {
        Format {
            sample_rate: self.sample_rate.max(other.sample_rate),
            stereo: self.stereo || other.stereo,
        }
    }
}

// Common format presets
impl Format {
    /// 16kHz mono
    pub const MONO_16K: Format = Format::mono(16000);
    /// 24kHz mono, the default export format
    pub const MONO_24K: Format = Format::mono(24000);
    /// 48kHz mono, as recorded in VCTK's wav48 tree
    pub const MONO_48K: Format = Format::mono(48000);
    /// 48kHz stereo
    pub const STEREO_48K: Format = Format::stereo(48000);
}
