//! In-memory PCM track.
//!
//! A [`Track`] owns interleaved 16-bit samples together with their [`Format`].
//! All time arithmetic is done in whole milliseconds: `len_ms` rounds the
//! frame count half-to-even and `slice_ms` maps milliseconds to frames by
//! truncation, so that chunk lengths and boundaries are stable across
//! sample rates.

use super::format::Format;
use crate::error::AudioError;
use crate::resampler;

/// Decoded audio held in memory.
///
/// A track created with [`Track::empty`] has no format until something is
/// appended to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    format: Option<Format>,
    samples: Vec<i16>,
}

impl Track {
    /// Creates a track with no format and no samples.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a track from interleaved samples.
    ///
    /// A trailing partial frame is dropped.
    pub fn new(format: Format, mut samples: Vec<i16>) -> Self {
        let channels = format.channels() as usize;
        samples.truncate(samples.len() - samples.len() % channels);
        Self {
            format: Some(format),
            samples,
        }
    }

    /// Returns the format, or `None` for a track that was never filled.
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// Returns the interleaved samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Returns the number of sample frames.
    pub fn frames(&self) -> usize {
        match self.format {
            Some(f) => self.samples.len() / f.channels() as usize,
            None => 0,
        }
    }

    /// Returns true if the track holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in milliseconds.
    pub fn len_ms(&self) -> u64 {
        match self.format {
            Some(f) => f.ms_in_frames(self.frames()),
            None => 0,
        }
    }

    /// Appends `other` to the end of this track.
    ///
    /// When the formats differ, both sides are converted to the wider of
    /// the two formats first.
    pub fn append(&mut self, other: &Track) -> Result<(), AudioError> {
        let Some(theirs) = other.format else {
            return Ok(());
        };
        let Some(ours) = self.format else {
            *self = other.clone();
            return Ok(());
        };

        if ours == theirs {
            self.samples.extend_from_slice(&other.samples);
            return Ok(());
        }

        let target = ours.widest(&theirs);
        if target != ours {
            *self = resampler::convert(self, target)?;
        }
        if target == theirs {
            self.samples.extend_from_slice(&other.samples);
        } else {
            let converted = resampler::convert(other, target)?;
            self.samples.extend_from_slice(&converted.samples);
        }
        Ok(())
    }

    /// Returns the sub-track between `start_ms` and `end_ms`.
    ///
    /// Bounds are clamped to the track length. If rounding makes the
    /// requested span longer than the available data, the tail is padded
    /// with silence.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> Track {
        let Some(format) = self.format else {
            return Track::empty();
        };
        let len = self.len_ms();
        let start_ms = start_ms.min(len);
        let end_ms = end_ms.min(len).max(start_ms);

        let channels = format.channels() as usize;
        let start = format.frames_in_ms(start_ms) * channels;
        let end = format.frames_in_ms(end_ms) * channels;

        let available = &self.samples[start.min(self.samples.len())..end.min(self.samples.len())];
        let mut samples = Vec::with_capacity(end - start);
        samples.extend_from_slice(available);
        samples.resize(end - start, 0);

        Track::new(format, samples)
    }

    /// Root mean square over all interleaved samples, truncated to an integer.
    pub fn rms(&self) -> u32 {
        rms_of(&self.samples)
    }

    /// Loudness relative to full scale. Silent or empty tracks are `-inf`.
    pub fn dbfs(&self) -> f64 {
        let rms = self.rms();
        if rms == 0 {
            return f64::NEG_INFINITY;
        }
        20.0 * (rms as f64 / Format::MAX_AMPLITUDE).log10()
    }

    /// Returns a mono copy, averaging the left and right channels.
    pub fn to_mono(&self) -> Track {
        match self.format {
            Some(f) if f.stereo => {
                let samples = self
                    .samples
                    .chunks_exact(2)
                    .map(|lr| ((lr[0] as i32 + lr[1] as i32) / 2) as i16)
                    .collect();
                Track::new(Format::mono(f.sample_rate), samples)
            }
            _ => self.clone(),
        }
    }

    /// Returns a stereo copy, duplicating mono samples into both channels.
    pub fn to_stereo(&self) -> Track {
        match self.format {
            Some(f) if !f.stereo => {
                let samples = self.samples.iter().flat_map(|&s| [s, s]).collect();
                Track::new(Format::stereo(f.sample_rate), samples)
            }
            _ => self.clone(),
        }
    }
}

/// Integer RMS of a sample slice, 0 when empty.
fn rms_of(samples: &[i16]) -> u32 {
    if samples.is_empty() {
        return 0;
    }
    let sum: u64 = samples.iter().map(|&s| (s as i64 * s as i64) as u64).sum();
    (sum as f64 / samples.len() as f64).sqrt() as u32
}
