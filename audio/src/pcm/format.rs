//! PCM audio format definitions.
//!
//! Re-exports `Format` from the resampler module and extends it with
//! track creation methods.

// Re-export Format from resampler module
pub use crate::resampler::format::Format;

/// Extension trait for Format that adds track creation methods.
pub trait FormatExt {
    /// Creates a silent track of the given duration in milliseconds.
    fn silence_track(&self, ms: u64) -> super::Track;

    /// Creates a track from interleaved i16 samples.
    fn track_from_samples(&self, samples: &[i16]) -> super::Track;
}

impl FormatExt for Format {
    fn silence_track(&self, ms: u64) -> super::Track {
        let len = self.frames_in_ms(ms) * self.channels() as usize;
        super::Track::new(*self, vec![0i16; len])
    }

    #[inline]
    fn track_from_samples(&self, samples: &[i16]) -> super::Track {
        super::Track::new(*self, samples.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_track() {
        let track = Format::MONO_16K.silence_track(100);
        assert_eq!(track.frames(), 1600);
        assert_eq!(track.len_ms(), 100);
        assert!(track.samples().iter().all(|&s| s == 0));

        let stereo = Format::STEREO_48K.silence_track(10);
        assert_eq!(stereo.samples().len(), 960);
    }

    #[test]
    fn test_track_from_samples() {
        let track = Format::MONO_24K.track_from_samples(&[1000, -1000]);
        assert_eq!(track.format(), Some(Format::MONO_24K));
        assert_eq!(track.samples(), &[1000, -1000]);
    }
}
