//! WAV file decoding and encoding.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::AudioError;
use crate::pcm::{Format, Track};

/// Decodes a PCM WAV file into a 16-bit track.
///
/// Integer samples of any depth up to 32 bits and 32-bit float samples are
/// rescaled to 16 bits.
pub fn read_wav(path: impl AsRef<Path>) -> Result<Track, AudioError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let format = match spec.channels {
        1 => Format::mono(spec.sample_rate),
        2 => Format::stereo(spec.sample_rate),
        n => return Err(AudioError::UnsupportedChannels(n)),
    };

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, bits @ 1..=32) => {
            let shift = bits as i32 - 16;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| rescale(v, shift)))
                .collect::<Result<Vec<_>, _>>()?
        }
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * 32767.0).round() as i16))
            .collect::<Result<Vec<_>, _>>()?,
        (_, bits) => return Err(AudioError::UnsupportedBitDepth(bits)),
    };

    Ok(Track::new(format, samples))
}

/// Encodes a track as a 16-bit PCM WAV file.
pub fn write_wav(path: impl AsRef<Path>, track: &Track) -> Result<(), AudioError> {
    let format = track.format().ok_or(AudioError::EmptyTrack)?;
    let spec = WavSpec {
        channels: format.channels(),
        sample_rate: format.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in track.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Shifts a sample of arbitrary bit depth into 16-bit range.
fn rescale(value: i32, shift: i32) -> i16 {
    if shift >= 0 {
        (value >> shift) as i16
    } else {
        (value << -shift) as i16
    }
}
