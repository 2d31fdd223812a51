//! Rubato-based resampler implementation.
//!
//! Whole-track sample rate conversion using rubato's FFT resampler, a pure
//! Rust implementation without any FFI dependencies.

use rubato::{FftFixedInOut, Resampler as RubatoResampler};
use tracing::trace;

use super::format::Format;
use crate::error::AudioError;
use crate::pcm::Track;

/// Number of frames per processing block handed to rubato.
const CHUNK_SIZE: usize = 1024;

/// Resamples `track` to `dst_rate`, keeping its channel layout.
///
/// The output holds `ceil(frames * dst_rate / src_rate)` frames; the
/// resampler's internal delay is trimmed from the front and the tail is
/// flushed with zero padding.
pub fn resample(track: &Track, dst_rate: u32) -> Result<Track, AudioError> {
    let src_fmt = track.format().ok_or(AudioError::EmptyTrack)?;
    if src_fmt.sample_rate == dst_rate {
        return Ok(track.clone());
    }
    if dst_rate == 0 || src_fmt.sample_rate == 0 {
        return Err(AudioError::Resample(format!(
            "invalid rate conversion {} -> {}",
            src_fmt.sample_rate, dst_rate
        )));
    }

    let dst_fmt = Format {
        sample_rate: dst_rate,
        stereo: src_fmt.stereo,
    };
    let frames = track.frames();
    if frames == 0 {
        return Ok(Track::new(dst_fmt, Vec::new()));
    }

    let num_channels = src_fmt.channels() as usize;
    let mut resampler = FftFixedInOut::<f32>::new(
        src_fmt.sample_rate as usize,
        dst_rate as usize,
        CHUNK_SIZE,
        num_channels,
    )?;

    let expected = (frames as u64 * dst_rate as u64).div_ceil(src_fmt.sample_rate as u64) as usize;
    let delay = resampler.output_delay();
    trace!(
        src = src_fmt.sample_rate,
        dst = dst_rate,
        frames,
        expected,
        delay,
        "resampling track"
    );

    // Convert i16 interleaved to f32 per-channel
    let mut planes: Vec<Vec<f32>> = vec![Vec::with_capacity(frames); num_channels];
    for frame in track.samples().chunks_exact(num_channels) {
        for (ch, &sample) in frame.iter().enumerate() {
            planes[ch].push(sample as f32 / 32768.0);
        }
    }

    let mut input_buf: Vec<Vec<f32>> = vec![Vec::new(); num_channels];
    let mut output_buf: Vec<Vec<f32>> = vec![Vec::with_capacity(expected + delay); num_channels];
    let mut pos = 0;

    while output_buf[0].len() < expected + delay {
        let frames_needed = resampler.input_frames_next();
        for (ch, input) in input_buf.iter_mut().enumerate() {
            input.clear();
            if pos < frames {
                let end = (pos + frames_needed).min(frames);
                input.extend_from_slice(&planes[ch][pos..end]);
            }
            // Pad input past the end of the track
            input.resize(frames_needed, 0.0);
        }
        pos += frames_needed;

        let processed = resampler.process(&input_buf, None)?;
        for (out, block) in output_buf.iter_mut().zip(processed) {
            out.extend_from_slice(&block);
        }
    }

    // Convert f32 per-channel back to i16 interleaved
    let mut samples = Vec::with_capacity(expected * num_channels);
    for frame in delay..delay + expected {
        for plane in &output_buf {
            let sample = (plane[frame] * 32768.0).round().clamp(-32768.0, 32767.0) as i16;
            samples.push(sample);
        }
    }

    Ok(Track::new(dst_fmt, samples))
}

/// Converts `track` to `dst_fmt`: sample rate first, then channel layout.
pub fn convert(track: &Track, dst_fmt: Format) -> Result<Track, AudioError> {
    let resampled = resample(track, dst_fmt.sample_rate)?;
    Ok(if dst_fmt.stereo {
        resampled.to_stereo()
    } else {
        resampled.to_mono()
    })
}
