//! Packs silence-delimited chunks into fixed-length segments and exports them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use voxprep_audio::resampler::convert;
use voxprep_audio::wav::write_wav;
use voxprep_audio::{Format, Track};

use crate::error::{CorpusError, Result};

/// Segment length and export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackOptions {
    /// A segment stops taking chunks once it is at least this long.
    pub target_ms: u64,
    /// Sample rate of the exported segments.
    pub sampling_rate: u32,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            target_ms: 5000,
            sampling_rate: 24000,
        }
    }
}

impl PackOptions {
    /// Segments are always exported as mono.
    pub fn export_format(&self) -> Format {
        Format::mono(self.sampling_rate)
    }
}

/// Greedily merges adjacent chunks into segments.
///
/// The first chunk seeds the first segment. Each later chunk is appended to
/// the current segment while that segment is shorter than `target_ms`, and
/// starts a new segment otherwise. The length check happens before the
/// append, so a segment may overshoot the target by up to one chunk.
pub fn pack(chunks: Vec<Track>, target_ms: u64) -> Result<Vec<Track>> {
    let mut segments: Vec<Track> = Vec::new();
    for chunk in chunks {
        match segments.last_mut() {
            Some(current) if current.len_ms() < target_ms => current.append(&chunk)?,
            _ => segments.push(chunk),
        }
    }
    Ok(segments)
}

/// Writes `segments` to `dir` as `1.wav`, `2.wav`, ... in `format`.
///
/// Creates `dir` if needed and returns the written paths in order.
pub fn save_segments(segments: &[Track], dir: &Path, format: Format) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| CorpusError::io(dir, e))?;

    let mut written = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let out = convert(segment, format)?;
        let path = dir.join(format!("{}.wav", i + 1));
        write_wav(&path, &out)?;
        debug!(path = %path.display(), len_ms = out.len_ms(), "wrote segment");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use voxprep_audio::pcm::FormatExt;
    use voxprep_audio::wav::read_wav;

    fn chunks(fmt: Format, lens: &[u64]) -> Vec<Track> {
        lens.iter().map(|&ms| fmt.silence_track(ms)).collect()
    }

    fn lens(tracks: &[Track]) -> Vec<u64> {
        tracks.iter().map(Track::len_ms).collect()
    }

    #[test]
    fn test_long_chunks_are_not_merged() {
        let fmt = Format::mono(1000);
        let segments = pack(chunks(fmt, &[5000, 6000, 5000]), 5000).unwrap();
        assert_eq!(lens(&segments), vec![5000, 6000, 5000]);
    }

    #[test]
    fn test_equal_parts_merge_into_one_segment() {
        let fmt = Format::mono(1000);
        let segments = pack(chunks(fmt, &[1000; 5]), 5000).unwrap();
        assert_eq!(lens(&segments), vec![5000]);
    }

    #[test]
    fn test_segment_may_overshoot_target() {
        let fmt = Format::mono(1000);
        let segments = pack(chunks(fmt, &[4000, 3000, 1000, 200]), 5000).unwrap();
        assert_eq!(lens(&segments), vec![7000, 1200]);
    }

    #[test]
    fn test_short_first_chunk_seeds_segment() {
        let fmt = Format::mono(1000);
        let segments = pack(chunks(fmt, &[10, 9000, 9000]), 5000).unwrap();
        assert_eq!(lens(&segments), vec![9010, 9000]);
    }

    #[test]
    fn test_pack_nothing() {
        assert!(pack(Vec::new(), 5000).unwrap().is_empty());
    }

    #[test]
    fn test_save_segments_exports_mono_at_rate() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("p225");
        let segments = chunks(Format::STEREO_48K, &[300, 200]);

        let opts = PackOptions {
            sampling_rate: 16000,
            ..Default::default()
        };
        let written = save_segments(&segments, &out, opts.export_format()).unwrap();
        assert_eq!(written, vec![out.join("1.wav"), out.join("2.wav")]);

        for (path, ms) in written.iter().zip([300, 200]) {
            let spec = hound::WavReader::open(path).unwrap().spec();
            assert_eq!(spec.channels, 1);
            assert_eq!(spec.sample_rate, 16000);
            assert_eq!(read_wav(path).unwrap().len_ms(), ms);
        }
    }
}
