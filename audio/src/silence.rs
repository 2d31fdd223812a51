//! Energy-based silence detection.
//!
//! A window of `min_silence_ms` slides over the track in `seek_step_ms`
//! steps; a window is silent when its RMS is at or below the threshold
//! amplitude derived from `silence_thresh_dbfs`. Overlapping silent windows
//! merge into silent ranges, whose complement gives the nonsilent ranges
//! that [`split_on_silence`] cuts the track into.
//!
//! All positions are milliseconds from the start of the track.

use std::ops::Range;

use tracing::debug;

use crate::pcm::{Format, Track};

/// Parameters for silence detection and splitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceOptions {
    /// Shortest run of quiet audio that counts as silence.
    pub min_silence_ms: u64,
    /// Windows at or below this loudness (dBFS) are silent.
    pub silence_thresh_dbfs: f64,
    /// Silence kept on each side of a chunk when splitting.
    pub keep_silence_ms: u64,
    /// Distance between consecutive window starts.
    pub seek_step_ms: u64,
}

impl Default for SilenceOptions {
    fn default() -> Self {
        Self {
            min_silence_ms: 1000,
            silence_thresh_dbfs: -16.0,
            keep_silence_ms: 100,
            seek_step_ms: 1,
        }
    }
}

impl SilenceOptions {
    /// Builder-style setter for the minimum silence duration.
    pub fn with_min_silence_ms(mut self, ms: u64) -> Self {
        self.min_silence_ms = ms;
        self
    }

    /// Builder-style setter for the silence threshold.
    pub fn with_threshold(mut self, dbfs: f64) -> Self {
        self.silence_thresh_dbfs = dbfs;
        self
    }

    /// Builder-style setter for the silence kept around chunks.
    pub fn with_keep_silence_ms(mut self, ms: u64) -> Self {
        self.keep_silence_ms = ms;
        self
    }

    /// Builder-style setter for the window step.
    pub fn with_seek_step_ms(mut self, ms: u64) -> Self {
        self.seek_step_ms = ms;
        self
    }

    /// Threshold as a linear sample amplitude.
    pub fn threshold_amplitude(&self) -> f64 {
        10f64.powf(self.silence_thresh_dbfs / 20.0) * Format::MAX_AMPLITUDE
    }
}

/// Sum of squared samples at every millisecond boundary of a track.
///
/// `energy[m]` covers the frames before millisecond `m`, so the energy of
/// any millisecond-aligned window is a difference of two entries.
struct EnergyIndex {
    energy: Vec<u64>,
    format: Format,
}

impl EnergyIndex {
    fn new(track: &Track, format: Format) -> Self {
        let channels = format.channels() as usize;
        let samples = track.samples();
        let len_ms = track.len_ms();

        let mut energy = Vec::with_capacity(len_ms as usize + 1);
        let mut acc = 0u64;
        let mut pos = 0usize;
        for ms in 0..=len_ms {
            let end = (format.frames_in_ms(ms) * channels).min(samples.len());
            for &s in &samples[pos.min(end)..end] {
                acc += (s as i64 * s as i64) as u64;
            }
            pos = pos.max(end);
            energy.push(acc);
        }
        Self { energy, format }
    }

    /// Integer RMS of the window `[start, end)`, counting any frames past the
    /// end of the data as silence.
    fn rms(&self, start: u64, end: u64) -> u32 {
        let channels = self.format.channels() as usize;
        let n = (self.format.frames_in_ms(end) - self.format.frames_in_ms(start)) * channels;
        if n == 0 {
            return 0;
        }
        let sum = self.energy[end as usize] - self.energy[start as usize];
        (sum as f64 / n as f64).sqrt() as u32
    }
}

/// Returns the silent ranges of `track`, in order.
///
/// A track shorter than `min_silence_ms` has no silence.
pub fn detect_silence(track: &Track, opts: &SilenceOptions) -> Vec<Range<u64>> {
    let Some(format) = track.format() else {
        return Vec::new();
    };
    let seg_len = track.len_ms();
    let window = opts.min_silence_ms;
    if seg_len < window {
        return Vec::new();
    }

    let threshold = opts.threshold_amplitude();
    let step = opts.seek_step_ms.max(1);
    let last_start = seg_len - window;

    let index = EnergyIndex::new(track, format);
    let is_silent = |start: u64| index.rms(start, start + window) as f64 <= threshold;

    let mut starts: Vec<u64> = (0..=last_start).step_by(step as usize).collect();
    if last_start % step != 0 {
        starts.push(last_start);
    }
    let silent_starts: Vec<u64> = starts.into_iter().filter(|&i| is_silent(i)).collect();

    let Some((&first, rest)) = silent_starts.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut range_start = first;
    let mut prev = first;
    for &start in rest {
        let continuous = start == prev + step;
        let has_gap = start > prev + window;
        if !continuous && has_gap {
            ranges.push(range_start..prev + window);
            range_start = start;
        }
        prev = start;
    }
    ranges.push(range_start..prev + window);

    ranges
}

/// Returns the nonsilent ranges of `track`, in order.
///
/// A track without silence is one range spanning it; a track that is
/// silent end to end, or was never filled, has none.
pub fn detect_nonsilent(track: &Track, opts: &SilenceOptions) -> Vec<Range<u64>> {
    if track.format().is_none() {
        return Vec::new();
    }
    let seg_len = track.len_ms();
    let silent = detect_silence(track, opts);

    let Some(last) = silent.last() else {
        return vec![0..seg_len];
    };
    if silent[0].start == 0 && silent[0].end == seg_len {
        return Vec::new();
    }

    let mut ranges = Vec::with_capacity(silent.len() + 1);
    let mut prev_end = 0;
    for range in &silent {
        ranges.push(prev_end..range.start);
        prev_end = range.end;
    }
    if last.end != seg_len {
        ranges.push(prev_end..seg_len);
    }
    if ranges.first() == Some(&(0..0)) {
        ranges.remove(0);
    }
    ranges
}

/// Splits `track` on silence.
///
/// Each nonsilent range is widened by `keep_silence_ms` on both sides; when
/// two widened ranges overlap they are both cut at the midpoint of the
/// overlap. Chunks keep their order in the source track.
pub fn split_on_silence(track: &Track, opts: &SilenceOptions) -> Vec<Track> {
    let keep = opts.keep_silence_ms as i64;
    let mut ranges: Vec<(i64, i64)> = detect_nonsilent(track, opts)
        .into_iter()
        .map(|r| (r.start as i64 - keep, r.end as i64 + keep))
        .collect();

    for i in 1..ranges.len() {
        let last_end = ranges[i - 1].1;
        let next_start = ranges[i].0;
        if next_start < last_end {
            let mid = (last_end + next_start).div_euclid(2);
            ranges[i - 1].1 = mid;
            ranges[i].0 = mid;
        }
    }

    let seg_len = track.len_ms() as i64;
    debug!(chunks = ranges.len(), len_ms = seg_len, "split on silence");

    ranges
        .into_iter()
        .map(|(start, end)| track.slice_ms(start.max(0) as u64, end.min(seg_len).max(0) as u64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcm::FormatExt;

    const LOUD: i16 = 10000;

    /// Builds a 1kHz mono track from (is_loud, ms) runs so that one frame
    /// equals one millisecond.
    fn pattern(runs: &[(bool, usize)]) -> Track {
        let mut samples = Vec::new();
        for &(loud, ms) in runs {
            for i in 0..ms {
                let v = if !loud {
                    0
                } else if i % 2 == 0 {
                    LOUD
                } else {
                    -LOUD
                };
                samples.push(v);
            }
        }
        Format::mono(1000).track_from_samples(&samples)
    }

    fn opts() -> SilenceOptions {
        SilenceOptions::default()
            .with_min_silence_ms(100)
            .with_threshold(-40.0)
            .with_keep_silence_ms(0)
    }

    #[test]
    fn test_threshold_amplitude() {
        let o = SilenceOptions::default().with_threshold(-20.0);
        assert!((o.threshold_amplitude() - 3276.8).abs() < 1e-6);
        let o = SilenceOptions::default().with_threshold(f64::NEG_INFINITY);
        assert_eq!(o.threshold_amplitude(), 0.0);
    }

    #[test]
    fn test_detect_silence_middle_gap() {
        let track = pattern(&[(true, 300), (false, 200), (true, 300)]);
        assert_eq!(detect_silence(&track, &opts()), vec![300..500]);
        assert_eq!(detect_nonsilent(&track, &opts()), vec![0..300, 500..800]);
    }

    #[test]
    fn test_short_gap_is_not_silence() {
        let track = pattern(&[(true, 300), (false, 99), (true, 300)]);
        assert!(detect_silence(&track, &opts()).is_empty());
        assert_eq!(detect_nonsilent(&track, &opts()), vec![0..699]);
    }

    #[test]
    fn test_track_shorter_than_window() {
        let track = pattern(&[(false, 50)]);
        assert!(detect_silence(&track, &opts()).is_empty());
        assert_eq!(detect_nonsilent(&track, &opts()), vec![0..50]);
    }

    #[test]
    fn test_all_silent_has_no_chunks() {
        let track = pattern(&[(false, 1000)]);
        assert_eq!(detect_silence(&track, &opts()), vec![0..1000]);
        assert!(detect_nonsilent(&track, &opts()).is_empty());
        assert!(split_on_silence(&track, &opts()).is_empty());
    }

    #[test]
    fn test_leading_and_trailing_silence() {
        let track = pattern(&[(false, 200), (true, 300), (false, 200)]);
        assert_eq!(detect_silence(&track, &opts()), vec![0..200, 500..700]);
        assert_eq!(detect_nonsilent(&track, &opts()), vec![200..500]);
    }

    #[test]
    fn test_separate_silences_stay_separate() {
        let track = pattern(&[
            (true, 100),
            (false, 150),
            (true, 200),
            (false, 150),
            (true, 100),
        ]);
        assert_eq!(detect_silence(&track, &opts()), vec![100..250, 450..600]);
    }

    #[test]
    fn test_seek_step_includes_last_window() {
        let track = pattern(&[(true, 205), (false, 100)]);
        let o = opts().with_seek_step_ms(10);
        // Starts 0, 10, .., 200 plus the final start 205.
        assert_eq!(detect_silence(&track, &o), vec![205..305]);
    }

    #[test]
    fn test_split_keeps_silence_padding() {
        let track = pattern(&[(true, 300), (false, 400), (true, 300)]);
        let chunks = split_on_silence(&track, &opts().with_keep_silence_ms(100));
        let lens: Vec<u64> = chunks.iter().map(Track::len_ms).collect();
        // [0, 400] and [600, 1000]
        assert_eq!(lens, vec![400, 400]);
        assert_eq!(chunks[0].samples()[0], LOUD);
        assert_eq!(chunks[1].samples()[0], 0);
    }

    #[test]
    fn test_split_overlapping_padding_meets_in_middle() {
        let track = pattern(&[(true, 300), (false, 200), (true, 300)]);
        let chunks = split_on_silence(&track, &opts().with_keep_silence_ms(150));
        // [-150, 450] and [350, 950] overlap; both cut at 400.
        let lens: Vec<u64> = chunks.iter().map(Track::len_ms).collect();
        assert_eq!(lens, vec![400, 400]);
    }

    #[test]
    fn test_split_without_silence_returns_whole_track() {
        let track = pattern(&[(true, 500)]);
        let chunks = split_on_silence(&track, &opts());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], track);
    }

    #[test]
    fn test_unfilled_track_has_no_chunks() {
        let track = Track::empty();
        assert!(detect_nonsilent(&track, &opts()).is_empty());
        assert!(split_on_silence(&track, &opts()).is_empty());
    }

    #[test]
    fn test_energy_index_matches_direct_rms() {
        let track = pattern(&[(true, 37), (false, 80), (true, 12)]);
        let format = track.format().unwrap();
        let index = EnergyIndex::new(&track, format);
        for (start, end) in [(0, 100), (20, 120), (37, 117), (29, 129)] {
            assert_eq!(index.rms(start, end), track.slice_ms(start, end).rms());
        }
    }
}
