//! Splits a combined speaker track into chunks at silences.

use serde::{Deserialize, Serialize};
use tracing::debug;
use voxprep_audio::Track;
use voxprep_audio::silence::{SilenceOptions, split_on_silence};

/// Silence detection settings relative to the track's own loudness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Shortest pause that separates two chunks.
    pub min_silence_ms: u64,
    /// Silence threshold in dB below the track's average loudness.
    pub threshold_offset_db: f64,
    /// Silence kept around each chunk.
    pub keep_silence_ms: u64,
    /// Resolution of the silence search.
    pub seek_step_ms: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            min_silence_ms: 100,
            threshold_offset_db: 16.0,
            keep_silence_ms: 100,
            seek_step_ms: 1,
        }
    }
}

impl SplitOptions {
    /// Resolves the silence options for a track with the given loudness.
    pub fn silence_options(&self, dbfs: f64) -> SilenceOptions {
        SilenceOptions {
            min_silence_ms: self.min_silence_ms,
            silence_thresh_dbfs: dbfs - self.threshold_offset_db,
            keep_silence_ms: self.keep_silence_ms,
            seek_step_ms: self.seek_step_ms,
        }
    }
}

/// Splits `track` into chunks separated by silence, in source order.
pub fn split(track: &Track, opts: &SplitOptions) -> Vec<Track> {
    let dbfs = track.dbfs();
    let silence = opts.silence_options(dbfs);
    let chunks = split_on_silence(track, &silence);
    debug!(
        dbfs,
        threshold = silence.silence_thresh_dbfs,
        chunks = chunks.len(),
        "split track"
    );
    chunks
}
