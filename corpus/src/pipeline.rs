//! Per-speaker segmentation pipeline.
//!
//! For every speaker in the roster the pipeline combines the raw recordings
//! under `<input>/wav48/p<id>`, splits them at silences, packs the chunks
//! into segments and writes them to `<output>/p<id>/<n>.wav`. A speaker is
//! finished once its `.complete` marker exists; finished speakers are
//! skipped on later runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::combiner::combine;
use crate::error::{CorpusError, Result};
use crate::packer::{PackOptions, pack, save_segments};
use crate::progress;
use crate::roster::Roster;
use crate::splitter::{SplitOptions, split};

/// File written into a speaker's output directory once all its segments exist.
pub const COMPLETE_MARKER: &str = ".complete";

/// Directory under the corpus root holding the per-speaker recordings.
pub const INPUT_SUBDIR: &str = "wav48";

/// How an existing speaker output directory is treated on a rerun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumePolicy {
    /// Skip only speakers carrying the completion marker; redo the rest.
    #[default]
    Marker,
    /// Skip any speaker whose output directory exists.
    TrustExisting,
}

/// State of a speaker's output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerStatus {
    Complete,
    Partial,
    Missing,
}

/// Pipeline settings.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub split: SplitOptions,
    pub pack: PackOptions,
    pub resume: ResumePolicy,
    /// Draw a progress bar on stderr.
    pub progress: bool,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Speakers segmented during this run, in roster order.
    pub processed: Vec<u32>,
    /// Speakers left untouched because they were already done.
    pub skipped: Vec<u32>,
    /// Segments written during this run.
    pub segments: usize,
}

/// Inspects a speaker output directory.
pub fn speaker_status(dir: &Path) -> SpeakerStatus {
    if dir.join(COMPLETE_MARKER).is_file() {
        SpeakerStatus::Complete
    } else if dir.exists() {
        SpeakerStatus::Partial
    } else {
        SpeakerStatus::Missing
    }
}

/// Segments every speaker in `roster`.
///
/// Stops at the first error; speakers finished before it keep their output.
pub fn run(
    roster: &Roster,
    input_dir: &Path,
    output_dir: &Path,
    opts: &PipelineOptions,
) -> Result<PipelineReport> {
    let pb = progress::bar(roster.len() as u64, "speakers", opts.progress)?;
    let mut report = PipelineReport::default();

    for &id in roster.ids() {
        let out = output_dir.join(Roster::dir_name(id));
        pb.set_message(Roster::dir_name(id));

        let skip = match (speaker_status(&out), opts.resume) {
            (SpeakerStatus::Complete, _) => true,
            (SpeakerStatus::Partial, ResumePolicy::TrustExisting) => true,
            (SpeakerStatus::Partial, ResumePolicy::Marker) => {
                warn!(speaker = id, dir = %out.display(), "output incomplete, reprocessing");
                clear_segments(&out)?;
                false
            }
            (SpeakerStatus::Missing, _) => false,
        };

        if skip {
            info!(speaker = id, "already processed, skipping");
            report.skipped.push(id);
        } else {
            report.segments += process_speaker(id, input_dir, output_dir, opts)?;
            report.processed.push(id);
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(report)
}

/// Segments one speaker and marks its output complete.
///
/// Returns the number of segments written.
pub fn process_speaker(
    id: u32,
    input_dir: &Path,
    output_dir: &Path,
    opts: &PipelineOptions,
) -> Result<usize> {
    let src = input_dir.join(INPUT_SUBDIR).join(Roster::dir_name(id));
    let out = output_dir.join(Roster::dir_name(id));

    let audio = combine(&src)?;
    let chunks = split(&audio, &opts.split);
    drop(audio);

    let segments = pack(chunks, opts.pack.target_ms)?;
    if segments.is_empty() {
        warn!(speaker = id, src = %src.display(), "no speech found");
    }
    let written = save_segments(&segments, &out, opts.pack.export_format())?;

    let marker = out.join(COMPLETE_MARKER);
    fs::write(&marker, b"").map_err(|e| CorpusError::io(&marker, e))?;

    info!(speaker = id, segments = written.len(), "speaker done");
    Ok(written.len())
}

/// Removes segment files left behind by an interrupted run.
fn clear_segments(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| CorpusError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "wav") {
            fs::remove_file(&path).map_err(|e| CorpusError::io(&path, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_speaker_status() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("p225");
        assert_eq!(speaker_status(&out), SpeakerStatus::Missing);

        fs::create_dir(&out).unwrap();
        assert_eq!(speaker_status(&out), SpeakerStatus::Partial);

        fs::write(out.join(COMPLETE_MARKER), b"").unwrap();
        assert_eq!(speaker_status(&out), SpeakerStatus::Complete);
    }

    #[test]
    fn test_clear_segments_keeps_other_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1.wav"), b"x").unwrap();
        fs::write(dir.path().join("2.wav"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        clear_segments(dir.path()).unwrap();

        assert!(!dir.path().join("1.wav").exists());
        assert!(!dir.path().join("2.wav").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_resume_policy_serde_names() {
        let policy: ResumePolicy = serde_json::from_str("\"trust_existing\"").unwrap();
        assert_eq!(policy, ResumePolicy::TrustExisting);
        assert_eq!(ResumePolicy::default(), ResumePolicy::Marker);
    }
}
