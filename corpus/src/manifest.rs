//! Train/validation manifests.
//!
//! Every segment under the output tree whose speaker is on the roster
//! becomes one `path|label` line. The entries are shuffled with a seeded
//! generator, the first `round(total * split_fraction)` go to the
//! validation list and the rest to the training list.

use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{CorpusError, Result};
use crate::progress;
use crate::roster::Roster;

/// Manifest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestOptions {
    /// Share of entries that go to the validation list.
    pub split_fraction: f64,
    /// Seed for the shuffle; the same seed gives the same lists.
    pub seed: u64,
    /// Training list file name, relative to the output directory.
    pub train_file: String,
    /// Validation list file name, relative to the output directory.
    pub val_file: String,
    /// Draw a progress spinner while walking the output tree.
    #[serde(skip)]
    pub progress: bool,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            split_fraction: 0.1,
            seed: 1234,
            train_file: "train_list.txt".to_string(),
            val_file: "val_list.txt".to_string(),
            progress: false,
        }
    }
}

/// One manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    /// Zero-based roster position of the speaker.
    pub label: usize,
}

impl Entry {
    /// Formats the entry as `path|label`.
    pub fn line(&self) -> String {
        format!("{}|{}", self.path.display(), self.label)
    }
}

/// Outcome of a manifest build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestReport {
    pub train: usize,
    pub val: usize,
    pub train_path: PathBuf,
    pub val_path: PathBuf,
}

/// Collects an entry for every `.wav` file whose parent folder names a
/// roster speaker, in walk order.
///
/// A `.wav` file whose parent folder is not named `p<id>` is an error.
pub fn collect_entries(output_dir: &Path, roster: &Roster, show_progress: bool) -> Result<Vec<Entry>> {
    let pb = progress::spinner("scanning", show_progress)?;
    let mut entries = Vec::new();

    for entry in WalkDir::new(output_dir).sort_by_file_name() {
        let entry = entry?;
        pb.inc(1);
        if entry.file_type().is_dir() {
            continue;
        }
        let is_wav = entry.file_name().to_str().is_some_and(|n| n.ends_with(".wav"));
        if !is_wav {
            continue;
        }

        let parent = entry.path().parent().unwrap_or(output_dir);
        let id = parent
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(Roster::parse_dir_name)
            .ok_or_else(|| CorpusError::InvalidSpeakerDir(parent.to_path_buf()))?;

        if let Some(label) = roster.label(id) {
            entries.push(Entry {
                path: entry.into_path(),
                label,
            });
        }
    }

    pb.finish_and_clear();
    Ok(entries)
}

/// Shuffles `entries` in place with a generator seeded from `seed`.
pub fn shuffle(entries: &mut [Entry], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    entries.shuffle(&mut rng);
}

/// Number of validation entries for `total` entries, rounding half to even.
pub fn split_index(total: usize, fraction: f64) -> usize {
    ((total as f64 * fraction).round_ties_even() as usize).min(total)
}

/// Splits `entries` into `(train, val)`; validation takes the leading entries.
pub fn partition(mut entries: Vec<Entry>, fraction: f64) -> (Vec<Entry>, Vec<Entry>) {
    let idx = split_index(entries.len(), fraction);
    let train = entries.split_off(idx);
    (train, entries)
}

/// Writes entries one per line, each terminated by a newline.
pub fn write_manifest(path: &Path, entries: &[Entry]) -> Result<()> {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.line());
        out.push('\n');
    }
    fs::write(path, out).map_err(|e| CorpusError::io(path, e))?;
    debug!(path = %path.display(), entries = entries.len(), "wrote manifest");
    Ok(())
}

/// Builds and writes both manifests into `output_dir`.
pub fn build(output_dir: &Path, roster: &Roster, opts: &ManifestOptions) -> Result<ManifestReport> {
    if !(0.0..=1.0).contains(&opts.split_fraction) {
        return Err(CorpusError::InvalidSplit(opts.split_fraction));
    }

    let mut entries = collect_entries(output_dir, roster, opts.progress)?;
    shuffle(&mut entries, opts.seed);
    let (train, val) = partition(entries, opts.split_fraction);

    let train_path = output_dir.join(&opts.train_file);
    let val_path = output_dir.join(&opts.val_file);
    write_manifest(&train_path, &train)?;
    write_manifest(&val_path, &val)?;

    info!(train = train.len(), val = val.len(), seed = opts.seed, "manifests written");
    Ok(ManifestReport {
        train: train.len(),
        val: val.len(),
        train_path,
        val_path,
    })
}
