//! Concatenates a speaker's recordings into one track.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use voxprep_audio::Track;
use voxprep_audio::wav::read_wav;

use crate::error::{CorpusError, Result};

/// Lists the `.wav` files directly under `dir`, sorted by file name.
pub fn list_wavs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
        let path = entry.path();
        let is_wav = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".wav"));
        if is_wav && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decodes every `.wav` file in `dir` and joins them in file-name order.
///
/// A directory without recordings yields an empty track.
pub fn combine(dir: &Path) -> Result<Track> {
    let files = list_wavs(dir)?;
    debug!(dir = %dir.display(), files = files.len(), "combining recordings");

    let mut track = Track::empty();
    for file in &files {
        let part = read_wav(file)?;
        track.append(&part)?;
    }
    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use voxprep_audio::Format;
    use voxprep_audio::pcm::FormatExt;
    use voxprep_audio::wav::write_wav;

    #[test]
    fn test_combine_in_name_order() {
        let dir = tempdir().unwrap();
        let fmt = Format::mono(1000);
        write_wav(dir.path().join("b.wav"), &fmt.track_from_samples(&[2, 2])).unwrap();
        write_wav(dir.path().join("a.wav"), &fmt.track_from_samples(&[1])).unwrap();
        write_wav(dir.path().join("c.wav"), &fmt.track_from_samples(&[3, 3, 3])).unwrap();
        fs::write(dir.path().join("notes.txt"), "not audio").unwrap();
        fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let track = combine(dir.path()).unwrap();
        assert_eq!(track.samples(), &[1, 2, 2, 3, 3, 3]);
        assert_eq!(track.format(), Some(fmt));
    }

    #[test]
    fn test_combine_empty_dir() {
        let dir = tempdir().unwrap();
        let track = combine(dir.path()).unwrap();
        assert!(track.is_empty());
        assert_eq!(track.format(), None);
    }

    #[test]
    fn test_missing_dir_reports_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("wav48").join("p999");
        match combine(&missing) {
            Err(CorpusError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
