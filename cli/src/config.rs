//! Preparation settings.
//!
//! Settings come from three layers: built-in defaults, an optional YAML or
//! JSON file, and command-line flags. Each layer overrides the one before.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxprep_corpus::{
    ManifestOptions, PackOptions, PipelineOptions, ResumePolicy, Roster, SplitOptions,
};

/// Error type for config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("failed to parse file (tried YAML and JSON)")]
    ParseFailed,
}

/// Everything a preparation run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// Root that `input` and `output` are resolved against.
    pub base_dir: PathBuf,
    /// Corpus folder; recordings live under `<input>/wav48/p<id>`.
    pub input: PathBuf,
    /// Segment folder; segments go to `<output>/p<id>/<n>.wav`.
    pub output: PathBuf,
    /// Sample rate of the exported segments.
    pub sampling_rate: u32,
    /// Speakers to process; position in the list is the label.
    pub speakers: Roster,
    /// Target segment length.
    pub segment_ms: u64,
    pub split: SplitOptions,
    pub manifest: ManifestOptions,
    pub resume: ResumePolicy,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./"),
            input: PathBuf::from("VCTK-Corpus"),
            output: PathBuf::from("Data"),
            sampling_rate: 24000,
            speakers: Roster::vctk(),
            segment_ms: 5000,
            split: SplitOptions::default(),
            manifest: ManifestOptions::default(),
            resume: ResumePolicy::Marker,
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_dir: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub sampling_rate: Option<u32>,
    pub seed: Option<u64>,
    pub split_fraction: Option<f64>,
    pub trust_existing: bool,
}

impl PrepConfig {
    /// Applies command-line values on top of this config.
    pub fn apply(&mut self, o: Overrides) {
        if let Some(v) = o.base_dir {
            self.base_dir = v;
        }
        if let Some(v) = o.input {
            self.input = v;
        }
        if let Some(v) = o.output {
            self.output = v;
        }
        if let Some(v) = o.sampling_rate {
            self.sampling_rate = v;
        }
        if let Some(v) = o.seed {
            self.manifest.seed = v;
        }
        if let Some(v) = o.split_fraction {
            self.manifest.split_fraction = v;
        }
        if o.trust_existing {
            self.resume = ResumePolicy::TrustExisting;
        }
    }

    pub fn input_dir(&self) -> PathBuf {
        self.base_dir.join(&self.input)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(&self.output)
    }

    /// Pipeline settings derived from this config.
    pub fn pipeline_options(&self, progress: bool) -> PipelineOptions {
        PipelineOptions {
            split: self.split,
            pack: PackOptions {
                target_ms: self.segment_ms,
                sampling_rate: self.sampling_rate,
            },
            resume: self.resume,
            progress,
        }
    }

    /// Manifest settings derived from this config.
    pub fn manifest_options(&self, progress: bool) -> ManifestOptions {
        ManifestOptions {
            progress,
            ..self.manifest.clone()
        }
    }
}

/// Loads a config from a YAML or JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<PrepConfig, ConfigError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&data, path)
}

/// Parses config data based on file extension or content.
pub fn parse_config<T: DeserializeOwned>(data: &[u8], path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_slice(data)?),
        Some("json") => Ok(serde_json::from_slice(data)?),
        _ => {
            // Try YAML first, then JSON
            if let Ok(v) = serde_yaml::from_slice(data) {
                return Ok(v);
            }
            if let Ok(v) = serde_json::from_slice(data) {
                return Ok(v);
            }
            Err(ConfigError::ParseFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let cfg = PrepConfig::default();
        assert_eq!(cfg.input_dir(), Path::new("./VCTK-Corpus"));
        assert_eq!(cfg.output_dir(), Path::new("./Data"));
        assert_eq!(cfg.sampling_rate, 24000);
        assert_eq!(cfg.speakers.len(), 109);
        assert_eq!(cfg.manifest.seed, 1234);
        assert_eq!(cfg.manifest.split_fraction, 0.1);
    }

    #[test]
    fn test_load_yaml_partial() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "output: Segments\nsampling_rate: 16000\nspeakers: [225, 226]\nsplit:\n  min_silence_ms: 200\nresume: trust_existing"
        )
        .unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.output, PathBuf::from("Segments"));
        assert_eq!(cfg.input, PathBuf::from("VCTK-Corpus"));
        assert_eq!(cfg.sampling_rate, 16000);
        assert_eq!(cfg.speakers.ids(), &[225, 226]);
        assert_eq!(cfg.split.min_silence_ms, 200);
        assert_eq!(cfg.split.keep_silence_ms, 100);
        assert_eq!(cfg.resume, ResumePolicy::TrustExisting);
    }

    #[test]
    fn test_load_json() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, r#"{{"manifest": {{"seed": 7, "split_fraction": 0.2}}}}"#).unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.manifest.seed, 7);
        assert_eq!(cfg.manifest.split_fraction, 0.2);
        assert_eq!(cfg.manifest.train_file, "train_list.txt");
    }

    #[test]
    fn test_duplicate_speakers_rejected() {
        let result: Result<PrepConfig, _> = parse_config(b"speakers: [225, 225]", "cfg.yaml");
        assert!(matches!(result, Err(ConfigError::ParseYaml(_))));
    }

    #[test]
    fn test_parse_invalid() {
        let result: Result<PrepConfig, _> = parse_config(b"invalid data {{{{", "file.txt");
        assert!(matches!(result, Err(ConfigError::ParseFailed)));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/voxprep.yaml");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_overrides_win() {
        let mut cfg = PrepConfig {
            sampling_rate: 16000,
            ..Default::default()
        };
        cfg.apply(Overrides {
            base_dir: Some(PathBuf::from("/data")),
            sampling_rate: Some(22050),
            seed: Some(5),
            trust_existing: true,
            ..Default::default()
        });

        assert_eq!(cfg.input_dir(), Path::new("/data/VCTK-Corpus"));
        assert_eq!(cfg.sampling_rate, 22050);
        assert_eq!(cfg.manifest.seed, 5);
        assert_eq!(cfg.manifest.split_fraction, 0.1);
        assert_eq!(cfg.resume, ResumePolicy::TrustExisting);

        let opts = cfg.pipeline_options(false);
        assert_eq!(opts.pack.sampling_rate, 22050);
        assert_eq!(opts.pack.target_ms, 5000);
    }
}
