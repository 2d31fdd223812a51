//! Multi-speaker corpus preparation.
//!
//! Turns a VCTK-style corpus (`<input>/wav48/p<id>/*.wav`) into fixed-length
//! mono segments (`<output>/p<id>/<n>.wav`) and writes train/validation
//! manifests that pair each segment with its speaker's roster label.
//!
//! - [`combiner`]: joins a speaker's recordings
//! - [`splitter`]: cuts the joined track at silences
//! - [`packer`]: merges chunks into segments and exports them
//! - [`pipeline`]: runs the three above for every roster speaker
//! - [`manifest`]: builds the shuffled train/validation lists
//! - [`roster`]: speaker IDs and their labels

pub mod combiner;
mod error;
pub mod manifest;
pub mod packer;
pub mod pipeline;
mod progress;
pub mod roster;
pub mod splitter;

pub use error::{CorpusError, Result};
pub use manifest::{ManifestOptions, ManifestReport};
pub use packer::PackOptions;
pub use pipeline::{PipelineOptions, PipelineReport, ResumePolicy};
pub use roster::Roster;
pub use splitter::SplitOptions;
