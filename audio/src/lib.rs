//! Audio processing utilities for corpus preparation.
//!
//! - `pcm`: 16-bit PCM format and in-memory tracks
//! - `wav`: WAV decoding and encoding
//! - `resampler`: sample rate and channel conversion
//! - `silence`: energy-based silence detection and splitting
//!
//! # Example
//!
//! ```rust
//! use voxprep_audio::pcm::{Format, FormatExt, Track};
//! use voxprep_audio::silence::{SilenceOptions, split_on_silence};
//!
//! let mut track = Track::empty();
//! track.append(&Format::MONO_16K.track_from_samples(&[8000; 4800])).unwrap();
//! track.append(&Format::MONO_16K.silence_track(500)).unwrap();
//! track.append(&Format::MONO_16K.track_from_samples(&[8000; 4800])).unwrap();
//!
//! let opts = SilenceOptions::default()
//!     .with_min_silence_ms(100)
//!     .with_threshold(track.dbfs() - 16.0);
//! let chunks = split_on_silence(&track, &opts);
//! assert_eq!(chunks.len(), 2);
//! ```

mod error;
pub mod pcm;
pub mod resampler;
pub mod silence;
pub mod wav;

pub use error::AudioError;
pub use pcm::{Format, Track};
