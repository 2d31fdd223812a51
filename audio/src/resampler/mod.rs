//! Audio resampling using rubato.
//!
//! # Example
//!
//! ```rust
//! use voxprep_audio::pcm::{Format, FormatExt};
//! use voxprep_audio::resampler;
//!
//! let track = Format::MONO_48K.silence_track(1000);
//! let out = resampler::convert(&track, Format::MONO_24K).unwrap();
//! assert_eq!(out.frames(), 24000);
//! ```

pub mod format;
mod rubato_impl;

pub use format::*;
pub use rubato_impl::{convert, resample};
