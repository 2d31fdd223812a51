//! PCM (Pulse Code Modulation) audio handling.
//!
//! # Key Types
//!
//! - [`Format`]: sample rate and channel layout of 16-bit audio
//! - [`Track`]: decoded audio held in memory, with millisecond slicing,
//!   concatenation and loudness measurement
//!
//! # Example
//!
//! ```rust
//! use voxprep_audio::pcm::{Format, FormatExt, Track};
//!
//! let mut track = Track::empty();
//! track.append(&Format::MONO_48K.silence_track(100)).unwrap();
//! track.append(&Format::MONO_48K.track_from_samples(&[1000; 4800])).unwrap();
//! assert_eq!(track.len_ms(), 200);
//! ```

mod format;
mod track;

pub use format::{Format, FormatExt};
pub use track::Track;
