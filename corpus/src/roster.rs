//! Speaker roster.
//!
//! The roster fixes which speakers are processed and which label each one
//! gets: a speaker's label is its zero-based position in the roster, not its
//! numeric ID.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, Result};

/// The VCTK speakers, in the order that assigns their labels.
pub const VCTK_SPEAKERS: [u32; 109] = [
    225, 234, 245, 254, 263, 272, 281, 293, 303, 313, 330, 345, 376, //
    226, 236, 246, 255, 264, 273, 282, 294, 304, 314, 333, 347, //
    227, 237, 247, 256, 265, 274, 283, 295, 305, 315, 334, 351, //
    228, 238, 248, 257, 266, 275, 284, 297, 306, 316, 335, 360, //
    229, 239, 249, 258, 267, 276, 285, 298, 307, 317, 336, 361, //
    230, 240, 250, 259, 268, 277, 286, 299, 308, 318, 339, 362, //
    231, 241, 251, 260, 269, 278, 287, 300, 310, 323, 340, 363, //
    232, 243, 252, 261, 270, 279, 288, 301, 311, 326, 341, 364, //
    233, 244, 253, 262, 271, 280, 292, 302, 312, 329, 343, 374,
];

/// Directory name prefix for speaker folders.
const DIR_PREFIX: char = 'p';

/// An ordered list of distinct speaker IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Roster {
    ids: Vec<u32>,
}

impl Roster {
    /// Creates a roster, rejecting duplicate IDs.
    pub fn new(ids: Vec<u32>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in &ids {
            if !seen.insert(id) {
                return Err(CorpusError::DuplicateSpeaker(id));
            }
        }
        Ok(Self { ids })
    }

    /// The full VCTK roster.
    pub fn vctk() -> Self {
        Self {
            ids: VCTK_SPEAKERS.to_vec(),
        }
    }

    /// Returns the speaker IDs in label order.
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Number of speakers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no speaker is listed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the zero-based label of `id`, or `None` if it is not listed.
    pub fn label(&self, id: u32) -> Option<usize> {
        self.ids.iter().position(|&s| s == id)
    }

    /// Returns the folder name for a speaker, e.g. `p225`.
    pub fn dir_name(id: u32) -> String {
        format!("{DIR_PREFIX}{id}")
    }

    /// Parses a speaker folder name back into an ID.
    ///
    /// The leading `p` is optional.
    pub fn parse_dir_name(name: &str) -> Option<u32> {
        name.strip_prefix(DIR_PREFIX).unwrap_or(name).parse().ok()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::vctk()
    }
}

impl TryFrom<Vec<u32>> for Roster {
    type Error = CorpusError;

    fn try_from(ids: Vec<u32>) -> Result<Self> {
        Self::new(ids)
    }
}

impl From<Roster> for Vec<u32> {
    fn from(roster: Roster) -> Self {
        roster.ids
    }
}
