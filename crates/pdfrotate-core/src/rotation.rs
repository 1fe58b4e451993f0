//! Page rotation values and the per-page rotation map

use crate::error::RotateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quarter-turn rotation, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Normalize any multiple of 90 (negative means counter-clockwise)
    pub fn from_degrees(degrees: i64) -> Result<Self, RotateError> {
        if degrees % 90 != 0 {
            return Err(RotateError::InvalidRotation(degrees));
        }
        Ok(match degrees.rem_euclid(360) {
            0 => Rotation::Deg0,
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            _ => Rotation::Deg270,
        })
    }

    pub fn degrees(self) -> i64 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Apply `other` on top of this rotation
    pub fn compose(self, other: Rotation) -> Rotation {
        match (self.degrees() + other.degrees()) % 360 {
            0 => Rotation::Deg0,
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    pub fn clockwise(self) -> Rotation {
        self.compose(Rotation::Deg90)
    }

    pub fn counter_clockwise(self) -> Rotation {
        self.compose(Rotation::Deg270)
    }

    /// True for 90/270, where width and height swap
    pub fn is_sideways(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<i64> for Rotation {
    type Error = RotateError;

    fn try_from(degrees: i64) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for i64 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Requested rotation per page (1-indexed), on top of what the PDF already has.
///
/// Pages without an entry are left untouched. An entry that turns back to 0
/// is dropped so the map only ever holds real changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationMap {
    pages: BTreeMap<u32, Rotation>,
}

impl RotationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotation requested for a page (0 when unset)
    pub fn get(&self, page: u32) -> Rotation {
        self.pages.get(&page).copied().unwrap_or_default()
    }

    /// Replace the rotation for a page
    pub fn set(&mut self, page: u32, rotation: Rotation) {
        if rotation == Rotation::Deg0 {
            self.pages.remove(&page);
        } else {
            self.pages.insert(page, rotation);
        }
    }

    /// Add `delta` to the page's current rotation and return the result
    pub fn rotate(&mut self, page: u32, delta: Rotation) -> Rotation {
        let next = self.get(page).compose(delta);
        self.set(page, next);
        next
    }

    /// Add `delta` to every page in `pages`
    pub fn rotate_all(&mut self, pages: impl IntoIterator<Item = u32>, delta: Rotation) {
        for page in pages {
            self.rotate(page, delta);
        }
    }

    pub fn reset(&mut self) {
        self.pages.clear();
    }

    pub fn is_identity(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages with a non-zero rotation, ascending
    pub fn changed_pages(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Rotation)> + '_ {
        self.pages.iter().map(|(page, rotation)| (*page, *rotation))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
