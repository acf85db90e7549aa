//! Pre-stretch geometry cache
//!
//! One live entry per tracked region holds the last geometry seen before a
//! stretch, so a repeated stretch against the same pivot can restore it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Pivot;
use crate::math::Rect;
use crate::region::RegionId;

/// Cached pre-stretch geometry for one region
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub pivot: Option<Pivot>,
    pub viewport: Option<Rect>,
}

impl CacheEntry {
    /// Build an entry capturing a full frame
    pub fn from_frame(frame: Rect, pivot: Option<Pivot>, viewport: Rect) -> Self {
        Self {
            width: Some(frame.width),
            height: Some(frame.height),
            x: Some(frame.x),
            y: Some(frame.y),
            pivot,
            viewport: Some(viewport),
        }
    }

    /// Reassemble the cached frame, if all four geometry fields are present
    pub fn frame(&self) -> Option<Rect> {
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(width), Some(height)) => {
                Some(Rect::new(x, y, width, height))
            }
            _ => None,
        }
    }

    /// An entry with no geometry at all is corrupt and must be dropped
    #[inline]
    pub fn is_corrupt(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.x.is_none() && self.y.is_none()
    }

    /// Merge another entry's present fields over this one
    fn merge(&mut self, patch: CacheEntry) {
        if patch.width.is_some() {
            self.width = patch.width;
        }
        if patch.height.is_some() {
            self.height = patch.height;
        }
        if patch.x.is_some() {
            self.x = patch.x;
        }
        if patch.y.is_some() {
            self.y = patch.y;
        }
        if patch.pivot.is_some() {
            self.pivot = patch.pivot;
        }
        if patch.viewport.is_some() {
            self.viewport = patch.viewport;
        }
    }
}

/// Keyed pre-stretch cache, one live entry per region
#[derive(Debug, Default)]
pub struct TransformCache {
    entries: HashMap<RegionId, CacheEntry>,
}

impl TransformCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or merge an entry for a region
    ///
    /// Merging keeps existing fields unless the patch carries a
    /// replacement. An entry left without any geometry is dropped.
    pub fn upsert(&mut self, id: RegionId, patch: CacheEntry) {
        let entry = self.entries.entry(id).or_default();
        entry.merge(patch);
        // Entries without any geometry are corrupt; dropped without surfacing
        if entry.is_corrupt() {
            self.entries.remove(&id);
        }
    }

    /// Look at the cached entry for a region
    pub fn get(&self, id: RegionId) -> Option<&CacheEntry> {
        self.entries.get(&id)
    }

    /// Remove and return the cached entry for a region
    ///
    /// Corrupt entries are dropped rather than returned.
    pub fn take(&mut self, id: RegionId) -> Option<CacheEntry> {
        let entry = self.entries.remove(&id)?;
        if entry.is_corrupt() {
            return None;
        }
        Some(entry)
    }

    /// Drop the entry for a region, if any
    pub fn clear(&mut self, id: RegionId) {
        self.entries.remove(&id);
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
