//! Tracks: ordered, overlap-free sequences of clips.
//!
//! A track keeps its clips sorted by start time with every clip ending
//! strictly before the next one starts, and no clip shorter than
//! [`MIN_CLIP_DURATION`]. The clip list is private; every mutation goes
//! through a method that checks these rules first and leaves the track
//! untouched when they would break. Boundary edits live in `editing.rs`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use crate::clip::Clip;
use crate::error::{CoreError, Result};
use crate::translation::TranslationMap;
use crate::types::{TimeMs, TrackKind, CLIP_GAP, MIN_CLIP_DURATION};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "TrackData")]
pub struct Track {
    id: Uuid,
    kind: TrackKind,
    name: String,
    clips: Vec<Clip>,
}

/// Unchecked shape of a track as read from disk.
#[derive(Deserialize)]
struct TrackData {
    id: Uuid,
    kind: TrackKind,
    #[serde(default)]
    name: String,
    #[serde(default)]
    clips: Vec<Clip>,
}

impl TryFrom<TrackData> for Track {
    type Error = CoreError;

    fn try_from(data: TrackData) -> Result<Self> {
        let mut clips = data.clips;
        clips.sort_by_key(|c| c.start_time());
        let track = Track {
            id: data.id,
            kind: data.kind,
            name: data.name,
            clips,
        };
        track.validate()?;
        Ok(track)
    }
}

impl Track {
    pub fn new(kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            clips: Vec::new(),
        }
    }

    /// Subtitle track for the given script/language (e.g. `"arabic"`).
    pub fn subtitle(language: impl Into<String>) -> Self {
        Self::new(TrackKind::Subtitle, language)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// End of the last clip, or zero for an empty track.
    pub fn duration(&self) -> TimeMs {
        self.clips.last().map(Clip::end_time).unwrap_or(TimeMs::ZERO)
    }

    /// First start time a clip appended after the last one may use.
    pub fn next_free_start(&self) -> TimeMs {
        self.clips
            .last()
            .map(|c| c.end_time() + CLIP_GAP)
            .unwrap_or(TimeMs::ZERO)
    }

    pub fn clip(&self, clip_id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id() == clip_id)
    }

    pub fn contains_clip(&self, clip_id: Uuid) -> bool {
        self.index_of(clip_id).is_some()
    }

    /// Clip under `time`, boundaries included.
    pub fn clip_at(&self, time: TimeMs) -> Option<&Clip> {
        let idx = self.clips.partition_point(|c| c.end_time() < time);
        self.clips.get(idx).filter(|c| c.contains(time))
    }

    pub fn clip_before(&self, clip_id: Uuid) -> Option<&Clip> {
        let idx = self.index_of(clip_id)?;
        idx.checked_sub(1).map(|i| &self.clips[i])
    }

    pub fn clip_after(&self, clip_id: Uuid) -> Option<&Clip> {
        let idx = self.index_of(clip_id)?;
        self.clips.get(idx + 1)
    }

    /// Translations of a clip, for the translation workflow to edit in place.
    pub fn translations_mut(&mut self, clip_id: Uuid) -> Option<&mut TranslationMap> {
        self.clips
            .iter_mut()
            .find(|c| c.id() == clip_id)
            .and_then(Clip::translations_mut)
    }

    /// Insert a clip at its sorted position.
    ///
    /// Rejected without touching the track when the clip is shorter than the
    /// minimum, starts before zero, is already present, or does not leave at
    /// least [`CLIP_GAP`] to both neighbours.
    pub fn insert_clip(&mut self, clip: Clip) -> Result<()> {
        if self.contains_clip(clip.id()) {
            return self.reject(CoreError::DuplicateClip(clip.id()));
        }
        if clip.start_time() < TimeMs::ZERO {
            return self.reject(CoreError::NegativeStart { id: clip.id() });
        }
        if clip.duration() < MIN_CLIP_DURATION {
            return self.reject(CoreError::ClipTooShort {
                id: clip.id(),
                duration: clip.duration(),
            });
        }

        let idx = self
            .clips
            .partition_point(|c| c.start_time() < clip.start_time());
        let overlaps_prev = idx
            .checked_sub(1)
            .is_some_and(|i| self.clips[i].end_time() >= clip.start_time());
        let overlaps_next = self
            .clips
            .get(idx)
            .is_some_and(|next| clip.end_time() >= next.start_time());
        if overlaps_prev || overlaps_next {
            return self.reject(CoreError::Overlap { id: clip.id() });
        }

        self.clips.insert(idx, clip);
        Ok(())
    }

    /// Remove a clip. Neighbours keep their boundaries, leaving a gap.
    pub fn remove_clip(&mut self, clip_id: Uuid) -> Result<Clip> {
        let idx = self
            .index_of(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;
        Ok(self.clips.remove(idx))
    }

    /// Remove every clip referencing `asset_id`. Returns how many went.
    pub fn remove_clips_with_asset(&mut self, asset_id: Uuid) -> usize {
        let before = self.clips.len();
        self.clips.retain(|c| c.asset_id() != Some(asset_id));
        before - self.clips.len()
    }

    /// Check the rules `insert_clip` enforces, over the whole clip list:
    /// unique ids, no start before zero, minimum duration, and ordering with
    /// at least [`CLIP_GAP`] between neighbours.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.clips.len());
        for clip in &self.clips {
            if !seen.insert(clip.id()) {
                return Err(CoreError::DuplicateClip(clip.id()));
            }
            if clip.start_time() < TimeMs::ZERO {
                return Err(CoreError::NegativeStart { id: clip.id() });
            }
            if clip.duration() < MIN_CLIP_DURATION {
                return Err(CoreError::ClipTooShort {
                    id: clip.id(),
                    duration: clip.duration(),
                });
            }
        }
        for pair in self.clips.windows(2) {
            if pair[0].end_time() >= pair[1].start_time() {
                return Err(CoreError::Overlap { id: pair[1].id() });
            }
        }
        Ok(())
    }

    pub(crate) fn index_of(&self, clip_id: Uuid) -> Option<usize> {
        self.clips.iter().position(|c| c.id() == clip_id)
    }

    pub(crate) fn clips_mut(&mut self) -> &mut Vec<Clip> {
        &mut self.clips
    }

    pub(crate) fn reject<T>(&self, err: CoreError) -> Result<T> {
        debug!(track = %self.id, kind = ?self.kind, "edit rejected: {err}");
        Err(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
