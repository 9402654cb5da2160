use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

use crate::clip::Clip;
use crate::error::{CoreError, Result};
use crate::track::Track;
use crate::types::{TimeMs, TrackKind};

/// The project's tracks in presentation order: subtitles first, then media.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    #[serde(default)]
    tracks: Vec<Track>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Arabic subtitle track, one video track and one audio track.
    pub fn with_default_tracks() -> Self {
        Self::from_tracks(vec![
            Track::subtitle("arabic"),
            Track::new(TrackKind::Video, "video"),
            Track::new(TrackKind::Audio, "audio"),
        ])
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn track(&self, track_id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == track_id)
    }

    pub fn track_mut(&mut self, track_id: Uuid) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id() == track_id)
    }

    /// First track of the given kind.
    pub fn track_by_kind(&self, kind: TrackKind) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind() == kind)
    }

    pub fn track_by_kind_mut(&mut self, kind: TrackKind) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.kind() == kind)
    }

    /// The subtitle track edits without an explicit track apply to.
    pub fn subtitle_track(&self) -> Option<&Track> {
        self.track_by_kind(TrackKind::Subtitle)
    }

    pub fn subtitle_track_mut(&mut self) -> Option<&mut Track> {
        self.track_by_kind_mut(TrackKind::Subtitle)
    }

    pub fn track_of_clip(&self, clip_id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.contains_clip(clip_id))
    }

    pub fn track_of_clip_mut(&mut self, clip_id: Uuid) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.contains_clip(clip_id))
    }

    pub fn find_clip(&self, clip_id: Uuid) -> Option<&Clip> {
        self.tracks.iter().find_map(|t| t.clip(clip_id))
    }

    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }

    /// End of the latest clip across all tracks.
    pub fn duration(&self) -> TimeMs {
        self.tracks
            .iter()
            .map(Track::duration)
            .max()
            .unwrap_or(TimeMs::ZERO)
    }

    /// Check every track, and that no clip id appears on two tracks.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for track in &self.tracks {
            track.validate()?;
            if let Some(dup) = track.clips().iter().find(|c| !seen.insert(c.id())) {
                return Err(CoreError::DuplicateClip(dup.id()));
            }
        }
        Ok(())
    }

    /// Remove every clip referencing `asset_id`, on every track. Removing an
    /// asset nothing references is a no-op. Returns the number of clips removed.
    pub fn remove_asset_from_tracks(&mut self, asset_id: Uuid) -> usize {
        let removed: usize = self
            .tracks
            .iter_mut()
            .map(|t| t.remove_clips_with_asset(asset_id))
            .sum();
        if removed > 0 {
            info!(asset = %asset_id, removed, "removed asset clips from timeline");
        }
        removed
    }
}
