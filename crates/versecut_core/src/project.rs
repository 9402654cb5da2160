use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::clip::Clip;
use crate::error::{CoreError, Result};
use crate::timeline::Timeline;
use crate::types::{Asset, AssetKind, AssetStore, TimeMs, TrackKind};

pub const PROJECT_EXTENSION: &str = "versecut";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Most recently imported first.
    pub assets: Vec<Asset>,
    pub timeline: Timeline,
}

impl Project {
    /// Create a project with an Arabic subtitle track, a video track and an
    /// audio track.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            assets: vec![],
            timeline: Timeline::with_default_tracks(),
        }
    }

    /// Import a media file. Files of unknown type are refused.
    pub fn add_asset(&mut self, path: impl Into<PathBuf>, youtube_url: Option<String>) -> Result<Uuid> {
        let asset = Asset::new(path, youtube_url);
        if asset.kind == AssetKind::Unknown {
            return Err(CoreError::UnsupportedAsset(asset.path));
        }
        let id = asset.id;
        info!(asset = %id, path = %asset.path.display(), kind = ?asset.kind, "asset imported");
        self.assets.insert(0, asset);
        Ok(id)
    }

    /// Remove an asset together with every clip that uses it.
    pub fn remove_asset(&mut self, asset_id: Uuid) -> Result<Asset> {
        let pos = self
            .assets
            .iter()
            .position(|a| a.id == asset_id)
            .ok_or(CoreError::AssetNotFound(asset_id))?;
        self.timeline.remove_asset_from_tracks(asset_id);
        Ok(self.assets.remove(pos))
    }

    /// Place an imported asset on the first track of `kind`.
    pub fn place_asset(
        &mut self,
        asset_id: Uuid,
        kind: TrackKind,
        start: TimeMs,
        end: TimeMs,
    ) -> Result<Uuid> {
        if !self.contains_asset(asset_id) {
            return Err(CoreError::AssetNotFound(asset_id));
        }
        let track = self
            .timeline
            .track_by_kind_mut(kind)
            .ok_or(CoreError::TrackKindNotFound(kind))?;
        let clip = Clip::asset(start, end, asset_id);
        let id = clip.id();
        track.insert_clip(clip)?;
        Ok(id)
    }

    /// Save project to a file as pretty-printed JSON.
    /// Automatically appends `.versecut` extension if not present.
    /// Returns the path actually written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = ensure_extension(path.as_ref());
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Load a project from a JSON file. Tracks are validated on the way in,
    /// and a clip id may appear on one track only.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let project: Project = serde_json::from_str(&data)?;
        project.timeline.validate()?;
        Ok(project)
    }
}

impl AssetStore for Project {
    fn asset(&self, id: Uuid) -> Option<&Asset> {
        self.assets.as_slice().asset(id)
    }
}

fn ensure_extension(path: &Path) -> PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some(PROJECT_EXTENSION) {
        path.to_path_buf()
    } else {
        let mut p = path.to_path_buf();
        let mut name = p.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(PROJECT_EXTENSION);
        p.set_file_name(name);
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{PredefinedSubtitleClip, PredefinedSubtitleType};
    use tempfile::TempDir;

    #[test]
    fn create_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test_project.versecut");

        let project = Project::new("Al-Fatiha");
        let written = project.save_to_file(&path).unwrap();
        assert_eq!(written, path);

        let loaded = Project::load_from_file(&path).unwrap();
        assert_eq!(project, loaded);
    }

    #[test]
    fn save_load_with_assets_and_clips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("populated.versecut");

        let mut project = Project::new("Populated");
        let recitation = project.add_asset("/media/recitation.mp3", None).unwrap();
        let background = project
            .add_asset("/media/sky.mp4", Some("https://youtu.be/xyz".into()))
            .unwrap();
        project
            .place_asset(recitation, TrackKind::Audio, TimeMs(0), TimeMs(60_000))
            .unwrap();
        project
            .place_asset(background, TrackKind::Video, TimeMs(0), TimeMs(30_000))
            .unwrap();
        project
            .timeline
            .subtitle_track_mut()
            .unwrap()
            .insert_clip(Clip::predefined(
                TimeMs(0),
                TimeMs(2_500),
                PredefinedSubtitleClip::new("بِسْمِ ٱللَّهِ", PredefinedSubtitleType::Basmala),
            ))
            .unwrap();

        project.save_to_file(&path).unwrap();
        let loaded = Project::load_from_file(&path).unwrap();
        assert_eq!(project, loaded);
        assert_eq!(loaded.timeline.clip_count(), 3);
    }

    #[test]
    fn load_nonexistent_file_returns_error() {
        let result = Project::load_from_file("/tmp/does_not_exist_versecut_test.versecut");
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn load_corrupt_timeline_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.versecut");

        let mut project = Project::new("Broken");
        let subs = project.timeline.subtitle_track_mut().unwrap();
        subs.insert_clip(Clip::silence(TimeMs(0), TimeMs(1_000))).unwrap();
        subs.insert_clip(Clip::silence(TimeMs(1_001), TimeMs(2_000))).unwrap();

        let mut json = serde_json::to_value(&project).unwrap();
        json["timeline"]["tracks"][0]["clips"][1]["start_time"] = serde_json::json!(1_000);
        std::fs::write(&path, json.to_string()).unwrap();

        assert!(matches!(Project::load_from_file(&path), Err(CoreError::Json(_))));
    }

    #[test]
    fn extension_appended_if_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_ext");

        let project = Project::new("ExtTest");
        let written = project.save_to_file(&path).unwrap();

        let expected_path = dir.path().join("no_ext.versecut");
        assert_eq!(written, expected_path);
        assert!(expected_path.exists());

        let loaded = Project::load_from_file(&expected_path).unwrap();
        assert_eq!(project, loaded);
    }

    #[test]
    fn unsupported_asset_is_refused() {
        let mut project = Project::new("Assets");
        let result = project.add_asset("/docs/readme.txt", None);
        assert!(matches!(result, Err(CoreError::UnsupportedAsset(_))));
        assert!(project.assets.is_empty());
    }

    #[test]
    fn newest_asset_comes_first() {
        let mut project = Project::new("Assets");
        project.add_asset("a.mp3", None).unwrap();
        let newest = project.add_asset("b.mp3", None).unwrap();
        assert_eq!(project.assets[0].id, newest);
    }

    #[test]
    fn remove_asset_cascades_to_timeline() {
        let mut project = Project::new("Cascade");
        let audio = project.add_asset("recitation.mp3", None).unwrap();
        let video = project.add_asset("sky.mp4", None).unwrap();
        project.place_asset(audio, TrackKind::Audio, TimeMs(0), TimeMs(5_000)).unwrap();
        project.place_asset(video, TrackKind::Video, TimeMs(0), TimeMs(5_000)).unwrap();

        let removed = project.remove_asset(audio).unwrap();
        assert_eq!(removed.id, audio);
        assert_eq!(project.timeline.clip_count(), 1);
        assert!(!project.contains_asset(audio));

        assert!(matches!(project.remove_asset(audio), Err(CoreError::AssetNotFound(_))));
    }

    #[test]
    fn placing_unknown_asset_fails() {
        let mut project = Project::new("Place");
        let result = project.place_asset(Uuid::new_v4(), TrackKind::Video, TimeMs(0), TimeMs(1_000));
        assert!(matches!(result, Err(CoreError::AssetNotFound(_))));
    }

    #[test]
    fn placing_on_missing_track_kind_fails() {
        let mut project = Project::new("Place");
        project.timeline = Timeline::new();
        let id = project.add_asset("a.mp3", None).unwrap();
        let result = project.place_asset(id, TrackKind::Audio, TimeMs(0), TimeMs(1_000));
        assert!(matches!(result, Err(CoreError::TrackKindNotFound(TrackKind::Audio))));
    }

    #[test]
    fn load_rejects_clip_id_on_two_tracks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shared.versecut");
        let mut project = Project::new("Shared");
        let asset = project.add_asset("sky.mp4", None).unwrap();
        let clip = project.place_asset(asset, TrackKind::Video, TimeMs(0), TimeMs(1_000)).unwrap();

        let mut json = serde_json::to_value(&project).unwrap();
        let video_clip = json["timeline"]["tracks"][1]["clips"][0].clone();
        json["timeline"]["tracks"][2]["clips"] = serde_json::json!([video_clip]);
        std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        let result = Project::load_from_file(&path);
        assert!(matches!(result, Err(CoreError::DuplicateClip(id)) if id == clip));
    }
}
