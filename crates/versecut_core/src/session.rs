//! Editing session: the project being edited and the commands a frontend
//! sends to it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::clip::{Clip, PredefinedSubtitleClip, PredefinedSubtitleType, SubtitleClip};
use crate::error::{CoreError, Result};
use crate::project::Project;
use crate::timeline::Timeline;
use crate::track::Track;
use crate::translation::TranslationSource;
use crate::types::{TimeMs, TrackKind};

/// Supplies the subtitle track that subtitle edits apply to.
///
/// The returned track is borrowed from the provider, so it cannot change
/// while an edit is using it.
pub trait SubtitleTrackProvider {
    fn current_subtitle_track(&self) -> Option<&Track>;

    fn current_subtitle_track_mut(&mut self) -> Option<&mut Track>;
}

impl SubtitleTrackProvider for Timeline {
    fn current_subtitle_track(&self) -> Option<&Track> {
        self.subtitle_track()
    }

    fn current_subtitle_track_mut(&mut self) -> Option<&mut Track> {
        self.subtitle_track_mut()
    }
}

impl SubtitleTrackProvider for Project {
    fn current_subtitle_track(&self) -> Option<&Track> {
        self.timeline.subtitle_track()
    }

    fn current_subtitle_track_mut(&mut self) -> Option<&mut Track> {
        self.timeline.subtitle_track_mut()
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditCommand {
    TrimStart { clip_id: Uuid, time: TimeMs },
    TrimEnd { clip_id: Uuid, time: TimeMs },
    Split { clip_id: Uuid, at: TimeMs },
    Delete { clip_id: Uuid },
    ImportAsset {
        path: PathBuf,
        #[serde(default)]
        youtube_url: Option<String>,
    },
    RemoveAsset { asset_id: Uuid },
    PlaceAsset {
        asset_id: Uuid,
        track: TrackKind,
        start: TimeMs,
        end: TimeMs,
    },
    AddSilence { start: TimeMs, end: TimeMs },
    AddPredefined {
        start: TimeMs,
        end: TimeMs,
        text: String,
        predefined_type: PredefinedSubtitleType,
    },
    AddSubtitle {
        start: TimeMs,
        end: TimeMs,
        subtitle: SubtitleClip,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Updated,
    /// A clip or asset was created with this id.
    Created(Uuid),
    /// This many clips left the timeline.
    Removed(usize),
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOutcome::Updated => write!(f, "updated"),
            EditOutcome::Created(id) => write!(f, "created {id}"),
            EditOutcome::Removed(n) => write!(f, "removed {n} clip(s)"),
        }
    }
}

// ---------------------------------------------------------------------------
// EditorSession
// ---------------------------------------------------------------------------

pub struct EditorSession {
    project: Project,
    path: Option<PathBuf>,
    dirty: bool,
    translations: Option<Box<dyn TranslationSource>>,
}

impl EditorSession {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            path: None,
            dirty: false,
            translations: None,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let project = Project::load_from_file(path)?;
        info!(
            project = %project.name,
            clips = project.timeline.clip_count(),
            "opened {}",
            path.display()
        );
        let mut session = Self::new(project);
        session.path = Some(path.to_path_buf());
        Ok(session)
    }

    /// Seed predefined phrases with the project's translation editions.
    pub fn set_translation_source(&mut self, source: Box<dyn TranslationSource>) {
        self.translations = Some(source);
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the project back to the file it came from.
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| CoreError::InvalidOperation("session has no project file".into()))?;
        self.save_as(path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let written = self.project.save_to_file(path)?;
        info!(project = %self.project.name, "saved {}", written.display());
        self.path = Some(written.clone());
        self.dirty = false;
        Ok(written)
    }

    /// Apply one edit. A rejected edit leaves the project unchanged.
    pub fn apply(&mut self, command: EditCommand) -> Result<EditOutcome> {
        debug!(?command, "applying edit");
        let outcome = self.dispatch(command)?;
        self.dirty = true;
        info!(%outcome, "edit applied");
        Ok(outcome)
    }

    fn dispatch(&mut self, command: EditCommand) -> Result<EditOutcome> {
        match command {
            EditCommand::TrimStart { clip_id, time } => {
                self.project.timeline.trim_clip_start(clip_id, time)?;
                Ok(EditOutcome::Updated)
            }
            EditCommand::TrimEnd { clip_id, time } => {
                self.project.timeline.trim_clip_end(clip_id, time)?;
                Ok(EditOutcome::Updated)
            }
            EditCommand::Split { clip_id, at } => {
                self.project.timeline.split_clip(clip_id, at).map(EditOutcome::Created)
            }
            EditCommand::Delete { clip_id } => {
                self.project.timeline.remove_clip(clip_id)?;
                Ok(EditOutcome::Removed(1))
            }
            EditCommand::ImportAsset { path, youtube_url } => {
                self.project.add_asset(path, youtube_url).map(EditOutcome::Created)
            }
            EditCommand::RemoveAsset { asset_id } => {
                let before = self.project.timeline.clip_count();
                self.project.remove_asset(asset_id)?;
                Ok(EditOutcome::Removed(before - self.project.timeline.clip_count()))
            }
            EditCommand::PlaceAsset {
                asset_id,
                track,
                start,
                end,
            } => self
                .project
                .place_asset(asset_id, track, start, end)
                .map(EditOutcome::Created),
            EditCommand::AddSilence { start, end } => {
                self.add_subtitle_clip(Clip::silence(start, end))
            }
            EditCommand::AddPredefined {
                start,
                end,
                text,
                predefined_type,
            } => {
                let phrase = match &self.translations {
                    Some(source) => PredefinedSubtitleClip::with_project_translations(
                        text,
                        predefined_type,
                        source.as_ref(),
                    ),
                    None => PredefinedSubtitleClip::new(text, predefined_type),
                };
                self.add_subtitle_clip(Clip::predefined(start, end, phrase))
            }
            EditCommand::AddSubtitle {
                start,
                end,
                subtitle,
            } => self.add_subtitle_clip(Clip::subtitle(start, end, subtitle)),
        }
    }

    fn add_subtitle_clip(&mut self, clip: Clip) -> Result<EditOutcome> {
        let id = clip.id();
        self.current_subtitle_track_mut()
            .ok_or(CoreError::TrackKindNotFound(TrackKind::Subtitle))?
            .insert_clip(clip)?;
        Ok(EditOutcome::Created(id))
    }
}

impl SubtitleTrackProvider for EditorSession {
    fn current_subtitle_track(&self) -> Option<&Track> {
        self.project.current_subtitle_track()
    }

    fn current_subtitle_track_mut(&mut self) -> Option<&mut Track> {
        self.project.current_subtitle_track_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::Translation;
    use tempfile::TempDir;

    struct Editions;

    impl TranslationSource for Editions {
        fn added_editions(&self) -> Vec<String> {
            vec!["en".into()]
        }

        fn predefined_translation(&self, _edition: &str, kind: PredefinedSubtitleType) -> Translation {
            match kind {
                PredefinedSubtitleType::Istiadhah => {
                    Translation::predefined("I seek refuge in Allah from the accursed Satan")
                }
                _ => Translation::predefined(""),
            }
        }
    }

    fn created(outcome: EditOutcome) -> Uuid {
        match outcome {
            EditOutcome::Created(id) => id,
            other => panic!("expected a created id, got {other:?}"),
        }
    }

    fn subtitle_session() -> (EditorSession, Uuid, Uuid) {
        let mut session = EditorSession::new(Project::new("Session"));
        let a = created(
            session
                .apply(EditCommand::AddSilence { start: TimeMs(0), end: TimeMs(1_000) })
                .unwrap(),
        );
        let b = created(
            session
                .apply(EditCommand::AddSubtitle {
                    start: TimeMs(1_001),
                    end: TimeMs(2_000),
                    subtitle: SubtitleClip {
                        surah: 1,
                        verse: 1,
                        text: "بِسْمِ ٱللَّهِ".into(),
                        ..SubtitleClip::default()
                    },
                })
                .unwrap(),
        );
        (session, a, b)
    }

    #[test]
    fn subtitle_additions_go_to_the_subtitle_track() {
        let (session, a, b) = subtitle_session();
        let subs = session.current_subtitle_track().unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs.clip_after(a).map(Clip::id), Some(b));
        assert!(session.is_dirty());
    }

    #[test]
    fn trim_through_session_moves_neighbour() {
        let (mut session, a, b) = subtitle_session();
        session
            .apply(EditCommand::TrimEnd { clip_id: a, time: TimeMs(1_500) })
            .unwrap();
        let b_clip = session.project().timeline.find_clip(b).unwrap();
        assert_eq!(b_clip.start_time(), TimeMs(1_501));
        assert_eq!(b_clip.duration(), TimeMs(499));
    }

    #[test]
    fn rejected_edit_leaves_project_unchanged() {
        let (mut session, _, b) = subtitle_session();
        let before = session.project().clone();

        let err = session
            .apply(EditCommand::TrimStart { clip_id: b, time: TimeMs(1_950) })
            .unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(session.project(), &before);

        let err = session
            .apply(EditCommand::AddSilence { start: TimeMs(1_900), end: TimeMs(3_000) })
            .unwrap_err();
        assert!(matches!(err, CoreError::Overlap { .. }));
        assert_eq!(session.project(), &before);
    }

    #[test]
    fn split_and_delete() {
        let (mut session, a, _) = subtitle_session();
        let right = created(session.apply(EditCommand::Split { clip_id: a, at: TimeMs(500) }).unwrap());
        assert_eq!(session.project().timeline.clip_count(), 3);

        let outcome = session.apply(EditCommand::Delete { clip_id: right }).unwrap();
        assert_eq!(outcome, EditOutcome::Removed(1));
        assert_eq!(session.project().timeline.clip_count(), 2);
    }

    #[test]
    fn asset_lifecycle_through_commands() {
        let mut session = EditorSession::new(Project::new("Assets"));
        let asset = created(
            session
                .apply(EditCommand::ImportAsset { path: "recitation.mp3".into(), youtube_url: None })
                .unwrap(),
        );
        session
            .apply(EditCommand::PlaceAsset {
                asset_id: asset,
                track: TrackKind::Audio,
                start: TimeMs(0),
                end: TimeMs(10_000),
            })
            .unwrap();
        session
            .apply(EditCommand::PlaceAsset {
                asset_id: asset,
                track: TrackKind::Audio,
                start: TimeMs(10_001),
                end: TimeMs(20_000),
            })
            .unwrap();

        let outcome = session.apply(EditCommand::RemoveAsset { asset_id: asset }).unwrap();
        assert_eq!(outcome, EditOutcome::Removed(2));
        assert!(session.project().assets.is_empty());
    }

    #[test]
    fn predefined_phrase_uses_translation_source() {
        let mut session = EditorSession::new(Project::new("Phrases"));
        session.set_translation_source(Box::new(Editions));
        let id = created(
            session
                .apply(EditCommand::AddPredefined {
                    start: TimeMs(0),
                    end: TimeMs(3_000),
                    text: "أَعُوذُ بِٱللَّهِ".into(),
                    predefined_type: PredefinedSubtitleType::Istiadhah,
                })
                .unwrap(),
        );
        let clip = session.project().timeline.find_clip(id).unwrap();
        assert_eq!(
            clip.translation("en").map(|t| t.text.as_str()),
            Some("I seek refuge in Allah from the accursed Satan")
        );
    }

    #[test]
    fn missing_subtitle_track_is_reported() {
        let mut project = Project::new("Bare");
        project.timeline = Timeline::new();
        let mut session = EditorSession::new(project);
        let result = session.apply(EditCommand::AddSilence { start: TimeMs(0), end: TimeMs(500) });
        assert!(matches!(result, Err(CoreError::TrackKindNotFound(TrackKind::Subtitle))));
    }

    #[test]
    fn commands_read_from_json() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"command":"trim_end","clip_id":"{id}","time":1500}}"#);
        let cmd: EditCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, EditCommand::TrimEnd { clip_id: id, time: TimeMs(1_500) });
    }

    #[test]
    fn save_requires_a_path_and_clears_dirty_flag() {
        let dir = TempDir::new().unwrap();
        let (mut session, _, _) = subtitle_session();
        assert!(matches!(session.save(), Err(CoreError::InvalidOperation(_))));

        let written = session.save_as(dir.path().join("session")).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.path(), Some(written.as_path()));

        let reopened = EditorSession::open(&written).unwrap();
        assert_eq!(reopened.project(), session.project());
    }
}
