//! versecut core: the timeline model of a subtitled recitation video editor.
//!
//! - Clips (silence, media assets, Quran subtitles, predefined phrases)
//! - Tracks that keep their clips ordered, spaced and never overlapping
//! - The timeline, projects and the JSON registry used to persist them
//! - An editing session that applies frontend commands

pub mod clip;
pub mod editing;
pub mod error;
pub mod project;
pub mod registry;
pub mod session;
pub mod timeline;
pub mod track;
pub mod translation;
pub mod types;

pub use clip::{
    AssetClip, Clip, ClipKind, ClipType, PredefinedSubtitleClip, PredefinedSubtitleType,
    SubtitleClip, DEFAULT_ZOOM,
};
pub use error::{CoreError, Result};
pub use project::Project;
pub use registry::{ClipFactory, ClipRegistry};
pub use session::{EditCommand, EditOutcome, EditorSession, SubtitleTrackProvider};
pub use timeline::Timeline;
pub use track::Track;
pub use translation::{Translation, TranslationKind, TranslationMap, TranslationSource, TranslationStatus};
pub use types::{Asset, AssetKind, AssetStore, TimeMs, TrackKind, CLIP_GAP, MIN_CLIP_DURATION};
