//! Clips: time intervals placed on a track.
//!
//! A [`Clip`] carries the fields every clip shares (id and boundaries) and a
//! [`ClipKind`] with the data specific to silence, media assets, Quran
//! subtitles and predefined phrases. The duration is always derived from the
//! two boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::translation::{Translation, TranslationMap, TranslationSource};
use crate::types::TimeMs;

/// Pixels per second of timeline at the editor's default zoom.
pub const DEFAULT_ZOOM: f64 = 29.25;

// ---------------------------------------------------------------------------
// ClipType
// ---------------------------------------------------------------------------

/// Discriminant of a clip, as stored next to its fields on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipType {
    Silence,
    Asset,
    Subtitle,
    PredefinedSubtitle,
}

impl ClipType {
    pub const ALL: [ClipType; 4] = [
        ClipType::Silence,
        ClipType::Asset,
        ClipType::Subtitle,
        ClipType::PredefinedSubtitle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClipType::Silence => "Silence",
            ClipType::Asset => "Asset",
            ClipType::Subtitle => "Subtitle",
            ClipType::PredefinedSubtitle => "Pre-defined Subtitle",
        }
    }
}

impl fmt::Display for ClipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Variant payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetClip {
    pub asset_id: Uuid,
}

/// A run of words from one verse.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubtitleClip {
    pub surah: u32,
    pub verse: u32,
    pub start_word_index: usize,
    pub end_word_index: usize,
    pub text: String,
    /// Word-by-word gloss.
    pub wbw_translation: String,
    pub is_full_verse: bool,
    pub is_last_words_of_verse: bool,
    #[serde(default)]
    pub translations: TranslationMap,
}

impl SubtitleClip {
    /// `"surah:verse"`
    pub fn verse_key(&self) -> String {
        format!("{}:{}", self.surah, self.verse)
    }

    /// The Arabic text, followed by the verse number in Arabic-Indic digits
    /// when the clip closes its verse.
    pub fn text_with_verse_number(&self) -> String {
        if self.is_last_words_of_verse {
            format!("{} {}", self.text, arabic_indic_digits(self.verse))
        } else {
            self.text.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PredefinedSubtitleType {
    Basmala,
    Istiadhah,
    #[serde(rename = "Sadaqallahul Azim")]
    SadaqallahulAzim,
    Takbir,
    #[default]
    Other,
}

/// A fixed phrase (basmala, takbir, ...) shown between verses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredefinedSubtitleClip {
    pub text: String,
    pub predefined_type: PredefinedSubtitleType,
    #[serde(default)]
    pub translations: TranslationMap,
}

impl PredefinedSubtitleClip {
    pub fn new(text: impl Into<String>, predefined_type: PredefinedSubtitleType) -> Self {
        Self {
            text: text.into(),
            predefined_type,
            translations: TranslationMap::new(),
        }
    }

    /// Build the phrase with one translation per edition added to the project.
    pub fn with_project_translations(
        text: impl Into<String>,
        predefined_type: PredefinedSubtitleType,
        source: &dyn TranslationSource,
    ) -> Self {
        let translations = source
            .added_editions()
            .into_iter()
            .map(|edition| {
                let translation = source.predefined_translation(&edition, predefined_type);
                (edition, translation)
            })
            .collect();
        Self {
            text: text.into(),
            predefined_type,
            translations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipKind {
    Silence,
    Asset(AssetClip),
    Subtitle(SubtitleClip),
    PredefinedSubtitle(PredefinedSubtitleClip),
}

impl ClipKind {
    pub fn clip_type(&self) -> ClipType {
        match self {
            ClipKind::Silence => ClipType::Silence,
            ClipKind::Asset(_) => ClipType::Asset,
            ClipKind::Subtitle(_) => ClipType::Subtitle,
            ClipKind::PredefinedSubtitle(_) => ClipType::PredefinedSubtitle,
        }
    }
}

// ---------------------------------------------------------------------------
// Clip
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    id: Uuid,
    start_time: TimeMs,
    end_time: TimeMs,
    kind: ClipKind,
}

impl Clip {
    pub fn new(start_time: TimeMs, end_time: TimeMs, kind: ClipKind) -> Self {
        Self::with_id(Uuid::new_v4(), start_time, end_time, kind)
    }

    pub(crate) fn with_id(id: Uuid, start_time: TimeMs, end_time: TimeMs, kind: ClipKind) -> Self {
        Self {
            id,
            start_time,
            end_time,
            kind,
        }
    }

    pub fn silence(start_time: TimeMs, end_time: TimeMs) -> Self {
        Self::new(start_time, end_time, ClipKind::Silence)
    }

    pub fn asset(start_time: TimeMs, end_time: TimeMs, asset_id: Uuid) -> Self {
        Self::new(start_time, end_time, ClipKind::Asset(AssetClip { asset_id }))
    }

    pub fn subtitle(start_time: TimeMs, end_time: TimeMs, subtitle: SubtitleClip) -> Self {
        Self::new(start_time, end_time, ClipKind::Subtitle(subtitle))
    }

    pub fn predefined(start_time: TimeMs, end_time: TimeMs, phrase: PredefinedSubtitleClip) -> Self {
        Self::new(start_time, end_time, ClipKind::PredefinedSubtitle(phrase))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn start_time(&self) -> TimeMs {
        self.start_time
    }

    pub fn end_time(&self) -> TimeMs {
        self.end_time
    }

    pub fn duration(&self) -> TimeMs {
        self.end_time - self.start_time
    }

    pub fn kind(&self) -> &ClipKind {
        &self.kind
    }

    pub fn clip_type(&self) -> ClipType {
        self.kind.clip_type()
    }

    /// Move the start boundary. Unchecked: a clip already on a track must be
    /// resized through [`Track::update_clip_start`](crate::track::Track::update_clip_start).
    pub fn set_start_time(&mut self, start_time: TimeMs) {
        self.start_time = start_time;
    }

    /// Move the end boundary. Unchecked, see [`Clip::set_start_time`].
    pub fn set_end_time(&mut self, end_time: TimeMs) {
        self.end_time = end_time;
    }

    /// Display width at `zoom` pixels per second.
    pub fn width(&self, zoom: f64) -> f64 {
        self.duration().as_seconds() * zoom
    }

    pub fn contains(&self, time: TimeMs) -> bool {
        self.start_time <= time && time <= self.end_time
    }

    pub fn asset_id(&self) -> Option<Uuid> {
        match &self.kind {
            ClipKind::Asset(a) => Some(a.asset_id),
            _ => None,
        }
    }

    /// The translation map of subtitle and predefined clips.
    pub fn translations(&self) -> Option<&TranslationMap> {
        match &self.kind {
            ClipKind::Subtitle(s) => Some(&s.translations),
            ClipKind::PredefinedSubtitle(p) => Some(&p.translations),
            ClipKind::Silence | ClipKind::Asset(_) => None,
        }
    }

    pub fn translations_mut(&mut self) -> Option<&mut TranslationMap> {
        match &mut self.kind {
            ClipKind::Subtitle(s) => Some(&mut s.translations),
            ClipKind::PredefinedSubtitle(p) => Some(&mut p.translations),
            ClipKind::Silence | ClipKind::Asset(_) => None,
        }
    }

    pub fn translation(&self, locale: &str) -> Option<&Translation> {
        self.translations().and_then(|t| t.get(locale))
    }

    pub fn is_translatable(&self) -> bool {
        self.translations().is_some()
    }

    /// Copy of this clip under a fresh id, covering `[start_time, end_time]`.
    pub(crate) fn duplicate_over(&self, start_time: TimeMs, end_time: TimeMs) -> Self {
        Self::new(start_time, end_time, self.kind.clone())
    }
}

fn arabic_indic_digits(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
