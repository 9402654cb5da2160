//! Per-locale translation records attached to subtitle clips.
//!
//! The translations workflow fills and edits these; the engine only stores
//! them and hands them back by locale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clip::PredefinedSubtitleType;

/// Translations of a clip keyed by locale/edition name.
pub type TranslationMap = BTreeMap<String, Translation>;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TranslationStatus {
    #[serde(rename = "completed by default")]
    CompletedByDefault,
    #[serde(rename = "automatically trimmed")]
    AutomaticallyTrimmed,
    #[serde(rename = "ai trimmed")]
    AiTrimmed,
    #[serde(rename = "to review")]
    ToReview,
    #[serde(rename = "reviewed")]
    Reviewed,
    #[serde(rename = "ai error")]
    AiError,
    #[default]
    #[serde(rename = "undefined")]
    Undefined,
}

/// What the translation text is cut from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TranslationKind {
    /// Slice of a verse translation, by word index into the full text.
    Verse {
        start_word_index: usize,
        end_word_index: usize,
        /// Set when the text was written by hand instead of cut from the
        /// edition's translation.
        is_brute_force: bool,
    },
    Predefined,
    #[default]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub status: TranslationStatus,
    #[serde(flatten)]
    pub kind: TranslationKind,
}

impl Translation {
    pub fn new(text: impl Into<String>, status: TranslationStatus) -> Self {
        Self {
            text: text.into(),
            status,
            kind: TranslationKind::Other,
        }
    }

    /// A verse translation spanning every word of `text`.
    pub fn verse(text: impl Into<String>, status: TranslationStatus) -> Self {
        let text = text.into();
        let words = text.split_whitespace().count();
        Self {
            text,
            status,
            kind: TranslationKind::Verse {
                start_word_index: 0,
                end_word_index: words.saturating_sub(1),
                is_brute_force: false,
            },
        }
    }

    /// Translation of a predefined phrase. Always complete; an empty text
    /// means the edition has nothing for this phrase.
    pub fn predefined(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if text.is_empty() {
            TranslationKind::Other
        } else {
            TranslationKind::Predefined
        };
        Self {
            text,
            status: TranslationStatus::CompletedByDefault,
            kind,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(
            self.status,
            TranslationStatus::CompletedByDefault
                | TranslationStatus::Reviewed
                | TranslationStatus::AutomaticallyTrimmed
                | TranslationStatus::AiTrimmed
        )
    }
}

/// The project's translation store, as seen from clip construction.
pub trait TranslationSource {
    /// Names of the editions added to the project, in display order.
    fn added_editions(&self) -> Vec<String>;

    fn predefined_translation(&self, edition: &str, kind: PredefinedSubtitleType) -> Translation;
}
