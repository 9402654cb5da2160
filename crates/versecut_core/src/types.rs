use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Shortest duration a clip may have once an edit has been committed.
pub const MIN_CLIP_DURATION: TimeMs = TimeMs(100);

/// Distance between the end of a clip and the start of a clip that touches it.
pub const CLIP_GAP: TimeMs = TimeMs(1);

// ---------------------------------------------------------------------------
// TimeMs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TimeMs(pub i64);

impl TimeMs {
    pub const ZERO: Self = Self(0);

    pub fn from_seconds(s: f64) -> Self {
        Self((s * 1_000.0).round() as i64)
    }

    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

// Operators saturate at the i64 bounds; edits that must reject an
// out-of-range time use the checked forms.

impl Add for TimeMs {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for TimeMs {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for TimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = self.0.unsigned_abs();
        let ms = total_ms % 1_000;
        let total_secs = total_ms / 1_000;
        let secs = total_secs % 60;
        let total_mins = total_secs / 60;
        let mins = total_mins % 60;
        let hours = total_mins / 60;
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
    }
}

// ---------------------------------------------------------------------------
// AssetKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AssetKind {
    Video,
    Audio,
    Image,
    Unknown,
}

impl AssetKind {
    /// Classify a media file by its extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "mp4" | "mkv" | "webm" | "avi" | "mov" => AssetKind::Video,
            "mp3" | "wav" | "flac" | "ogg" | "m4a" | "aac" | "opus" => AssetKind::Audio,
            "png" | "jpg" | "jpeg" | "webp" | "gif" | "bmp" => AssetKind::Image,
            _ => AssetKind::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub path: PathBuf,
    pub kind: AssetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

impl Asset {
    pub fn new(path: impl Into<PathBuf>, youtube_url: Option<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            name,
            kind: AssetKind::from_path(&path),
            path,
            youtube_url,
        }
    }
}

/// Read access to the project's asset collection. Clips only hold asset ids;
/// the store owns the assets.
pub trait AssetStore {
    fn asset(&self, id: Uuid) -> Option<&Asset>;

    fn contains_asset(&self, id: Uuid) -> bool {
        self.asset(id).is_some()
    }
}

impl AssetStore for [Asset] {
    fn asset(&self, id: Uuid) -> Option<&Asset> {
        self.iter().find(|a| a.id == id)
    }
}

// ---------------------------------------------------------------------------
// TrackKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Subtitle,
    Video,
    Audio,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
