//! Plain-data conversion of timeline entities.
//!
//! Clips are stored as flat JSON objects: the shared fields (`id`,
//! `start_time`, `end_time`, `duration`) next to the variant fields, plus a
//! `type` discriminant. On read the discriminant selects a [`ClipFactory`]
//! registered in a [`ClipRegistry`].
//!
//! One registry is installed per process. [`install`] sets it at startup;
//! otherwise [`global`] lazily falls back to the built-in kinds. `Clip`'s
//! serde impls go through it, so tracks, timelines and projects derive serde
//! as usual.

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::clip::{AssetClip, Clip, ClipKind, ClipType, PredefinedSubtitleClip, SubtitleClip};
use crate::error::{CoreError, Result};
use crate::types::TimeMs;

/// Builds the variant part of a clip from its plain-data object.
pub type ClipFactory = fn(&Value) -> Result<ClipKind>;

static GLOBAL: OnceCell<ClipRegistry> = OnceCell::new();

/// The process-wide registry.
pub fn global() -> &'static ClipRegistry {
    GLOBAL.get_or_init(ClipRegistry::with_builtin_kinds)
}

/// Install the process-wide registry. Must run before any clip is
/// (de)serialized; gives the registry back if one is already in place.
pub fn install(registry: ClipRegistry) -> std::result::Result<(), ClipRegistry> {
    GLOBAL.set(registry)
}

pub fn to_plain<T: Serialize>(entity: &T) -> Result<Value> {
    Ok(serde_json::to_value(entity)?)
}

pub fn from_plain<T: DeserializeOwned>(data: Value) -> Result<T> {
    Ok(serde_json::from_value(data)?)
}

#[derive(Deserialize)]
struct ClipHeader {
    id: Uuid,
    start_time: TimeMs,
    end_time: TimeMs,
    #[serde(rename = "type")]
    clip_type: String,
}

#[derive(Clone, Default)]
pub struct ClipRegistry {
    factories: HashMap<String, ClipFactory>,
}

impl ClipRegistry {
    /// A registry that knows no clip type.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        registry.register(ClipType::Silence.as_str(), silence_factory);
        registry.register(ClipType::Asset.as_str(), asset_factory);
        registry.register(ClipType::Subtitle.as_str(), subtitle_factory);
        registry.register(ClipType::PredefinedSubtitle.as_str(), predefined_factory);
        registry
    }

    /// Map `discriminant` to `factory`, replacing any previous mapping.
    pub fn register(&mut self, discriminant: impl Into<String>, factory: ClipFactory) {
        self.factories.insert(discriminant.into(), factory);
    }

    pub fn is_registered(&self, discriminant: &str) -> bool {
        self.factories.contains_key(discriminant)
    }

    pub fn serialize_clip(&self, clip: &Clip) -> Result<Value> {
        let mut object = match clip.kind() {
            ClipKind::Silence => Map::new(),
            ClipKind::Asset(a) => into_object(serde_json::to_value(a)?)?,
            ClipKind::Subtitle(s) => into_object(serde_json::to_value(s)?)?,
            ClipKind::PredefinedSubtitle(p) => into_object(serde_json::to_value(p)?)?,
        };
        object.insert("id".into(), serde_json::to_value(clip.id())?);
        object.insert("start_time".into(), serde_json::to_value(clip.start_time())?);
        object.insert("end_time".into(), serde_json::to_value(clip.end_time())?);
        object.insert("duration".into(), serde_json::to_value(clip.duration())?);
        object.insert("type".into(), Value::from(clip.clip_type().as_str()));
        Ok(Value::Object(object))
    }

    /// Rebuild a clip from plain data. `duration` is ignored: it is always
    /// recomputed from the boundaries.
    pub fn deserialize_clip(&self, data: &Value) -> Result<Clip> {
        let header = ClipHeader::deserialize(data)?;
        let factory = self
            .factories
            .get(&header.clip_type)
            .ok_or_else(|| CoreError::UnknownClipType(header.clip_type.clone()))?;
        if header.end_time <= header.start_time {
            return Err(CoreError::InvalidClip(format!(
                "clip {} ends at {} but starts at {}",
                header.id, header.end_time, header.start_time
            )));
        }
        let kind = factory(data)?;
        Ok(Clip::with_id(header.id, header.start_time, header.end_time, kind))
    }
}

impl std::fmt::Debug for ClipRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ClipRegistry").field("types", &names).finish()
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::InvalidClip(format!(
            "expected an object for clip fields, got {other}"
        ))),
    }
}

fn silence_factory(_: &Value) -> Result<ClipKind> {
    Ok(ClipKind::Silence)
}

fn asset_factory(data: &Value) -> Result<ClipKind> {
    Ok(ClipKind::Asset(AssetClip::deserialize(data)?))
}

fn subtitle_factory(data: &Value) -> Result<ClipKind> {
    Ok(ClipKind::Subtitle(SubtitleClip::deserialize(data)?))
}

fn predefined_factory(data: &Value) -> Result<ClipKind> {
    Ok(ClipKind::PredefinedSubtitle(PredefinedSubtitleClip::deserialize(data)?))
}

impl Serialize for Clip {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        global()
            .serialize_clip(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Clip {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let data = Value::deserialize(deserializer)?;
        global()
            .deserialize_clip(&data)
            .map_err(serde::de::Error::custom)
    }
}
