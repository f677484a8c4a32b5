//! Scene descriptors and the story they form.
//!
//! A story is loaded once and never changes afterwards. Missing fields default
//! to empty text, the `wide` camera and the `intro` mode.

use std::fs;
use std::path::Path;
use log::{error, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use crate::camera::CameraPreset;
use crate::constants::*;
use crate::error::{CinematicError, CinematicResult};
use crate::visual::VisualMode;

const BUILTIN_STORY: &str = include_str!("../assets/photosynthesis.json");

/// One scene as written in the story file. A field of the wrong type is
/// dropped to its default with a warning instead of failing the whole story.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneDescriptor {
    #[serde(deserialize_with = "lenient_text")]
    pub kicker: String,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(deserialize_with = "lenient_bullets")]
    pub bullets: Vec<String>,
    #[serde(deserialize_with = "lenient_name")]
    pub target: Option<String>,
    #[serde(deserialize_with = "lenient_name")]
    pub mode: Option<String>,
    #[serde(deserialize_with = "lenient_duration")]
    pub duration: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StoryFile {
    #[serde(deserialize_with = "lenient_text")]
    title: String,
    #[serde(deserialize_with = "lenient_scenes")]
    scenes: Vec<SceneDescriptor>,
}

/// Numbers and booleans read as their text; objects and arrays are dropped.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => None,
        other => {
            warn!("Ignoring non-text value {other} in story");
            None
        }
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_bullets<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        Value::Null => Vec::new(),
        single => scalar_text(single).into_iter().collect(),
    })
}

fn lenient_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().map(|d| d as f32),
        Value::String(text) => match text.trim().parse::<f32>() {
            Ok(d) => Some(d),
            Err(_) => {
                warn!("Ignoring duration {text:?}, using the default");
                None
            }
        },
        Value::Null => None,
        other => {
            warn!("Ignoring duration {other}, using the default");
            None
        }
    })
}

fn lenient_scenes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<SceneDescriptor>, D::Error> {
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            warn!("Story scenes must be a list, got {other}");
            Vec::new()
        }
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match SceneDescriptor::deserialize(item) {
            Ok(scene) => Some(scene),
            Err(e) => {
                warn!("Skipping scene {i}: {e}");
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Caption {
    pub kicker: String,
    pub title: String,
    pub text: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub caption: Caption,
    pub target: String,
    pub mode: VisualMode,
    pub camera: CameraPreset,
    /// Seconds this scene stays on screen when driven by the clock.
    pub duration: f32,
}

impl Scene {
    pub fn from_descriptor(index: usize, descriptor: SceneDescriptor) -> Scene {
        let mode = match descriptor.mode.as_deref() {
            None | Some("") => VisualMode::Intro,
            Some(name) => VisualMode::parse(name).unwrap_or_else(|| {
                warn!("Scene {}: unknown mode '{}', using intro", index, name);
                VisualMode::Intro
            }),
        };

        let target = descriptor.target.unwrap_or_else(|| "wide".to_string());

        let duration = match descriptor.duration {
            Some(d) if d.is_finite() && d >= 0.0 => d,
            Some(d) => {
                warn!("Scene {}: invalid duration {}, using 0", index, d);
                0.0
            }
            None => DEFAULT_SCENE_DURATION,
        };

        Scene {
            caption: Caption {
                kicker: descriptor.kicker,
                title: descriptor.title,
                text: descriptor.text,
                bullets: descriptor.bullets,
            },
            camera: CameraPreset::from_target(&target, mode),
            target,
            mode,
            duration,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Story {
    pub title: String,
    scenes: Vec<Scene>,
}

impl Story {
    pub fn new(title: impl Into<String>, descriptors: Vec<SceneDescriptor>) -> Story {
        let scenes = descriptors
            .into_iter()
            .enumerate()
            .map(|(i, d)| Scene::from_descriptor(i, d))
            .collect();
        Story { title: title.into(), scenes }
    }

    /// The embedded photosynthesis narrative.
    pub fn builtin() -> Story {
        Story::from_json(BUILTIN_STORY).unwrap_or_else(|e| {
            error!("Embedded story is invalid: {}", e);
            Story::default()
        })
    }

    pub fn from_json(json: &str) -> CinematicResult<Story> {
        let file: StoryFile = serde_json::from_str(json)?;
        if file.scenes.is_empty() {
            return Err(CinematicError::EmptyStory);
        }
        Ok(Story::new(file.title, file.scenes))
    }

    pub fn from_path(path: &Path) -> CinematicResult<Story> {
        let json = fs::read_to_string(path).map_err(|source| CinematicError::StoryIo {
            path: path.to_path_buf(),
            source,
        })?;
        Story::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn durations(&self) -> Vec<f32> {
        self.scenes.iter().map(|s| s.duration).collect()
    }
}
