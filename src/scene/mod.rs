//! Scene context sent alongside every command
//!
//! A fresh snapshot is taken for each command so the agent sees the host as
//! it is at submission time. Nothing is cached between commands.

use crate::host::SceneSource;
use serde::Serialize;

/// Scene context as it appears in the request body
///
/// With no active scene the host sends an empty JSON object, which the
/// `Empty {}` variant serializes to. Outbound only, never parsed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SceneContext {
    Active(SceneSnapshot),
    Empty {},
}

/// Summary of the active scene
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    pub scene_name: String,
    pub scene_active: bool,
    pub token_count: usize,
    pub scene_size: SceneSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SceneSize {
    pub width: u32,
    pub height: u32,
}

impl SceneContext {
    pub fn empty() -> Self {
        SceneContext::Empty {}
    }

    /// Read the host's current scene into a context record
    pub fn capture(source: &dyn SceneSource) -> Self {
        match source.current_scene() {
            Some(scene) => SceneContext::Active(SceneSnapshot {
                scene_name: scene.name,
                scene_active: true,
                token_count: scene.token_count,
                scene_size: SceneSize {
                    width: scene.width,
                    height: scene.height,
                },
            }),
            None => SceneContext::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SceneContext::Empty {})
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::empty()
    }
}
