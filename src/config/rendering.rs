use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::DemoKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub demo: DemoKind,
    pub shader_path: PathBuf,
    pub clear_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            demo: DemoKind::default(),
            shader_path: PathBuf::from("res/shader/basic.shader"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
