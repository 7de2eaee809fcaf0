use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default pick target used when a pick names no candidates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ground", inline)]
#[serde(default)]
pub struct GroundOptions {
    /// Edge length of the square ground plane.
    #[schemars(title = "Size", range(min = 1.0, max = 10000.0))]
    pub size: f32,
    /// World-space Y of the ground plane.
    #[schemars(title = "Height", range(min = -1000.0, max = 1000.0))]
    pub height: f32,
}

impl Default for GroundOptions {
    fn default() -> Self {
        Self {
            size: 1000.0,
            height: -50.0,
        }
    }
}
