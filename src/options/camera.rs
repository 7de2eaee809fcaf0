use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::framer::{DEFAULT_MARGIN, DEFAULT_VERTICAL_OFFSET};
use crate::error::ViewportError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and framing parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees. Fixed for the controller's lifetime.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Distance of the eye from the origin along +Z at start-up.
    #[schemars(title = "Initial Distance", range(min = 1.0, max = 1000.0))]
    pub initial_distance: f32,
    /// Slack factor used by `focus_on` when the caller passes no margin.
    #[schemars(title = "Frame Margin", range(min = 1.0, max = 3.0), extend("step" = 0.05))]
    pub frame_margin: f32,
    /// Height of the eye above a framed object's center.
    #[schemars(skip)]
    pub frame_vertical_offset: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            initial_distance: 150.0,
            frame_margin: DEFAULT_MARGIN,
            frame_vertical_offset: DEFAULT_VERTICAL_OFFSET,
        }
    }
}

impl CameraOptions {
    /// Reject projections that cannot be built.
    ///
    /// # Errors
    ///
    /// [`ViewportError::OptionsParse`] for a field of view outside (0, 180)
    /// or a clip range that is not `0 < znear < zfar`.
    pub fn validate(&self) -> Result<(), ViewportError> {
        let fov_ok =
            self.fovy.is_finite() && self.fovy > 0.0 && self.fovy < 180.0;
        if !fov_ok {
            return Err(ViewportError::OptionsParse(format!(
                "camera fovy {} must lie strictly between 0 and 180",
                self.fovy
            )));
        }
        let clip_ok = self.znear.is_finite()
            && self.zfar.is_finite()
            && self.znear > 0.0
            && self.zfar > self.znear;
        if !clip_ok {
            return Err(ViewportError::OptionsParse(format!(
                "camera clip range {}..{} must satisfy 0 < znear < zfar",
                self.znear, self.zfar
            )));
        }
        Ok(())
    }
}
