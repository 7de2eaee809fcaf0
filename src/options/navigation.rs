use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Orbit navigation sensitivity and limits.
pub struct NavigationOptions {
    /// Rotation sensitivity multiplier. A drag across the full viewport
    /// height turns the camera one full revolution at 1.0.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Zoom sensitivity; each wheel notch scales distance by `0.95^speed`.
    #[schemars(title = "Zoom Speed", range(min = 0.05, max = 3.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
    /// Fraction of the pending motion applied per frame (0 = apply all at
    /// once, no inertia).
    #[schemars(title = "Damping", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub damping: f32,
    /// Closest allowed orbit distance.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed orbit distance.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Lowest elevation in degrees (negative = below the target).
    #[schemars(skip)]
    pub min_elevation: f32,
    /// Highest elevation in degrees.
    #[schemars(skip)]
    pub max_elevation: f32,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 0.2,
            damping: 0.0,
            min_distance: 0.0,
            max_distance: 1.0e6,
            min_elevation: -89.0,
            max_elevation: 89.0,
        }
    }
}

impl NavigationOptions {
    /// Reject limit pairs that are non-finite or inverted.
    ///
    /// # Errors
    ///
    /// [`ViewportError::OptionsParse`] naming the offending pair.
    pub fn validate(&self) -> Result<(), ViewportError> {
        check_range("distance", self.min_distance, self.max_distance)?;
        check_range("elevation", self.min_elevation, self.max_elevation)
    }

    /// Copy with every limit pair usable as a clamp range: non-finite
    /// limits fall back to the defaults and inverted pairs are swapped.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let (min_distance, max_distance) = usable_range(
            "distance",
            (self.min_distance, self.max_distance),
            (defaults.min_distance, defaults.max_distance),
        );
        let (min_elevation, max_elevation) = usable_range(
            "elevation",
            (self.min_elevation, self.max_elevation),
            (defaults.min_elevation, defaults.max_elevation),
        );
        Self {
            min_distance,
            max_distance,
            min_elevation,
            max_elevation,
            ..self.clone()
        }
    }
}

fn check_range(name: &str, min: f32, max: f32) -> Result<(), ViewportError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ViewportError::OptionsParse(format!(
            "navigation {name} limits must be finite (got {min}..{max})"
        )));
    }
    if min > max {
        return Err(ViewportError::OptionsParse(format!(
            "navigation min_{name} {min} exceeds max_{name} {max}"
        )));
    }
    Ok(())
}

fn usable_range(
    name: &str,
    (min, max): (f32, f32),
    fallback: (f32, f32),
) -> (f32, f32) {
    let min = if min.is_finite() { min } else { fallback.0 };
    let max = if max.is_finite() { max } else { fallback.1 };
    if min > max {
        log::warn!("navigation {name} limits {min}..{max} inverted, swapping");
        (max, min)
    } else {
        (min, max)
    }
}
